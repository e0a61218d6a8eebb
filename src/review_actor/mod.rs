//! # Review Actor
//!
//! Owns product reviews. The actor enforces the review invariants that can be checked
//! against a single review or the store:
//!
//! - rating in 1..=5 (creation and update),
//! - at most one review per `(product, user)` via the entity's natural key,
//! - purchase-gating: the author must have a delivered order containing the product,
//!   checked in `on_create` with the order client injected as context,
//! - only the author may edit.
//!
//! Rating recomputation is *not* done here; see [`crate::rating`].

pub mod entity;
pub mod error;

pub use error::*;

use crate::framework::{ResourceActor, ResourceClient};
use crate::model::Review;

/// Creates a new Review actor and its client.
///
/// Run it with an [`OrderClient`](crate::clients::OrderClient) as context.
pub fn new(buffer_size: usize) -> (ResourceActor<Review>, ResourceClient<Review>) {
    ResourceActor::new(buffer_size)
}
