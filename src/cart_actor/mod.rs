//! # Cart Actor
//!
//! Server-side cart store: one entity per cart line, selected per consumer with
//! [`CartQuery::Owner`](crate::model::CartQuery). This is the authoritative cart that
//! the client-side [`cart_engine`](crate::cart_engine) reconciles against.
//!
//! Lines denormalize product name, vendor and price from the Product actor when they
//! are created, and every quantity is checked against the product's stock. The
//! `(owner, product)` pair is the line's natural key, so a second add of the same
//! product is turned into a quantity increase by [`CartClient`](crate::clients::CartClient).

pub mod entity;
pub mod error;

pub use error::*;

use crate::framework::{ResourceActor, ResourceClient};
use crate::model::CartLine;

/// Creates a new Cart actor and its client.
///
/// Run it with a [`ProductClient`](crate::clients::ProductClient) as context.
pub fn new(buffer_size: usize) -> (ResourceActor<CartLine>, ResourceClient<CartLine>) {
    ResourceActor::new(buffer_size)
}
