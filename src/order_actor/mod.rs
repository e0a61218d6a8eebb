//! # Order Actor
//!
//! Owns placed orders and their fulfilment status.
//!
//! Depends on the Product actor through its context: creating an order reserves
//! stock for every line (all-or-nothing), and cancelling one releases it again.
//! A `Delivered` order is what purchase-gating for reviews looks for.

pub mod entity;
pub mod error;

pub use entity::OrderAction;
pub use error::*;

use crate::framework::{ResourceActor, ResourceClient};
use crate::model::Order;

/// Creates a new Order actor and its client.
///
/// Run it with a [`ProductClient`](crate::clients::ProductClient) as context.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::new(buffer_size)
}
