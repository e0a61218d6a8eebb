//! Custom actions for the Product actor.
//!
//! These actions are handled by [`ActorEntity::handle_action`](crate::framework::ActorEntity::handle_action)
//! in [`entity`](super::entity).

use crate::model::RatingSummary;

/// Custom actions for Product entities.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Checks the current stock level without modifying it.
    CheckStock,
    /// Reserves a specified amount of stock. Fails if it exceeds available stock.
    ReserveStock(u32),
    /// Puts reserved stock back, e.g. when an order is cancelled.
    ReleaseStock(u32),
    /// Replaces the cached rating summary wholesale.
    ApplyRatingSummary(RatingSummary),
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone)]
pub enum ProductActionResult {
    CheckStock(u32),
    ReserveStock(()),
    ReleaseStock(()),
    ApplyRatingSummary(RatingSummary),
}
