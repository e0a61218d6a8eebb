/// Represents a customer order.
///
/// Implements [`ActorEntity`](crate::framework::ActorEntity) in
/// [`order_actor::entity`](crate::order_actor::entity).
use crate::model::{round_cents, OrderId, ProductId, UserId};
use serde::{Deserialize, Serialize};

/// Fulfilment state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Legal forward transitions: `Pending → Shipped → Delivered`, and
    /// `Pending | Shipped → Cancelled`.
    pub fn can_become(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Shipped) | (Shipped, Delivered) | (Pending, Cancelled) | (Shipped, Cancelled)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price: f64,
}

#[derive(Debug, Clone)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub lines: Vec<OrderLine>,
    pub total: f64,
    pub status: OrderStatus,
}

impl Order {
    /// Creates a pending order; the total is derived from the lines.
    pub fn new(id: OrderId, user_id: UserId, lines: Vec<OrderLine>) -> Self {
        let total = round_cents(
            lines
                .iter()
                .map(|l| l.unit_price * f64::from(l.quantity))
                .sum(),
        );
        Self {
            id,
            user_id,
            lines,
            total,
            status: OrderStatus::Pending,
        }
    }

    /// True when this order was delivered and contains `product_id`.
    pub fn delivered_with(&self, product_id: ProductId) -> bool {
        self.status == OrderStatus::Delivered
            && self.lines.iter().any(|l| l.product_id == product_id)
    }
}

/// Payload for placing a new order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub user_id: UserId,
    pub lines: Vec<OrderLine>,
}

/// Order selection for list queries.
#[derive(Debug, Clone)]
pub enum OrderQuery {
    ForUser(UserId),
}
