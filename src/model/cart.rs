//! Cart lines, the snapshot the engine caches, and the server-computed totals.
use crate::model::{round_cents, ItemId, ProductId, UserId};
use serde::{Deserialize, Serialize};

/// One product+quantity entry within a consumer's cart.
///
/// Product name, vendor and unit price are denormalized from the catalog when the
/// line is created. Implements [`ActorEntity`](crate::framework::ActorEntity) in
/// [`cart_actor::entity`](crate::cart_actor::entity).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub item_id: ItemId,
    pub owner: UserId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price: f64,
    pub product_name: String,
    pub vendor_name: String,
}

impl CartLine {
    pub fn line_total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

/// The consumer's cart as last fetched from the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub items: Vec<CartLine>,
}

impl CartSnapshot {
    pub fn line(&self, item_id: ItemId) -> Option<&CartLine> {
        self.items.iter().find(|l| l.item_id == item_id)
    }

    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|l| l.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Server-computed totals for a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartTotals {
    pub total_items: u32,
    pub subtotal: f64,
    pub estimated_tax: f64,
    pub total: f64,
    pub currency: String,
}

impl CartTotals {
    /// Totals over `lines`, each money amount rounded to cents.
    pub fn from_lines(lines: &[CartLine], tax_rate: f64, currency: impl Into<String>) -> Self {
        let subtotal = round_cents(lines.iter().map(CartLine::line_total).sum());
        let estimated_tax = round_cents(subtotal * tax_rate);
        Self {
            total_items: lines.iter().map(|l| l.quantity).sum(),
            subtotal,
            estimated_tax,
            total: round_cents(subtotal + estimated_tax),
            currency: currency.into(),
        }
    }
}

/// Payload for putting a product into a consumer's cart.
#[derive(Debug, Clone)]
pub struct CartLineCreate {
    pub owner: UserId,
    pub product_id: ProductId,
    pub quantity: u32,
}

/// New quantity for an existing line.
#[derive(Debug, Clone)]
pub struct CartLineUpdate {
    pub quantity: u32,
}

/// Cart line selection for list and purge queries.
#[derive(Debug, Clone)]
pub enum CartQuery {
    Owner(UserId),
}
