//! The cart collaborator as seen by the engine.
use crate::cart_actor::CartLineError;
use crate::model::{CartSnapshot, CartTotals, ItemId, ProductId, UserId};
use async_trait::async_trait;

/// Request/response contract of the server-side cart.
///
/// Implemented in-process by [`CartClient`](crate::clients::CartClient) and, for tests,
/// by [`MockCartBackend`](crate::cart_engine::mock::MockCartBackend). Any transport that
/// satisfies these semantics will do.
#[async_trait]
pub trait CartBackend: Send + Sync + 'static {
    async fn fetch_cart(&self, owner: UserId) -> Result<CartSnapshot, CartLineError>;

    async fn fetch_totals(&self, owner: UserId) -> Result<CartTotals, CartLineError>;

    async fn add_item(
        &self,
        owner: UserId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<CartSnapshot, CartLineError>;

    async fn update_item(
        &self,
        owner: UserId,
        item_id: ItemId,
        quantity: u32,
    ) -> Result<CartSnapshot, CartLineError>;

    async fn remove_item(&self, owner: UserId, item_id: ItemId)
        -> Result<CartSnapshot, CartLineError>;

    async fn clear(&self, owner: UserId) -> Result<(), CartLineError>;
}
