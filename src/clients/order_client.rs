//! # Order Client
//!
//! Provides a high‑level API for interacting with the `Order` actor.
//! Stock reservation happens inside the actor's `on_create` hook.
use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{Order, OrderCreate, OrderId, OrderQuery, OrderStatus, ProductId, UserId};
use crate::order_actor::{OrderAction, OrderError};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params), fields(user_id = %params.user_id))]
    pub async fn place_order(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        debug!(?params, "place_order called");
        let id = self.inner.create(params).await?;
        info!(order_id = %id, "Order placed");
        Ok(id)
    }

    /// Moves an order along its fulfilment path.
    #[instrument(skip(self))]
    pub async fn advance(&self, id: OrderId, next: OrderStatus) -> Result<OrderStatus, OrderError> {
        Ok(self
            .inner
            .perform_action(id, OrderAction::Advance(next))
            .await?)
    }

    /// Walks an order through every step up to `Delivered`.
    pub async fn deliver(&self, id: OrderId) -> Result<(), OrderError> {
        self.advance(id, OrderStatus::Shipped).await?;
        self.advance(id, OrderStatus::Delivered).await?;
        Ok(())
    }

    /// True when `user_id` has a delivered order containing `product_id`.
    #[instrument(skip(self))]
    pub async fn has_received(&self, user_id: UserId, product_id: ProductId) -> Result<bool, OrderError> {
        let orders = self.list(OrderQuery::ForUser(user_id)).await?;
        Ok(orders.iter().any(|o| o.delivered_with(product_id)))
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.into()
    }
}
