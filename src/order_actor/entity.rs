//! [`ActorEntity`] implementation for the [`Order`] domain type.
//!
//! Orchestration with the Product actor (price lookup, stock reservation) happens in
//! the `on_create` hook, with the product client injected as context.

use super::error::OrderError;
use crate::clients::ProductClient;
use crate::framework::{ActorClient, ActorEntity};
use crate::model::{Order, OrderCreate, OrderId, OrderQuery, OrderStatus};
use async_trait::async_trait;
use tracing::{info, warn};

/// Custom actions for Order entities.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Moves the order to a new status if the transition is legal.
    Advance(OrderStatus),
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = ();
    type Query = OrderQuery;
    type Action = OrderAction;
    type ActionResult = OrderStatus;
    type Context = ProductClient;
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        if params.lines.is_empty() {
            return Err(OrderError::ValidationError("order has no lines".into()));
        }
        if let Some(line) = params.lines.iter().find(|l| l.quantity == 0) {
            return Err(OrderError::ValidationError(format!(
                "zero quantity for {}",
                line.product_id
            )));
        }
        Ok(Self::new(id, params.user_id, params.lines))
    }

    fn matches(&self, query: &OrderQuery) -> bool {
        match query {
            OrderQuery::ForUser(user_id) => self.user_id == *user_id,
        }
    }

    /// Prices every line from the catalog and reserves its stock.
    ///
    /// Reservations are all-or-nothing: if one line fails, the lines already
    /// reserved are released before the error is returned.
    async fn on_create(&mut self, products: &ProductClient) -> Result<(), Self::Error> {
        let mut reserved = Vec::with_capacity(self.lines.len());
        let mut failure = None;

        for line in &mut self.lines {
            let outcome = async {
                let product = products
                    .get(line.product_id)
                    .await?
                    .ok_or_else(|| OrderError::InvalidProduct(line.product_id.to_string()))?;
                products.reserve_stock(line.product_id, line.quantity).await?;
                Ok::<f64, OrderError>(product.price)
            }
            .await;

            match outcome {
                Ok(price) => {
                    line.unit_price = price;
                    reserved.push((line.product_id, line.quantity));
                }
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            }
        }

        if let Some(e) = failure {
            for (product_id, quantity) in reserved {
                if let Err(release) = products.release_stock(product_id, quantity).await {
                    warn!(%product_id, quantity, error = %release, "Failed to release stock");
                }
            }
            return Err(e);
        }

        let repriced = Order::new(self.id, self.user_id, std::mem::take(&mut self.lines));
        *self = repriced;
        info!(order_id = %self.id, total = self.total, "Stock reserved for order");
        Ok(())
    }

    async fn on_update(&mut self, _update: (), _ctx: &ProductClient) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        products: &ProductClient,
    ) -> Result<OrderStatus, Self::Error> {
        match action {
            OrderAction::Advance(next) => {
                if !self.status.can_become(next) {
                    return Err(OrderError::InvalidTransition {
                        from: self.status,
                        to: next,
                    });
                }
                if next == OrderStatus::Cancelled {
                    for line in &self.lines {
                        products.release_stock(line.product_id, line.quantity).await?;
                    }
                }
                self.status = next;
                Ok(next)
            }
        }
    }
}
