//! # Product Client
//!
//! Provides a high‑level API for interacting with the `Product` actor.
use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate, RatingSummary};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.into()
    }
}

fn unexpected(action: &str, result: ProductActionResult) -> ProductError {
    ProductError::ActorCommunicationError(format!("{action} answered with {result:?}"))
}

impl ProductClient {
    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<ProductId, ProductError> {
        debug!("Sending request");
        Ok(self.inner.create(params).await?)
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        Ok(self.inner.update(id, update).await?)
    }

    /// Check the current stock level for a product.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: ProductId) -> Result<u32, ProductError> {
        match self.inner.perform_action(id, ProductAction::CheckStock).await? {
            ProductActionResult::CheckStock(level) => Ok(level),
            other => Err(unexpected("CheckStock", other)),
        }
    }

    /// Reserve a specific amount of stock for a product.
    ///
    /// Returns an error if the stock is insufficient.
    #[instrument(skip(self))]
    pub async fn reserve_stock(&self, id: ProductId, quantity: u32) -> Result<(), ProductError> {
        debug!(quantity, "Reserving stock");
        match self
            .inner
            .perform_action(id, ProductAction::ReserveStock(quantity))
            .await?
        {
            ProductActionResult::ReserveStock(()) => Ok(()),
            other => Err(unexpected("ReserveStock", other)),
        }
    }

    /// Return previously reserved stock.
    #[instrument(skip(self))]
    pub async fn release_stock(&self, id: ProductId, quantity: u32) -> Result<(), ProductError> {
        match self
            .inner
            .perform_action(id, ProductAction::ReleaseStock(quantity))
            .await?
        {
            ProductActionResult::ReleaseStock(()) => Ok(()),
            other => Err(unexpected("ReleaseStock", other)),
        }
    }

    /// Overwrite the cached rating summary of a product.
    #[instrument(skip(self))]
    pub async fn apply_rating_summary(
        &self,
        id: ProductId,
        summary: RatingSummary,
    ) -> Result<RatingSummary, ProductError> {
        match self
            .inner
            .perform_action(id, ProductAction::ApplyRatingSummary(summary))
            .await?
        {
            ProductActionResult::ApplyRatingSummary(stored) => Ok(stored),
            other => Err(unexpected("ApplyRatingSummary", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_action};

    #[tokio::test]
    async fn test_check_stock_returns_correct_level() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let check_task = tokio::spawn(async move { product_client.check_stock(ProductId(1)).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, ProductId(1));
        assert!(matches!(action, ProductAction::CheckStock));

        responder
            .send(Ok(ProductActionResult::CheckStock(42)))
            .unwrap();

        let result = check_task.await.unwrap();
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_reserve_stock_insufficient_stock() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let reserve_task =
            tokio::spawn(async move { product_client.reserve_stock(ProductId(1), 100).await });

        let (_, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert!(matches!(action, ProductAction::ReserveStock(100)));

        // Entity errors come back boxed and are recovered as the typed error.
        responder
            .send(Err(FrameworkError::EntityError(Box::new(
                ProductError::InsufficientStock {
                    requested: 100,
                    available: 7,
                },
            ))))
            .unwrap();

        let result = reserve_task.await.unwrap();
        assert_eq!(
            result,
            Err(ProductError::InsufficientStock {
                requested: 100,
                available: 7
            })
        );
    }

    #[tokio::test]
    async fn test_closed_actor_maps_to_communication_error() {
        let (client, receiver) = create_mock_client::<Product>(1);
        drop(receiver);
        let product_client = ProductClient::new(client);

        let result = product_client.check_stock(ProductId(1)).await;
        assert!(matches!(result, Err(ProductError::ActorCommunicationError(_))));
    }
}
