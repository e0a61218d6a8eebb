//! # Cart Client
//!
//! Provides a high‑level API for interacting with the `CartLine` actor: a consumer's
//! cart is the ordered set of lines they own. This client is the cart collaborator
//! that [`CartEngine`](crate::cart_engine::CartEngine) talks to in-process.
use crate::cart_actor::CartLineError;
use crate::cart_engine::CartBackend;
use crate::config::MarketConfig;
use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{
    CartLine, CartLineCreate, CartLineUpdate, CartQuery, CartSnapshot, CartTotals, ItemId,
    ProductId, UserId,
};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the Cart actor.
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<CartLine>,
    tax_rate: f64,
    currency: String,
}

impl CartClient {
    pub fn new(inner: ResourceClient<CartLine>, config: &MarketConfig) -> Self {
        Self {
            inner,
            tax_rate: config.tax_rate,
            currency: config.currency.clone(),
        }
    }

    /// The consumer's current cart, lines in the order they were added.
    #[instrument(skip(self))]
    pub async fn cart(&self, owner: UserId) -> Result<CartSnapshot, CartLineError> {
        let items = self.list(CartQuery::Owner(owner)).await?;
        Ok(CartSnapshot { items })
    }

    #[instrument(skip(self))]
    pub async fn totals(&self, owner: UserId) -> Result<CartTotals, CartLineError> {
        let snapshot = self.cart(owner).await?;
        Ok(CartTotals::from_lines(
            &snapshot.items,
            self.tax_rate,
            self.currency.as_str(),
        ))
    }

    /// Adds `quantity` units of a product. A product already in the cart has its
    /// line's quantity increased instead of getting a second line.
    #[instrument(skip(self))]
    pub async fn add_item(
        &self,
        owner: UserId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<CartSnapshot, CartLineError> {
        let params = CartLineCreate {
            owner,
            product_id,
            quantity,
        };
        match self.inner.create(params).await.map_err(CartLineError::from) {
            Ok(item_id) => {
                info!(%item_id, "Cart line created");
            }
            Err(CartLineError::AlreadyInCart(_)) => {
                let existing = self
                    .cart(owner)
                    .await?
                    .items
                    .into_iter()
                    .find(|l| l.product_id == product_id)
                    .ok_or_else(|| CartLineError::NotFound(product_id.to_string()))?;
                debug!(item_id = %existing.item_id, "Product already in cart, merging");
                let merged = existing.quantity.saturating_add(quantity);
                self.inner
                    .update(existing.item_id, CartLineUpdate { quantity: merged })
                    .await?;
            }
            Err(e) => return Err(e),
        }
        self.cart(owner).await
    }

    /// Sets the quantity of one of `owner`'s lines.
    #[instrument(skip(self))]
    pub async fn update_item(
        &self,
        owner: UserId,
        item_id: ItemId,
        quantity: u32,
    ) -> Result<CartSnapshot, CartLineError> {
        self.owned_line(owner, item_id).await?;
        self.inner
            .update(item_id, CartLineUpdate { quantity })
            .await?;
        self.cart(owner).await
    }

    #[instrument(skip(self))]
    pub async fn remove_item(
        &self,
        owner: UserId,
        item_id: ItemId,
    ) -> Result<CartSnapshot, CartLineError> {
        self.owned_line(owner, item_id).await?;
        self.inner.delete(item_id).await?;
        self.cart(owner).await
    }

    /// Removes every line of `owner`'s cart and returns how many there were.
    #[instrument(skip(self))]
    pub async fn clear(&self, owner: UserId) -> Result<usize, CartLineError> {
        let removed = self.inner.purge(CartQuery::Owner(owner)).await?;
        info!(removed, "Cart cleared");
        Ok(removed)
    }

    // Lines of other consumers are reported as missing, not forbidden.
    async fn owned_line(&self, owner: UserId, item_id: ItemId) -> Result<CartLine, CartLineError> {
        match self.get(item_id).await? {
            Some(line) if line.owner == owner => Ok(line),
            _ => Err(CartLineError::NotFound(item_id.to_string())),
        }
    }
}

#[async_trait]
impl ActorClient<CartLine> for CartClient {
    type Error = CartLineError;

    fn inner(&self) -> &ResourceClient<CartLine> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.into()
    }
}

#[async_trait]
impl CartBackend for CartClient {
    async fn fetch_cart(&self, owner: UserId) -> Result<CartSnapshot, CartLineError> {
        self.cart(owner).await
    }

    async fn fetch_totals(&self, owner: UserId) -> Result<CartTotals, CartLineError> {
        self.totals(owner).await
    }

    async fn add_item(
        &self,
        owner: UserId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<CartSnapshot, CartLineError> {
        CartClient::add_item(self, owner, product_id, quantity).await
    }

    async fn update_item(
        &self,
        owner: UserId,
        item_id: ItemId,
        quantity: u32,
    ) -> Result<CartSnapshot, CartLineError> {
        CartClient::update_item(self, owner, item_id, quantity).await
    }

    async fn remove_item(&self, owner: UserId, item_id: ItemId) -> Result<CartSnapshot, CartLineError> {
        CartClient::remove_item(self, owner, item_id).await
    }

    async fn clear(&self, owner: UserId) -> Result<(), CartLineError> {
        CartClient::clear(self, owner).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockClient;

    fn line(quantity: u32) -> CartLine {
        CartLine {
            item_id: ItemId(3),
            owner: UserId(1),
            product_id: ProductId(7),
            quantity,
            unit_price: 2.5,
            product_name: "Tea".to_string(),
            vendor_name: "Leafy".to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_merges_into_existing_line() {
        let mut mock = MockClient::<CartLine>::new();
        mock.expect_create()
            .return_err(FrameworkError::Conflict("user_1:product_7".to_string()));
        mock.expect_list().return_ok(vec![line(2)]);
        mock.expect_update(ItemId(3)).return_ok(line(5));
        mock.expect_list().return_ok(vec![line(5)]);

        let carts = CartClient::new(mock.client(), &MarketConfig::default());
        let snapshot = carts.add_item(UserId(1), ProductId(7), 3).await.unwrap();

        assert_eq!(snapshot.total_quantity(), 5);
        mock.verify();
    }

    #[tokio::test]
    async fn test_other_owners_lines_are_not_found() {
        let mut mock = MockClient::<CartLine>::new();
        mock.expect_get(ItemId(3)).return_ok(Some(line(1)));

        let carts = CartClient::new(mock.client(), &MarketConfig::default());
        let err = carts.remove_item(UserId(2), ItemId(3)).await.unwrap_err();

        assert_eq!(err, CartLineError::NotFound("item_3".to_string()));
        mock.verify();
    }

    #[tokio::test]
    async fn test_totals_use_configured_tax_and_currency() {
        let mut mock = MockClient::<CartLine>::new();
        mock.expect_list().return_ok(vec![line(4)]);
        let config = MarketConfig {
            tax_rate: 0.2,
            currency: "EUR".to_string(),
            ..MarketConfig::default()
        };

        let totals = CartClient::new(mock.client(), &config)
            .totals(UserId(1))
            .await
            .unwrap();

        assert_eq!(totals.subtotal, 10.0);
        assert_eq!(totals.estimated_tax, 2.0);
        assert_eq!(totals.total, 12.0);
        assert_eq!(totals.currency, "EUR");
        mock.verify();
    }
}
