//! [`ActorEntity`] implementation for the [`Product`] domain type.
//!
//! Includes support for custom actions like stock checking, reservation and
//! rating summary replacement.

use super::actions::{ProductAction, ProductActionResult};
use super::error::ProductError;
use crate::framework::ActorEntity;
use crate::model::{Product, ProductCreate, ProductId, ProductQuery, ProductUpdate};
use async_trait::async_trait;

fn check_price(price: f64) -> Result<f64, ProductError> {
    if price.is_finite() && price >= 0.0 {
        Ok(price)
    } else {
        Err(ProductError::ValidationError(format!("invalid price {price}")))
    }
}

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Query = ProductQuery;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Context = ();
    type Error = ProductError;

    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, Self::Error> {
        if params.name.trim().is_empty() {
            return Err(ProductError::ValidationError("name must not be empty".into()));
        }
        let price = check_price(params.price)?;
        Ok(Self::new(id, params.name, params.vendor_name, price, params.stock))
    }

    fn matches(&self, query: &ProductQuery) -> bool {
        match query {
            ProductQuery::All => true,
            ProductQuery::Vendor(vendor) => &self.vendor_name == vendor,
        }
    }

    async fn on_update(&mut self, update: ProductUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(price) = update.price {
            self.price = check_price(price)?;
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ProductAction,
        _ctx: &(),
    ) -> Result<ProductActionResult, Self::Error> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::CheckStock(self.stock)),
            ProductAction::ReserveStock(0) => Err(ProductError::InvalidQuantity(0)),
            ProductAction::ReserveStock(quantity) => {
                if self.stock >= quantity {
                    self.stock -= quantity;
                    Ok(ProductActionResult::ReserveStock(()))
                } else {
                    Err(ProductError::InsufficientStock {
                        requested: quantity,
                        available: self.stock,
                    })
                }
            }
            ProductAction::ReleaseStock(quantity) => {
                self.stock = self.stock.saturating_add(quantity);
                Ok(ProductActionResult::ReleaseStock(()))
            }
            ProductAction::ApplyRatingSummary(summary) => {
                self.rating = summary;
                Ok(ProductActionResult::ApplyRatingSummary(summary))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RatingSummary;

    fn widget() -> Product {
        Product::new(ProductId(1), "Widget", "Acme", 10.0, 3)
    }

    #[tokio::test]
    async fn test_reserve_stock_refuses_to_oversell() {
        let mut product = widget();
        let err = product
            .handle_action(ProductAction::ReserveStock(4), &())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ProductError::InsufficientStock {
                requested: 4,
                available: 3
            }
        );
        assert_eq!(product.stock, 3);

        product
            .handle_action(ProductAction::ReserveStock(3), &())
            .await
            .unwrap();
        assert_eq!(product.stock, 0);
    }

    #[tokio::test]
    async fn test_apply_rating_summary_replaces_summary() {
        let mut product = widget();
        let summary = RatingSummary::from_ratings([2, 4]);
        product
            .handle_action(ProductAction::ApplyRatingSummary(summary), &())
            .await
            .unwrap();
        assert_eq!(product.rating, summary);
    }

    #[test]
    fn test_rejects_negative_price() {
        let params = ProductCreate {
            name: "Widget".into(),
            vendor_name: "Acme".into(),
            price: -1.0,
            stock: 1,
        };
        assert!(matches!(
            Product::from_create_params(ProductId(1), params),
            Err(ProductError::ValidationError(_))
        ));
    }
}
