//! [`ActorEntity`] implementation for the [`CartLine`] domain type.

use super::error::CartLineError;
use crate::clients::ProductClient;
use crate::framework::{ActorClient, ActorEntity};
use crate::model::{CartLine, CartLineCreate, CartLineUpdate, CartQuery, ItemId, ProductId};
use async_trait::async_trait;

async fn ensure_stock(
    products: &ProductClient,
    product_id: ProductId,
    requested: u32,
) -> Result<(), CartLineError> {
    let available = products.check_stock(product_id).await?;
    if requested > available {
        return Err(CartLineError::InsufficientStock {
            requested,
            available,
        });
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for CartLine {
    type Id = ItemId;
    type Create = CartLineCreate;
    type Update = CartLineUpdate;
    type Query = CartQuery;
    type Action = ();
    type ActionResult = ();
    type Context = ProductClient;
    type Error = CartLineError;

    fn from_create_params(id: ItemId, params: CartLineCreate) -> Result<Self, Self::Error> {
        if params.quantity == 0 {
            return Err(CartLineError::InvalidQuantity(0));
        }
        // Name, vendor and price are filled in from the catalog by `on_create`.
        Ok(Self {
            item_id: id,
            owner: params.owner,
            product_id: params.product_id,
            quantity: params.quantity,
            unit_price: 0.0,
            product_name: String::new(),
            vendor_name: String::new(),
        })
    }

    fn matches(&self, query: &CartQuery) -> bool {
        match query {
            CartQuery::Owner(owner) => self.owner == *owner,
        }
    }

    fn natural_key(&self) -> Option<String> {
        Some(format!("{}:{}", self.owner, self.product_id))
    }

    async fn on_create(&mut self, products: &ProductClient) -> Result<(), Self::Error> {
        let product = products
            .get(self.product_id)
            .await?
            .ok_or_else(|| CartLineError::UnknownProduct(self.product_id.to_string()))?;
        if self.quantity > product.stock {
            return Err(CartLineError::InsufficientStock {
                requested: self.quantity,
                available: product.stock,
            });
        }
        self.unit_price = product.price;
        self.product_name = product.name;
        self.vendor_name = product.vendor_name;
        Ok(())
    }

    async fn on_update(
        &mut self,
        update: CartLineUpdate,
        products: &ProductClient,
    ) -> Result<(), Self::Error> {
        if update.quantity == 0 {
            return Err(CartLineError::InvalidQuantity(0));
        }
        ensure_stock(products, self.product_id, update.quantity).await?;
        self.quantity = update.quantity;
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &ProductClient) -> Result<(), Self::Error> {
        Ok(())
    }
}
