//! [`ActorEntity`] implementation for the [`Review`] domain type.

use super::error::ReviewError;
use crate::clients::OrderClient;
use crate::framework::{ActorClient, ActorEntity};
use crate::model::{
    OrderQuery, Rating, Review, ReviewCreate, ReviewId, ReviewQuery, ReviewUpdate,
};
use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

#[async_trait]
impl ActorEntity for Review {
    type Id = ReviewId;
    type Create = ReviewCreate;
    type Update = ReviewUpdate;
    type Query = ReviewQuery;
    type Action = ();
    type ActionResult = ();
    type Context = OrderClient;
    type Error = ReviewError;

    fn from_create_params(id: ReviewId, params: ReviewCreate) -> Result<Self, Self::Error> {
        let rating = Rating::try_from(params.rating)?;
        let now = Utc::now();
        Ok(Self {
            id,
            product_id: params.product_id,
            user_id: params.user_id,
            rating,
            comment: params.comment,
            created_at: now,
            updated_at: now,
        })
    }

    fn matches(&self, query: &ReviewQuery) -> bool {
        match query {
            ReviewQuery::ForProduct(product_id) => self.product_id == *product_id,
            ReviewQuery::ByUser(user_id) => self.user_id == *user_id,
        }
    }

    fn natural_key(&self) -> Option<String> {
        Some(format!("{}:{}", self.product_id, self.user_id))
    }

    /// Purchase-gating: scans all of the author's orders for a delivered one
    /// containing the product.
    async fn on_create(&mut self, orders: &OrderClient) -> Result<(), Self::Error> {
        let history = orders.list(OrderQuery::ForUser(self.user_id)).await?;
        debug!(user_id = %self.user_id, orders = history.len(), "Checking purchase history");
        if history.iter().any(|o| o.delivered_with(self.product_id)) {
            Ok(())
        } else {
            Err(ReviewError::NotPurchased {
                user: self.user_id,
                product: self.product_id,
            })
        }
    }

    async fn on_update(&mut self, update: ReviewUpdate, _ctx: &OrderClient) -> Result<(), Self::Error> {
        if update.author != self.user_id {
            return Err(ReviewError::NotOwner {
                user: update.author,
                review: self.id.to_string(),
            });
        }
        if let Some(stars) = update.changes.rating {
            self.rating = Rating::try_from(stars)?;
        }
        if let Some(comment) = update.changes.comment {
            self.comment = Some(comment);
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &OrderClient) -> Result<(), Self::Error> {
        Ok(())
    }
}
