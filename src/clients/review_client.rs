//! # Review Client
//!
//! Provides a high‑level API for interacting with the `Review` actor.
use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{ProductId, Review, ReviewCreate, ReviewId, ReviewQuery, ReviewUpdate, UserId};
use crate::review_actor::ReviewError;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Review actor.
#[derive(Clone)]
pub struct ReviewClient {
    inner: ResourceClient<Review>,
}

impl ReviewClient {
    pub fn new(inner: ResourceClient<Review>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_review(&self, params: ReviewCreate) -> Result<ReviewId, ReviewError> {
        debug!("Sending request");
        Ok(self.inner.create(params).await?)
    }

    #[instrument(skip(self))]
    pub async fn update_review(&self, id: ReviewId, update: ReviewUpdate) -> Result<Review, ReviewError> {
        debug!("Sending request");
        Ok(self.inner.update(id, update).await?)
    }

    /// Deletes a review on behalf of `requester`, who must be its author.
    #[instrument(skip(self))]
    pub async fn delete_review(&self, id: ReviewId, requester: UserId) -> Result<Review, ReviewError> {
        let review = self
            .get(id)
            .await?
            .ok_or_else(|| ReviewError::NotFound(id.to_string()))?;
        if review.user_id != requester {
            return Err(ReviewError::NotOwner {
                user: requester,
                review: id.to_string(),
            });
        }
        self.inner.delete(id).await?;
        Ok(review)
    }

    /// Every current review of a product, in submission order.
    #[instrument(skip(self))]
    pub async fn reviews_for(&self, product_id: ProductId) -> Result<Vec<Review>, ReviewError> {
        self.list(ReviewQuery::ForProduct(product_id)).await
    }
}

#[async_trait]
impl ActorClient<Review> for ReviewClient {
    type Error = ReviewError;

    fn inner(&self) -> &ResourceClient<Review> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.into()
    }
}
