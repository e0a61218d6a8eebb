//! # Review Service
//!
//! The entry point for review mutations. Validation, duplicate detection, purchase
//! gating and ownership are enforced before anything is written; the rating summary
//! is recomputed after every write that commits.

use crate::clients::ReviewClient;
use crate::model::{
    ProductId, Rating, RatingSummary, Review, ReviewChanges, ReviewCreate, ReviewId,
    ReviewUpdate, UserId,
};
use crate::rating::{RatingAggregator, RatingError};
use crate::review_actor::ReviewError;
use tracing::{info, instrument, warn};

/// Outcome of a committed review mutation.
///
/// `value` is always valid: the mutation happened. `summary` carries the outcome of the
/// recompute that followed; on `Err` the product's summary is stale until
/// [`ReviewService::retry_recalculate`] succeeds.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewReceipt<T> {
    pub value: T,
    pub summary: Result<RatingSummary, RatingError>,
}

impl<T> ReviewReceipt<T> {
    pub fn summary_is_stale(&self) -> bool {
        self.summary.is_err()
    }
}

#[derive(Clone)]
pub struct ReviewService {
    reviews: ReviewClient,
    aggregator: RatingAggregator,
}

impl ReviewService {
    pub fn new(reviews: ReviewClient, aggregator: RatingAggregator) -> Self {
        Self {
            reviews,
            aggregator,
        }
    }

    /// Submits `author`'s review of `product_id`.
    ///
    /// Rejected without a recompute when the rating is outside 1-5, when the author
    /// already reviewed the product, or when they have no delivered order containing it.
    #[instrument(skip(self, comment))]
    pub async fn create_review(
        &self,
        author: UserId,
        product_id: ProductId,
        rating: u8,
        comment: Option<String>,
    ) -> Result<ReviewReceipt<ReviewId>, ReviewError> {
        Rating::try_from(rating)?;
        let id = self
            .reviews
            .create_review(ReviewCreate {
                product_id,
                user_id: author,
                rating,
                comment,
            })
            .await?;
        info!(review_id = %id, "Review created");
        Ok(self.receipt(product_id, id).await)
    }

    /// Changes the rating and/or comment of `author`'s own review.
    #[instrument(skip(self))]
    pub async fn update_review(
        &self,
        author: UserId,
        review_id: ReviewId,
        changes: ReviewChanges,
    ) -> Result<ReviewReceipt<Review>, ReviewError> {
        if let Some(stars) = changes.rating {
            Rating::try_from(stars)?;
        }
        let review = self
            .reviews
            .update_review(review_id, ReviewUpdate { author, changes })
            .await?;
        info!(%review_id, "Review updated");
        Ok(self.receipt(review.product_id, review).await)
    }

    /// Deletes `author`'s own review and returns it.
    #[instrument(skip(self))]
    pub async fn delete_review(
        &self,
        author: UserId,
        review_id: ReviewId,
    ) -> Result<ReviewReceipt<Review>, ReviewError> {
        let review = self.reviews.delete_review(review_id, author).await?;
        info!(%review_id, "Review deleted");
        Ok(self.receipt(review.product_id, review).await)
    }

    /// Re-runs the recompute for a product, e.g. after a receipt reported a failure.
    pub async fn retry_recalculate(
        &self,
        product_id: ProductId,
    ) -> Result<RatingSummary, RatingError> {
        self.aggregator.recalculate(product_id).await
    }

    async fn receipt<T>(&self, product_id: ProductId, value: T) -> ReviewReceipt<T> {
        let summary = self.aggregator.recalculate(product_id).await;
        if let Err(e) = &summary {
            warn!(%product_id, error = %e, "Review committed but rating summary is stale");
        }
        ReviewReceipt { value, summary }
    }
}
