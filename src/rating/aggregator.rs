//! Full recomputation of a product's rating summary.

use crate::clients::{ProductClient, ReviewClient};
use crate::error::{ErrorKind, HasErrorKind};
use crate::framework::ActorClient;
use crate::model::{ProductId, RatingSummary};
use crate::product_actor::ProductError;
use crate::review_actor::ReviewError;
use thiserror::Error;
use tracing::{info, instrument};

/// Errors from a recompute. Always safe to retry.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RatingError {
    #[error("Rating summary not updated: {0}")]
    Product(#[from] ProductError),

    #[error("Reviews unavailable: {0}")]
    Reviews(#[from] ReviewError),
}

impl HasErrorKind for RatingError {
    fn kind(&self) -> ErrorKind {
        match self {
            RatingError::Product(e) => e.kind(),
            RatingError::Reviews(e) => e.kind(),
        }
    }
}

/// Derives rating summaries from the review store and writes them onto products.
#[derive(Clone)]
pub struct RatingAggregator {
    products: ProductClient,
    reviews: ReviewClient,
}

impl RatingAggregator {
    pub fn new(products: ProductClient, reviews: ReviewClient) -> Self {
        Self { products, reviews }
    }

    /// Reads every current review of `product_id`, computes count and mean, and
    /// stores both on the product. Returns the stored summary.
    ///
    /// Concurrent calls for one product are last-writer-wins, and each writer stores
    /// a summary that was correct as of its own read.
    #[instrument(skip(self))]
    pub async fn recalculate(&self, product_id: ProductId) -> Result<RatingSummary, RatingError> {
        self.products
            .get(product_id)
            .await?
            .ok_or_else(|| ProductError::NotFound(product_id.to_string()))?;

        let reviews = self.reviews.reviews_for(product_id).await?;
        let summary = RatingSummary::from_ratings(reviews.iter().map(|r| r.rating.stars()));
        let stored = self
            .products
            .apply_rating_summary(product_id, summary)
            .await?;

        info!(
            %product_id,
            average_rating = stored.average_rating,
            review_count = stored.review_count,
            "Rating summary recalculated"
        );
        Ok(stored)
    }
}
