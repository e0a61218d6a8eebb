//! Error types for the Review actor.

use crate::error::{ErrorKind, HasErrorKind};
use crate::framework::FrameworkError;
use crate::model::{ProductId, RatingOutOfRange, UserId};
use crate::order_actor::OrderError;
use thiserror::Error;

/// Errors that can occur during review operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReviewError {
    #[error("Review not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    InvalidRating(#[from] RatingOutOfRange),

    /// The author has no delivered order containing the product.
    #[error("{user} has not received {product}")]
    NotPurchased { user: UserId, product: ProductId },

    /// Someone other than the author tried to change or delete the review.
    #[error("{user} does not own {review}")]
    NotOwner { user: UserId, review: String },

    /// The author already reviewed this product.
    #[error("Review already exists: {0}")]
    AlreadyReviewed(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for ReviewError {
    fn from(e: FrameworkError) -> Self {
        match e.downcast_entity::<ReviewError>() {
            Ok(typed) => typed,
            Err(FrameworkError::NotFound(id)) => ReviewError::NotFound(id),
            Err(FrameworkError::Conflict(key)) => ReviewError::AlreadyReviewed(key),
            Err(other) => ReviewError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl From<OrderError> for ReviewError {
    fn from(e: OrderError) -> Self {
        ReviewError::ActorCommunicationError(e.to_string())
    }
}

impl HasErrorKind for ReviewError {
    fn kind(&self) -> ErrorKind {
        match self {
            ReviewError::NotFound(_) => ErrorKind::NotFound,
            ReviewError::InvalidRating(_) => ErrorKind::Validation,
            ReviewError::NotPurchased { .. } | ReviewError::NotOwner { .. } => {
                ErrorKind::Authorization
            }
            ReviewError::AlreadyReviewed(_) => ErrorKind::Conflict,
            ReviewError::ActorCommunicationError(_) => ErrorKind::Collaborator,
        }
    }
}
