/// One consumer's evaluation of one product.
///
/// Implements [`ActorEntity`](crate::framework::ActorEntity) in
/// [`review_actor::entity`](crate::review_actor::entity).
use crate::model::{ProductId, ReviewId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A star rating, 1 to 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("Rating must be between 1 and 5, got {0}")]
pub struct RatingOutOfRange(pub u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn stars(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = RatingOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RatingOutOfRange(value))
        }
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub user_id: UserId,
    pub rating: Rating,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for submitting a review. The rating is validated on creation.
#[derive(Debug, Clone)]
pub struct ReviewCreate {
    pub product_id: ProductId,
    pub user_id: UserId,
    pub rating: u8,
    pub comment: Option<String>,
}

/// Changes an author may make to their own review.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewChanges {
    pub rating: Option<u8>,
    pub comment: Option<String>,
}

/// Update payload: the changes plus who is asking, so ownership can be checked.
#[derive(Debug, Clone)]
pub struct ReviewUpdate {
    pub author: UserId,
    pub changes: ReviewChanges,
}

/// Review selection for list queries.
#[derive(Debug, Clone)]
pub enum ReviewQuery {
    ForProduct(ProductId),
    ByUser(UserId),
}
