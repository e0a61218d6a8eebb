//! # Rating Aggregation
//!
//! Keeps each product's cached [`RatingSummary`](crate::model::RatingSummary) equal to
//! the mean and count of its current reviews.
//!
//! - [`RatingAggregator::recalculate`] always recomputes from the complete review set,
//!   so it is idempotent and repairs any earlier drift.
//! - [`ReviewService`] is where reviews are created, edited and deleted. Every
//!   successful mutation is followed by a recompute; a failed recompute is reported in
//!   the [`ReviewReceipt`] but does not undo the mutation.

pub mod aggregator;
pub mod service;

pub use aggregator::{RatingAggregator, RatingError};
pub use service::{ReviewReceipt, ReviewService};
