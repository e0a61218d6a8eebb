/// Represents a product in the vendor catalog.
///
/// Implements [`ActorEntity`](crate::framework::ActorEntity) in
/// [`product_actor::entity`](crate::product_actor::entity).
use crate::model::ProductId;
use serde::{Deserialize, Serialize};

/// Average rating and review count cached on a product.
///
/// Always derived from the complete review set (see [`RatingSummary::from_ratings`]);
/// never adjusted incrementally. The average is stored at full `f64` precision and
/// rounded only for display.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RatingSummary {
    pub average_rating: f64,
    pub review_count: u32,
}

impl RatingSummary {
    /// Computes the summary of a set of 1-5 ratings. Zero ratings yield `0.0` / `0`.
    pub fn from_ratings<I>(ratings: I) -> Self
    where
        I: IntoIterator<Item = u8>,
    {
        let (sum, count) = ratings
            .into_iter()
            .fold((0u64, 0u32), |(sum, count), r| (sum + u64::from(r), count + 1));
        let average_rating = if count == 0 {
            0.0
        } else {
            sum as f64 / f64::from(count)
        };
        Self {
            average_rating,
            review_count: count,
        }
    }

    /// The average rounded to one decimal, for display.
    pub fn display_average(&self) -> f64 {
        (self.average_rating * 10.0).round() / 10.0
    }
}

#[derive(Debug, Clone)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub vendor_name: String,
    pub price: f64,
    /// Units available for sale.
    pub stock: u32,
    pub rating: RatingSummary,
}

impl Product {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        vendor_name: impl Into<String>,
        price: f64,
        stock: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            vendor_name: vendor_name.into(),
            price,
            stock,
            rating: RatingSummary::default(),
        }
    }
}

/// Payload for listing a new product.
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub name: String,
    pub vendor_name: String,
    pub price: f64,
    pub stock: u32,
}

/// Payload for editing a product. The rating summary is not editable here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<u32>,
}

/// Product selection for list queries.
#[derive(Debug, Clone)]
pub enum ProductQuery {
    All,
    Vendor(String),
}
