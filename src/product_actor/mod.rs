//! # Product Actor
//!
//! Owns the vendor catalog: product details, stock, and the cached rating summary.
//!
//! ## Custom Actions
//!
//! ```rust,ignore
//! // Check current stock level (read-only)
//! let stock = product_client.check_stock(product_id).await?;
//!
//! // Reserve stock for an order (mutating, can fail)
//! product_client.reserve_stock(product_id, quantity).await?;
//!
//! // Overwrite the rating summary (only the rating aggregator does this)
//! product_client.apply_rating_summary(product_id, summary).await?;
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use marketplace_core::product_actor;
//! use marketplace_core::clients::ProductClient;
//! use marketplace_core::model::ProductCreate;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, generic_client) = product_actor::new(32);
//!     let client = ProductClient::new(generic_client);
//!     tokio::spawn(actor.run(()));
//!
//!     let params = ProductCreate {
//!         name: "Widget".to_string(),
//!         vendor_name: "Acme".to_string(),
//!         price: 29.99,
//!         stock: 100,
//!     };
//!     let id = client.create_product(params).await?;
//!     client.reserve_stock(id, 5).await?;
//!     assert_eq!(client.check_stock(id).await?, 95);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::framework::{ResourceActor, ResourceClient};
use crate::model::Product;

/// Creates a new Product actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Product>, ResourceClient<Product>) {
    ResourceActor::new(buffer_size)
}
