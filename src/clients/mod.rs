//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient).
//!
//! We don't expose raw message passing to the rest of the crate: each wrapper turns
//! generic requests into domain calls and framework errors into its actor's error type.

pub mod cart_client;
pub mod order_client;
pub mod product_client;
pub mod review_client;

pub use cart_client::*;
pub use order_client::*;
pub use product_client::*;
pub use review_client::*;
