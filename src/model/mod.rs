//! Pure data structures (DTOs). The resource types implement
//! [`ActorEntity`](crate::framework::ActorEntity) in their actor modules.

pub mod cart;
pub mod identity;
pub mod ids;
pub mod order;
pub mod product;
pub mod review;

pub use cart::*;
pub use identity::*;
pub use ids::*;
pub use order::*;
pub use product::*;
pub use review::*;

/// Rounds a money amount to whole cents.
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
