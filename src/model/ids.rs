//! Type-safe identifiers. Each wraps the `u32` the owning actor hands out.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0)
            }
        }
    };
}

id_type!(
    /// Identifies a catalog product.
    ProductId,
    "product"
);
id_type!(
    /// Identifies a consumer, vendor or admin account.
    UserId,
    "user"
);
id_type!(
    /// Identifies an order.
    OrderId,
    "order"
);
id_type!(
    /// Identifies a review.
    ReviewId,
    "review"
);
id_type!(
    /// Identifies one line of a consumer's cart.
    ItemId,
    "item"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes() {
        assert_eq!(ProductId(3).to_string(), "product_3");
        assert_eq!(ItemId::from(7).to_string(), "item_7");
        assert_eq!(UserId(1).to_string(), "user_1");
    }
}
