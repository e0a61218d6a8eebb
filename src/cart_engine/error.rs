//! Error types for the cart engine.

use crate::cart_actor::CartLineError;
use crate::error::{ErrorKind, HasErrorKind};
use thiserror::Error;

/// Errors surfaced by [`CartEngine`](super::CartEngine) operations.
///
/// Collaborator failures are only returned after the engine has resynchronized its view.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Invalid quantity {0}: must be at least 1")]
    InvalidQuantity(u32),

    #[error("Cart operations require an authenticated consumer")]
    Unauthorized,

    #[error(transparent)]
    Collaborator(#[from] CartLineError),

    #[error("Cart engine has shut down")]
    EngineClosed,
}

impl HasErrorKind for CartError {
    fn kind(&self) -> ErrorKind {
        match self {
            CartError::InvalidQuantity(_) => ErrorKind::Validation,
            CartError::Unauthorized => ErrorKind::Authorization,
            // The server's own classification wins (stock ceiling, unknown item, ...).
            CartError::Collaborator(inner) => inner.kind(),
            CartError::EngineClosed => ErrorKind::Collaborator,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(CartError::InvalidQuantity(0).kind(), ErrorKind::Validation);
        assert_eq!(CartError::Unauthorized.kind(), ErrorKind::Authorization);
        assert_eq!(CartError::EngineClosed.kind(), ErrorKind::Collaborator);
        let err = CartError::from(CartLineError::ActorCommunicationError("down".into()));
        assert_eq!(err.kind(), ErrorKind::Collaborator);
        assert!(err.kind().is_retryable());
        let err = CartError::from(CartLineError::NotFound("item_9".into()));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
