//! Error types for the Cart actor.

use crate::error::{ErrorKind, HasErrorKind};
use crate::framework::FrameworkError;
use crate::product_actor::ProductError;
use thiserror::Error;

/// Errors that can occur during cart line operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartLineError {
    #[error("Cart item not found: {0}")]
    NotFound(String),

    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },

    /// The product already has a line in this cart.
    #[error("Already in cart: {0}")]
    AlreadyInCart(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for CartLineError {
    fn from(e: FrameworkError) -> Self {
        match e.downcast_entity::<CartLineError>() {
            Ok(typed) => typed,
            Err(FrameworkError::NotFound(id)) => CartLineError::NotFound(id),
            Err(FrameworkError::Conflict(key)) => CartLineError::AlreadyInCart(key),
            Err(other) => CartLineError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl From<ProductError> for CartLineError {
    fn from(e: ProductError) -> Self {
        match e {
            ProductError::NotFound(id) => CartLineError::UnknownProduct(id),
            ProductError::InsufficientStock {
                requested,
                available,
            } => CartLineError::InsufficientStock {
                requested,
                available,
            },
            ProductError::InvalidQuantity(q) => CartLineError::InvalidQuantity(q),
            other => CartLineError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl HasErrorKind for CartLineError {
    fn kind(&self) -> ErrorKind {
        match self {
            CartLineError::NotFound(_) | CartLineError::UnknownProduct(_) => ErrorKind::NotFound,
            CartLineError::InvalidQuantity(_) | CartLineError::InsufficientStock { .. } => {
                ErrorKind::Validation
            }
            CartLineError::AlreadyInCart(_) => ErrorKind::Conflict,
            CartLineError::ActorCommunicationError(_) => ErrorKind::Collaborator,
        }
    }
}
