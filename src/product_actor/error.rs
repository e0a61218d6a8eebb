//! Error types for the Product actor.

use crate::error::{ErrorKind, HasErrorKind};
use crate::framework::FrameworkError;
use thiserror::Error;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// The requested product was not found.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// The requested quantity exceeds the available stock.
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },

    /// The provided quantity is invalid (e.g., zero).
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// The product data provided is invalid.
    #[error("Product validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for ProductError {
    fn from(e: FrameworkError) -> Self {
        match e.downcast_entity::<ProductError>() {
            Ok(typed) => typed,
            Err(FrameworkError::NotFound(id)) => ProductError::NotFound(id),
            Err(other) => ProductError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl HasErrorKind for ProductError {
    fn kind(&self) -> ErrorKind {
        match self {
            ProductError::NotFound(_) => ErrorKind::NotFound,
            ProductError::InsufficientStock { .. }
            | ProductError::InvalidQuantity(_)
            | ProductError::ValidationError(_) => ErrorKind::Validation,
            ProductError::ActorCommunicationError(_) => ErrorKind::Collaborator,
        }
    }
}
