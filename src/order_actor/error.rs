//! Error types for the Order actor.

use crate::error::{ErrorKind, HasErrorKind};
use crate::framework::FrameworkError;
use crate::model::OrderStatus;
use crate::product_actor::ProductError;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The product specified in the order is invalid or does not exist.
    #[error("Invalid product: {0}")]
    InvalidProduct(String),

    /// There is insufficient stock to fulfill the order.
    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),

    /// The order data provided is invalid.
    #[error("Order validation error: {0}")]
    ValidationError(String),

    /// The status change is not a legal transition.
    #[error("Cannot move order from {from:?} to {to:?}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for OrderError {
    fn from(e: FrameworkError) -> Self {
        match e.downcast_entity::<OrderError>() {
            Ok(typed) => typed,
            Err(FrameworkError::NotFound(id)) => OrderError::NotFound(id),
            Err(other) => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl From<ProductError> for OrderError {
    fn from(e: ProductError) -> Self {
        match e {
            ProductError::NotFound(id) => OrderError::InvalidProduct(id),
            ProductError::InsufficientStock { .. } => OrderError::InsufficientStock(e.to_string()),
            ProductError::InvalidQuantity(_) | ProductError::ValidationError(_) => {
                OrderError::ValidationError(e.to_string())
            }
            ProductError::ActorCommunicationError(msg) => OrderError::ActorCommunicationError(msg),
        }
    }
}

impl HasErrorKind for OrderError {
    fn kind(&self) -> ErrorKind {
        match self {
            OrderError::NotFound(_) => ErrorKind::NotFound,
            OrderError::InvalidProduct(_)
            | OrderError::InsufficientStock(_)
            | OrderError::ValidationError(_)
            | OrderError::InvalidTransition { .. } => ErrorKind::Validation,
            OrderError::ActorCommunicationError(_) => ErrorKind::Collaborator,
        }
    }
}
