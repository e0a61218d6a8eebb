//! # Framework Errors
//!
//! This module defines the common error types used throughout the actor framework.
//! By centralizing error definitions, we ensure consistent error handling across
//! all actors and clients.

use crate::error::{ErrorKind, HasErrorKind};

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    /// Another entity already holds the same natural key.
    #[error("Conflicting entity: {0}")]
    Conflict(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Recovers the typed entity error that an actor hook returned.
    ///
    /// Hooks return `T::Error`, which the actor boxes before sending it back over the
    /// response channel. Client wrappers call this to get their own error type back;
    /// anything that is not an entity error of type `E` is handed back unchanged.
    pub fn downcast_entity<E>(self) -> Result<E, Self>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match self {
            FrameworkError::EntityError(inner) => match inner.downcast::<E>() {
                Ok(typed) => Ok(*typed),
                Err(other) => Err(FrameworkError::EntityError(other)),
            },
            other => Err(other),
        }
    }
}

impl HasErrorKind for FrameworkError {
    fn kind(&self) -> ErrorKind {
        match self {
            FrameworkError::NotFound(_) => ErrorKind::NotFound,
            FrameworkError::Conflict(_) => ErrorKind::Conflict,
            FrameworkError::ActorClosed
            | FrameworkError::ActorDropped
            | FrameworkError::EntityError(_) => ErrorKind::Collaborator,
        }
    }
}
