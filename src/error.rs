//! # Error Taxonomy
//!
//! Every component keeps its own `thiserror` enum, but callers (request handlers, the
//! UI layer) only need to know which *kind* of failure happened to decide what to show
//! or whether to retry. [`HasErrorKind`] maps each component error onto that shared
//! taxonomy.

use serde::Serialize;
use std::fmt;

/// Coarse classification shared by all marketplace errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// An argument was out of range. Nothing was sent and nothing changed.
    Validation,
    /// The caller is not allowed to do this (not a consumer, not the owner, not a buyer).
    Authorization,
    /// The operation would duplicate something that must be unique.
    Conflict,
    /// The referenced entity does not exist.
    NotFound,
    /// A store or channel underneath failed. Retryable.
    Collaborator,
}

impl ErrorKind {
    pub fn is_retryable(self) -> bool {
        matches!(self, ErrorKind::Collaborator)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Authorization => "authorization",
            ErrorKind::Conflict => "conflict",
            ErrorKind::NotFound => "not found",
            ErrorKind::Collaborator => "collaborator",
        };
        f.write_str(name)
    }
}

/// Implemented by every component error.
pub trait HasErrorKind {
    fn kind(&self) -> ErrorKind;
}
