//! Domain-level errors.
//!
//! These errors represent business rule violations on the user workflow.
//! They are independent of infrastructure concerns (HTTP, database).

use thiserror::Error;

/// Domain-specific errors for business rule violations.
///
/// The display value is the human-readable message surfaced to clients.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Requested user does not exist
    #[error("{0}")]
    NotFound(String),

    /// Email uniqueness violated
    #[error("{0}")]
    Conflict(String),

    /// Input rejected by a business rule
    #[error("{0}")]
    InvalidInput(String),

    /// Internal domain error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        DomainError::NotFound(msg.into())
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        DomainError::Conflict(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        DomainError::InvalidInput(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        DomainError::Internal(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
