//! Client-facing error classification.

use thiserror::Error;

/// Result type used at the boundary between the core and its adapters.
pub type DomainResult<T> = Result<T, DomainError>;

/// How a request-level failure should be surfaced to a caller.
///
/// Each crate keeps its own precise error enum and converts into this one at
/// the edge. Metadata construction errors never end up here: they abort startup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The caller sent something unacceptable (malformed JSON, schema violation, ...).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A category, fieldset or product does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The storage collaborator failed; passed through unchanged.
    #[error("storage failure: {0}")]
    Storage(String),

    /// Anything else that is our fault rather than the caller's.
    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Stable machine-readable code, used in JSON error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Validation(_) => "validation_error",
            DomainError::NotFound(_) => "not_found",
            DomainError::Storage(_) => "store_error",
            DomainError::Internal(_) => "internal_error",
        }
    }

    /// Human-readable message without the classification prefix.
    pub fn message(&self) -> &str {
        match self {
            DomainError::Validation(m)
            | DomainError::NotFound(m)
            | DomainError::Storage(m)
            | DomainError::Internal(m) => m,
        }
    }
}
