//! Domain errors for the tagsift core.

use thiserror::Error;

/// Domain-level errors raised when rebuilding persisted records.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A record breaks a model invariant
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
