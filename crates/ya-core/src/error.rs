//! Domain-level error types.

use thiserror::Error;

use crate::ports::AuthError;
use crate::validation::FieldErrors;

/// Domain errors - expected outcomes of a content operation that did not
/// go through.
///
/// `Forbidden` and `NotFound` are distinct here so callers can log them
/// apart, but they must be presented identically to users.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Login required")]
    AnonymousDenied,

    #[error("Actor does not own the resource")]
    Forbidden,

    #[error("Entity not found: {entity_type} {key}")]
    NotFound {
        entity_type: &'static str,
        key: String,
    },

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error(transparent)]
    Repo(#[from] RepoError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl DomainError {
    pub fn not_found(entity_type: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            key: key.to_string(),
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    /// Another row already holds a unique value.
    #[error("Unique constraint violation: {0}")]
    Unique(String),

    /// A referenced row does not exist.
    #[error("Foreign key violation: {0}")]
    ForeignKey(String),
}
