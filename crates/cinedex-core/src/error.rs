//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

use crate::ports::AuthError;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity_type} with id {id} not found")]
    NotFound { entity_type: &'static str, id: Uuid },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Repository(#[from] RepoError),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn movie_not_found(id: Uuid) -> Self {
        Self::NotFound {
            entity_type: "Movie",
            id,
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

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// Rejections raised while ingesting an uploaded poster.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("Only image files are allowed (jpg, jpeg, png, gif, webp), got {0:?}")]
    UnsupportedType(String),

    #[error("Poster file exceeds the {limit} byte limit")]
    TooLarge { limit: usize },
}

/// Failures of the poster file store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Poster storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
