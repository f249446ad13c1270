//! Error types for the catalog engine.

use levelbook_share::{DecodeError, EncodeError};
use levelbook_storage::StorageError;
use levelbook_taxonomy::TaxonomyError;
use levelbook_types::LevelId;
use thiserror::Error;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur in catalog operations.
///
/// None of these leave the catalog changed.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Input is missing a required field or does not fit the taxonomy.
    #[error("validation failed: {0}")]
    Validation(String),

    /// No level has this id.
    #[error("level not found: {0}")]
    NotFound(LevelId),

    /// A query code (difficulty filter or sort key) is not recognized.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Storage error while loading.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Nothing to share.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// Malformed or empty shared payload.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl From<TaxonomyError> for CatalogError {
    fn from(err: TaxonomyError) -> Self {
        Self::Validation(err.to_string())
    }
}
