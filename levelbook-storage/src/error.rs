//! Error types for the storage layer.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Key contains characters that cannot name a file.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// The backing store refused the write.
    #[error("write rejected: {0}")]
    WriteRejected(String),
}
