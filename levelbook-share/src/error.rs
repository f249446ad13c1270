//! Error types for the share protocol.

use thiserror::Error;

/// Result type for share operations.
pub type ShareResult<T> = Result<T, ShareError>;

/// Failure to produce a share token.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The collection is empty; there is nothing meaningful to share.
    #[error("no levels to share")]
    Empty,

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failure to read an incoming share token.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The token is not valid base64 text.
    #[error("invalid share token: {0}")]
    InvalidToken(String),

    /// The decoded text is not a list of levels.
    #[error("invalid share payload: {0}")]
    InvalidPayload(String),

    /// The payload parsed but holds no levels.
    #[error("share payload contains no levels")]
    Empty,
}

/// Any share protocol failure.
#[derive(Debug, Error)]
pub enum ShareError {
    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}
