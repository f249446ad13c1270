//! Core type definitions for levelbook.
//!
//! This crate defines the fundamental types shared by every other crate:
//! - [`Level`] entries and their closed classification enums
//! - [`LevelFields`], the form-shaped input used to create and update levels
//! - [`LevelId`] and the monotonic [`IdClock`] that issues them
//!
//! Difficulty vocabularies live in `levelbook-taxonomy`; this crate stores
//! difficulty codes verbatim so persisted data round-trips exactly.

mod ids;
mod level;

pub use ids::{Clock, FixedClock, IdClock, LevelId, SystemClock};
pub use level::{normalize_tags, Category, Level, LevelFields, Rating};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("unknown rating: {0}")]
    UnknownRating(String),

    #[error("invalid level id: {0}")]
    InvalidId(String),
}
