//! Key-value persistence layer for levelbook.
//!
//! The catalog persists its whole entry collection under a single key of an
//! opaque text store.
//!
//! # Architecture
//!
//! - [`KeyValueStore`] is the raw text store ([`MemoryStore`], [`FileStore`])
//! - [`LevelStore`] is what the catalog talks to: `load` and `save` of the
//!   full collection
//! - [`KvLevelStore`] serializes the collection as a JSON array into one key

mod error;
mod kv;
mod level_store;

pub use error::{StorageError, StorageResult};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use level_store::{KvLevelStore, LevelStore, DEFAULT_STORAGE_KEY};
