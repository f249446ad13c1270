//! Catalog engine for levelbook.
//!
//! Defines the operations a UI drives:
//! - [`Catalog`]: create, update and delete levels; hold the query state;
//!   partition levels into per-category [`Buckets`]
//! - [`view`]: the pure filter/sort engine behind each bucket
//! - [`LevelCard`]: render-ready data for a single level
//! - [`import_shared`] / [`share_list`]: the share flow over pluggable
//!   transport collaborators
//!
//! Everything runs synchronously on a single writer. Persistence happens
//! after each mutation; a failed write is reported through
//! [`Catalog::persist_status`] and never rolls back the in-memory change.

mod card;
mod config;
mod engine;
mod error;
pub mod import;
pub mod query;

pub use card::{Buckets, LevelCard, EMPTY_STATE};
pub use config::{CatalogConfig, DEFAULT_SHARE_BASE_URL};
pub use engine::{Catalog, PersistStatus};
pub use error::{CatalogError, CatalogResult};
pub use import::{
    import_prompt, import_shared, share_list, Clipboard, Confirm, FragmentChannel, ImportOutcome,
    Notice, ShareChannel,
};
pub use query::{view, DifficultyFilter, Query, QueryPatch, SortKey};
