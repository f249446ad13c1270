use crate::{KeyValueStore, StorageResult};
use levelbook_types::Level;
use tracing::{debug, warn};

/// Key the level collection is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "gdLevels";

/// Persistence collaborator of the catalog: the whole collection at once.
pub trait LevelStore {
    /// Loads the stored collection. A store with nothing saved yields an empty list.
    fn load(&self) -> StorageResult<Vec<Level>>;

    /// Replaces the stored collection.
    fn save(&self, levels: &[Level]) -> StorageResult<()>;
}

/// Stores the level collection as one JSON array under a single key.
#[derive(Debug)]
pub struct KvLevelStore<K> {
    kv: K,
    key: String,
}

impl<K: KeyValueStore> KvLevelStore<K> {
    /// Uses [`DEFAULT_STORAGE_KEY`].
    pub fn new(kv: K) -> Self {
        Self::with_key(kv, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(kv: K, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the underlying key-value store.
    #[must_use]
    pub fn inner(&self) -> &K {
        &self.kv
    }
}

impl<K: KeyValueStore> LevelStore for KvLevelStore<K> {
    fn load(&self) -> StorageResult<Vec<Level>> {
        let Some(text) = self.kv.get(&self.key)? else {
            debug!("no stored levels under `{}`", self.key);
            return Ok(Vec::new());
        };
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        let levels: Vec<Level> = serde_json::from_str(&text).inspect_err(|e| {
            warn!("stored levels under `{}` are unreadable: {e}", self.key);
        })?;
        debug!("loaded {} levels from `{}`", levels.len(), self.key);
        Ok(levels)
    }

    fn save(&self, levels: &[Level]) -> StorageResult<()> {
        let text = serde_json::to_string(levels)?;
        self.kv.set(&self.key, &text)
    }
}
