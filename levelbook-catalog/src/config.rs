use levelbook_storage::DEFAULT_STORAGE_KEY;
use serde::{Deserialize, Serialize};

/// Default page share links point at.
pub const DEFAULT_SHARE_BASE_URL: &str = "https://levelbook.local/";

/// Catalog settings. Every field has a default, so a partial JSON file works.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Key the whole collection is persisted under.
    pub storage_key: String,
    /// Page URL share tokens are appended to as a fragment.
    pub share_base_url: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            share_base_url: DEFAULT_SHARE_BASE_URL.to_string(),
        }
    }
}

impl CatalogConfig {
    /// Loads settings from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes settings to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
