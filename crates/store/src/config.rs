use crate::error::{StoreError, StoreResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable overriding [`StoreConfig::project_id`].
pub const ENV_PROJECT_ID: &str = "RECORDBOOK_PROJECT_ID";
/// Environment variable overriding [`StoreConfig::api_key`].
pub const ENV_API_KEY: &str = "RECORDBOOK_API_KEY";
/// Environment variable overriding [`StoreConfig::base_url`].
pub const ENV_BASE_URL: &str = "RECORDBOOK_BASE_URL";
/// Environment variable overriding [`StoreConfig::collection`].
pub const ENV_COLLECTION: &str = "RECORDBOOK_COLLECTION";

/// Connection settings for the Firestore-backed store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Google Cloud project id. Required.
    pub project_id: Option<String>,
    /// Firestore database id.
    pub database: String,
    /// Collection records are written to.
    pub collection: String,
    /// Web API key, sent as the `key` query parameter.
    pub api_key: Option<String>,
    /// REST endpoint root.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            project_id: None,
            database: "(default)".to_string(),
            collection: "data-store".to_string(),
            api_key: None,
            base_url: "https://firestore.googleapis.com".to_string(),
            timeout_secs: 30,
        }
    }
}

impl StoreConfig {
    /// Parse a YAML document. Missing keys take their defaults.
    pub fn from_yaml_str(source: &str) -> StoreResult<Self> {
        serde_yaml::from_str(source).map_err(|e| StoreError::Config(e.to_string()))
    }

    /// Read and parse a YAML config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&source)
    }

    /// Apply overrides from the process environment.
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value.
    /// Empty values are ignored.
    #[must_use]
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        if let Some(project_id) = get(ENV_PROJECT_ID) {
            self.project_id = Some(project_id);
        }
        if let Some(api_key) = get(ENV_API_KEY) {
            self.api_key = Some(api_key);
        }
        if let Some(base_url) = get(ENV_BASE_URL) {
            self.base_url = base_url;
        }
        if let Some(collection) = get(ENV_COLLECTION) {
            self.collection = collection;
        }
        self
    }
}
