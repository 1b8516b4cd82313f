//! Locating and loading the store configuration.

use anyhow::{Context, Result};
use recordbook_store::StoreConfig;
use std::path::{Path, PathBuf};
use tracing::debug;

/// `<config_dir>/recordbook/config.yaml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut p| {
        p.push("recordbook");
        p.push("config.yaml");
        p
    })
}

/// Load the config from `explicit`, else from the default location if that
/// file exists, else use defaults. Environment overrides are applied last.
pub fn load_config(explicit: Option<&Path>) -> Result<StoreConfig> {
    let config = match explicit {
        Some(path) => read_config(path)?,
        None => match default_config_path() {
            Some(path) if path.is_file() => read_config(&path)?,
            _ => StoreConfig::default(),
        },
    };
    Ok(config.with_env())
}

fn read_config(path: &Path) -> Result<StoreConfig> {
    debug!(path = %path.display(), "reading config");
    StoreConfig::from_file(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))
}
