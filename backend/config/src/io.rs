//! Config file location and loading.

use crate::error::ConfigError;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Default config file name within the config directory.
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Resolve the Wayfarer config directory.
/// Priority: `WAYFARER_CONFIG_DIR` env > `~/.wayfarer/` > `./.wayfarer`
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("WAYFARER_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    match dirs::home_dir() {
        Some(home) => home.join(".wayfarer"),
        None => PathBuf::from(".wayfarer"),
    }
}

/// Resolve the full path to the main config file.
pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

/// Read the raw YAML document as a JSON value tree.
///
/// Returns an empty object if the file doesn't exist (first run).
pub async fn load_raw(path: &Path) -> Result<serde_json::Value, ConfigError> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(serde_json::Value::Object(Default::default()));
    }

    let raw = fs::read_to_string(path).await.map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let value: Option<serde_json::Value> =
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    info!(path = %path.display(), "Loaded config");
    // An empty file parses as null.
    Ok(value.unwrap_or_else(|| serde_json::Value::Object(Default::default())))
}
