//! Application configuration management.
//!
//! Every setting is optional; a missing config file means defaults.
//! Configuration is stored at `~/.config/geozip/config.json`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GeozipError, Result};
use crate::fetch::DatasetSource;
use crate::models::Column;

/// Application name used for config/cache directory paths
const APP_NAME: &str = "geozip";

/// Config file name
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Overrides the archive download URL
    pub dataset_url: Option<String>,
    /// Overrides the name of the archive entry to read
    pub entry_name: Option<String>,
    /// Overrides the cache directory
    pub cache_dir: Option<PathBuf>,
    /// Entries older than this are refetched. None keeps them forever.
    pub cache_max_age_minutes: Option<i64>,
    pub summary_column: Column,
}

impl Config {
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => {
                debug!("No config directory on this platform, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let config_err = |reason: String| GeozipError::Config {
            path: path.to_path_buf(),
            reason,
        };
        let contents = std::fs::read_to_string(path).map_err(|e| config_err(e.to_string()))?;
        let config = serde_json::from_str(&contents).map_err(|e| config_err(e.to_string()))?;
        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.cache_dir {
            return Ok(dir.clone());
        }
        let cache_dir = dirs::cache_dir().ok_or_else(|| GeozipError::Config {
            path: PathBuf::from(CONFIG_FILE),
            reason: "could not find cache directory, set cache_dir".to_string(),
        })?;
        Ok(cache_dir.join(APP_NAME))
    }

    pub fn dataset_source(&self) -> DatasetSource {
        let mut source = DatasetSource::default();
        if let Some(ref url) = self.dataset_url {
            source.url = url.clone();
        }
        if let Some(ref entry) = self.entry_name {
            source.entry_name = entry.clone();
        }
        source
    }
}
