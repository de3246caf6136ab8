//! Editor configuration loaded from a JSON file

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::Error;
use super::types::Result;

pub use voxedit_remote::{DEFAULT_PORT as DEFAULT_REMOTE_PORT, RemoteConfig};

/// Top-level editor configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Paint color selected when the editor starts
    pub paint_color: String,
    /// Maximum number of retained history snapshots (None = unbounded)
    pub history_limit: Option<usize>,
    /// Log filter used instead of `info` when RUST_LOG is unset
    pub log_filter: Option<String>,
    /// Remote control server
    pub remote: RemoteConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            paint_color: "#ffffff".to_string(),
            history_limit: None,
            log_filter: None,
            remote: RemoteConfig::default(),
        }
    }
}

impl EditorConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            log::info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Write configuration as pretty JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, json)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.paint_color.is_empty() {
            return Err(Error::Config("paint_color must not be empty".into()));
        }
        if self.history_limit == Some(0) {
            return Err(Error::Config("history_limit must be at least 1".into()));
        }
        Ok(())
    }
}
