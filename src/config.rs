use crate::error::{BoardError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What the store does when writing the board fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveErrorPolicy {
    /// Return the storage error to the caller
    #[default]
    Surface,
    /// Log the failure and keep going with the in-memory board
    Ignore,
}

/// Store configuration, usually read from `config.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Name of the persisted blob
    pub storage_key: String,
    /// Write indented JSON
    pub pretty: bool,
    pub on_save_error: SaveErrorPolicy,
}

impl StoreConfig {
    pub const DEFAULT_STORAGE_KEY: &'static str = "kanban-buckets";

    /// Loads and validates configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: StoreConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration, falling back to defaults when the file is missing or bad
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }

        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("Failed to load config at {:?}: {}", path, err);
                Self::default()
            }
        }
    }

    fn validate(&self) -> Result<()> {
        let key = self.storage_key.trim();
        if key.is_empty() {
            return Err(BoardError::ConfigError(
                "storage_key must not be empty".to_string(),
            ));
        }
        if key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(BoardError::ConfigError(format!(
                "storage_key '{}' must be a plain name",
                self.storage_key
            )));
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: Self::DEFAULT_STORAGE_KEY.to_string(),
            pretty: true,
            on_save_error: SaveErrorPolicy::default(),
        }
    }
}
