//! Application configuration

use anyhow::{Context, Result};
use log::{debug, info};
use pattern_mapping_types::MappingFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Current config format version
pub const CONFIG_VERSION: u32 = 1;

fn default_version() -> u32 {
    CONFIG_VERSION
}

/// Application-wide configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the config format
    #[serde(default = "default_version")]
    pub version: u32,
    /// Composite key separator and sentinel values
    #[serde(default)]
    pub format: MappingFormat,
    /// Catalog of patterns and source fields (None = built-in catalog)
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from disk
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from_path(&config_path)
    }

    /// Save configuration to `path`, or to the platform config path when
    /// none is given. Returns the path written.
    pub fn save(&self, path: Option<&Path>) -> Result<PathBuf> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::config_path()?,
        };
        self.save_to_path(&config_path)?;
        info!("Saved config to {}", config_path.display());
        Ok(config_path)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("org", "pattern-display", "pattern-display")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.json"))
    }

    /// Load configuration from a specific file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to a specific file path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            format: MappingFormat::default(),
            catalog_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"format":{"separator":"."}}"#).unwrap();
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.format.separator, ".");
        assert_eq!(config.format.hidden_destination, "_hidden");
        assert_eq!(config.catalog_path, None);
    }

    #[test]
    fn test_save_and_load_path() {
        let dir = std::env::temp_dir().join(format!("pattern-display-{}", uuid::Uuid::new_v4()));
        let path = dir.join("nested").join("config.json");

        let config = AppConfig {
            format: MappingFormat::with_separator("::"),
            catalog_path: Some(PathBuf::from("/srv/catalog.json")),
            ..Default::default()
        };
        config.save_to_path(&path).unwrap();
        assert_eq!(AppConfig::load_from_path(&path).unwrap(), config);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_save_to_explicit_path_returns_it() {
        let dir = std::env::temp_dir().join(format!("pattern-display-{}", uuid::Uuid::new_v4()));
        let path = dir.join("config.json");

        let written = AppConfig::default().save(Some(path.as_path())).unwrap();
        assert_eq!(written, path);
        assert_eq!(AppConfig::load_from_path(&path).unwrap(), AppConfig::default());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_missing_path_fails_with_context() {
        let err = AppConfig::load_from_path(Path::new("/nonexistent/pattern-display.json"))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }
}
