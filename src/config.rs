use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::state::data::MatchMode;

/// Browser configuration, stored as JSON in the user's config directory.
///
/// A missing file is not an error: the browser starts with defaults and
/// simply has nothing to scan until roots are configured.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Root directories scanned at startup
    #[serde(default)]
    pub roots: Vec<PathBuf>,
    /// Default filter mode: require every token (true) or any token (false)
    #[serde(default)]
    pub match_all: bool,
}

impl BrowserConfig {
    /// Get the path where the configuration should be stored
    pub fn config_path() -> PathBuf {
        let mut path = dirs::config_dir()
            .or_else(|| dirs::home_dir())
            .expect("Could not determine user config directory");

        path.push("asset-browser");
        path.push("config.json");
        path
    }

    /// Load the configuration from the default location
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Load the configuration from an explicit path.
    /// A missing file falls back to defaults; a malformed one is an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// The configured default match mode
    pub fn match_mode(&self) -> MatchMode {
        if self.match_all {
            MatchMode::All
        } else {
            MatchMode::Any
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let config = BrowserConfig::load_from(&dir.path().join("config.json")).unwrap();

        assert!(config.roots.is_empty());
        assert_eq!(config.match_mode(), MatchMode::Any);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = BrowserConfig {
            roots: vec![PathBuf::from("/assets/actionrpgloot")],
            match_all: true,
        };
        config.save_to(&path).unwrap();

        let loaded = BrowserConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.match_mode(), MatchMode::All);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, b"{ roots: oops").unwrap();

        let result = BrowserConfig::load_from(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
