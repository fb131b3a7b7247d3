//! Popup configuration loaded from `config.json`.
//!
//! Missing or unreadable files never stop the application: it logs a
//! warning and runs with defaults.

mod error;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use error::ConfigError;

const APP_DIR: &str = "chartpop";
const CONFIG_FILE: &str = "config.json";

/// Settings for the popup and its host application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupConfig {
    /// Base URL icon file names are appended to.
    pub icons_url: String,
    /// Overlay width in columns.
    pub width: u16,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            icons_url: "icons/".to_string(),
            width: 48,
            log_filter: "chartpop=info".to_string(),
        }
    }
}

impl PopupConfig {
    /// Loads the user's configuration, falling back to defaults.
    pub fn load() -> Self {
        match config_path() {
            Ok(path) => Self::load_or_default(&path),
            Err(err) => {
                tracing::warn!(%err, "no configuration directory; using defaults");
                Self::default()
            }
        }
    }

    /// Loads `path` if it exists, falling back to defaults on any error.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        Self::load_from(path).unwrap_or_else(|err| {
            tracing::warn!(%err, ?path, "failed to load config.json; using defaults");
            Self::default()
        })
    }

    /// Reads and parses `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Full URL of the icon file `name`.
    pub fn icon_url(&self, name: &str) -> String {
        format!("{}{name}", self.icons_url)
    }
}

/// Location of `config.json` under the platform configuration directory.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
        .ok_or(ConfigError::NoConfigDir)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn defaults() {
        let config = PopupConfig::default();
        assert_eq!(config.icons_url, "icons/");
        assert_eq!(config.width, 48);
        assert_eq!(config.icon_url("close.svg"), "icons/close.svg");
    }

    #[test]
    fn load_from_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"icons_url": "https://cdn.example/icons/"}"#).unwrap();
        let config = PopupConfig::load_from(&path).unwrap();
        assert_eq!(config.icons_url, "https://cdn.example/icons/");
        assert_eq!(config.width, 48);
    }

    #[test]
    fn load_from_malformed_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            PopupConfig::load_from(&path),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn load_from_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = PopupConfig::load_from(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn load_or_default_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert_eq!(PopupConfig::load_or_default(&missing), PopupConfig::default());

        let bad = dir.path().join("bad.json");
        fs::write(&bad, r#"{"width": "wide"}"#).unwrap();
        assert_eq!(PopupConfig::load_or_default(&bad), PopupConfig::default());
    }

    #[test]
    fn config_path_ends_with_app_file() {
        if let Ok(path) = config_path() {
            assert!(path.ends_with("chartpop/config.json"));
        }
    }
}
