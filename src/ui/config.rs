//! # Configuration
//!
//! Optional user settings read from `config.json` in the platform config
//! directory (`~/.config/tooldeck/config.json` on Linux). Every field has a
//! default, so the file can be missing or list only what it changes:
//!
//! ```json
//! {
//!   "search_debounce_ms": 150,
//!   "scroll_throttle_ms": 100,
//!   "catalog": "/home/user/tools.json"
//! }
//! ```
//!
//! Command-line flags take precedence over the file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    /// Quiet period after the last keystroke before the search runs.
    pub search_debounce_ms: u64,

    /// Minimum spacing between scroll-state updates.
    pub scroll_throttle_ms: u64,

    /// Catalog file to load instead of the built-in one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_debounce_ms: 150,
            scroll_throttle_ms: 100,
            catalog: None,
        }
    }
}

impl Config {
    /// The user's configuration, or the defaults when there is none or it
    /// cannot be read. Problems are logged, never fatal.
    pub fn load() -> Self {
        let Some(path) = Self::location() else {
            log::debug!("No config directory on this platform, using defaults");
            return Self::default();
        };

        Self::read(&path).unwrap_or_else(|e| {
            log::warn!("Using default configuration: {:#}", e);
            Self::default()
        })
    }

    /// Parse the file at `path`. A file that does not exist yields the
    /// defaults; one that exists but is malformed is an error.
    pub fn read(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("Failed to read config file: {}", path.display())))
            }
        };

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Where the config file lives, if the platform has a config directory.
    pub fn location() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "tooldeck")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// The catalog to load: `cli` wins over the configured path. `None`
    /// means the built-in catalog.
    pub fn catalog_source<'a>(&'a self, cli: Option<&'a Path>) -> Option<&'a Path> {
        cli.or(self.catalog.as_deref())
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn scroll_throttle(&self) -> Duration {
        Duration::from_millis(self.scroll_throttle_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.search_debounce(), Duration::from_millis(150));
        assert_eq!(config.scroll_throttle(), Duration::from_millis(100));
        assert!(config.catalog.is_none());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config: Config = serde_json::from_str(r#"{"search_debounce_ms": 300}"#).unwrap();
        assert_eq!(config.search_debounce_ms, 300);
        assert_eq!(config.scroll_throttle_ms, 100);
        assert_eq!(config.catalog, None);
    }

    #[test]
    fn test_read_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            r#"{"scroll_throttle_ms": 16, "catalog": "/srv/tools.json"}"#,
        )
        .unwrap();

        let config = Config::read(&path).unwrap();
        assert_eq!(config.scroll_throttle(), Duration::from_millis(16));
        assert_eq!(config.catalog, Some(PathBuf::from("/srv/tools.json")));
    }

    #[test]
    fn test_missing_file_is_default() {
        let temp_dir = TempDir::new().unwrap();

        let config = Config::read(&temp_dir.path().join("absent.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "{ nope").unwrap();

        let err = Config::read(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config file"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = serde_json::from_str::<Config>(r#"{"theme": "Nord"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_catalog_source_precedence() {
        let config = Config {
            catalog: Some(PathBuf::from("/etc/tools.json")),
            ..Config::default()
        };
        let cli = PathBuf::from("./mine.json");

        assert_eq!(config.catalog_source(Some(&cli)), Some(cli.as_path()));
        assert_eq!(
            config.catalog_source(None),
            Some(Path::new("/etc/tools.json"))
        );
        assert_eq!(Config::default().catalog_source(None), None);
    }
}
