//! Configuration management for task-keeper.
//!
//! This module handles the `~/.task-keeper/config.yaml` file, which stores
//! the storage namespace, an optional database location and the log filter.

use crate::error::Result;
use crate::paths;
use crate::session::DEFAULT_NAMESPACE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default `tracing` filter directive when none is configured.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Prefix for every storage key.
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Database file to use instead of `~/.task-keeper/tasks.sqlite3`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,

    /// `tracing` env-filter directive, e.g. `info` or `task_keeper=debug`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self { namespace: default_namespace(), database_path: None, log_filter: None }
    }
}

impl Config {
    /// Load config from a specific file, returning None if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load_from(config_path: &Path) -> Result<Option<Self>> {
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(Some(config))
    }

    /// Load config from `path` (or the default location), falling back to
    /// defaults when the file is missing or unreadable.
    #[must_use]
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path.map(Path::to_path_buf).or_else(paths::default_config_path) else {
            return Self::default();
        };

        match Self::load_from(&path) {
            Ok(Some(config)) => config,
            Ok(None) => Self::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not load config, using defaults");
                Self::default()
            }
        }
    }

    /// Save config to a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// The database path to use: the configured one, else the default.
    #[must_use]
    pub fn resolved_database_path(&self) -> Option<PathBuf> {
        self.database_path.clone().or_else(paths::default_db_path)
    }

    /// The effective log filter directive.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.namespace, "task-manager");
        assert!(config.database_path.is_none());
        assert_eq!(config.log_filter(), "warn");
    }

    #[test]
    fn test_config_load_not_found() {
        let dir = TempDir::new().unwrap();
        let result = Config::load_from(&dir.path().join("config.yaml")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_config_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sub/config.yaml");
        let config = Config {
            namespace: "work".to_string(),
            database_path: Some(PathBuf::from("/tmp/work.sqlite3")),
            log_filter: Some("debug".to_string()),
        };

        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap().unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_config_missing_fields_use_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "log_filter: info\n").unwrap();

        let loaded = Config::load_from(&path).unwrap().unwrap();
        assert_eq!(loaded.namespace, DEFAULT_NAMESPACE);
        assert_eq!(loaded.log_filter(), "info");
    }

    #[test]
    fn test_config_yaml_omits_unset_fields() {
        let yaml = serde_yaml::to_string(&Config::default()).unwrap();
        assert!(yaml.contains("namespace: task-manager"));
        assert!(!yaml.contains("database_path"));
        assert!(!yaml.contains("log_filter"));
    }

    #[test]
    fn test_load_or_default_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "namespace: [unclosed").unwrap();

        assert!(Config::load_from(&path).is_err());
        assert_eq!(Config::load_or_default(Some(&path)), Config::default());
    }

    #[test]
    fn test_resolved_database_path_prefers_configured() {
        let config = Config {
            database_path: Some(PathBuf::from("/data/db.sqlite3")),
            ..Default::default()
        };
        assert_eq!(config.resolved_database_path(), Some(PathBuf::from("/data/db.sqlite3")));
    }
}
