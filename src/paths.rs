//! Path utilities for determining data storage locations.
//!
//! All task-keeper data lives in `~/.task-keeper/`: the `SQLite` database
//! holding every user's tasks and the optional YAML config file.

use std::path::{Path, PathBuf};

/// The base directory name for task-keeper data.
const DATA_DIR_NAME: &str = ".task-keeper";

/// The database filename.
pub const DATABASE_FILENAME: &str = "tasks.sqlite3";

/// The config filename.
pub const CONFIG_FILENAME: &str = "config.yaml";

/// Get the base data directory.
///
/// Returns `~/.task-keeper/` or `None` if the home directory
/// cannot be determined.
#[must_use]
pub fn data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| data_dir_in(&home))
}

/// Get the data directory under an explicit home directory.
#[must_use]
pub fn data_dir_in(home: &Path) -> PathBuf {
    home.join(DATA_DIR_NAME)
}

/// Get the default database path, `~/.task-keeper/tasks.sqlite3`.
#[must_use]
pub fn default_db_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join(DATABASE_FILENAME))
}

/// Get the default config path, `~/.task-keeper/config.yaml`.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join(CONFIG_FILENAME))
}
