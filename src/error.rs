//! Error types for `task_keeper`.

/// Errors that can occur while storing or manipulating tasks.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON parsing error occurred.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML parsing error occurred.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A `SQLite` database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The storage backend refused the operation.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// User-facing input errors.
///
/// These are the only errors surfaced to the user; storage faults are
/// swallowed at the storage boundary instead, so the two enums never mix.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The trimmed username is shorter than [`crate::validation::MIN_USERNAME_LEN`].
    #[error("Username must be at least 2 characters long")]
    UsernameTooShort,

    /// The trimmed task title is empty.
    #[error("Task title is required")]
    TitleRequired,
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
