//! # `task_keeper`
//!
//! Per-user to-do lists over a pluggable key-value store.
//!
//! A user is identified only by a freely chosen name. Each name, trimmed
//! and lowercased, owns one task list stored as a JSON array under its own
//! key. Storage faults never reach the caller: reads degrade to empty
//! results and failed writes are logged and dropped.

pub mod app;
#[cfg(feature = "cli")]
pub mod cli;
pub mod clock;
pub mod config;
pub mod dashboard;
pub mod error;
#[cfg(feature = "cli")]
pub mod logging;
pub mod paths;
pub mod session;
pub mod storage;
pub mod tasks;
pub mod testing;
pub mod traits;
pub mod validation;

pub use app::{App, SessionContext};
pub use dashboard::{Dashboard, FormState, ViewState};
pub use error::{Error, Result, ValidationError};
pub use session::{KeySpace, SessionStore};
pub use storage::{MemoryStore, SqliteStore};
pub use traits::{Clock, IdGenerator, KeyValueStore};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
