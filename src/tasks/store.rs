//! Per-user task persistence.
//!
//! Each user's list is stored whole, as one JSON array, under the key
//! derived from their normalized username. Saves always replace the full
//! list. Faults are logged and swallowed: a failed load yields an empty
//! list and a failed save is dropped. A single record that does not fit
//! the task schema is skipped on its own; the rest of the list loads.

use crate::error::Result;
use crate::session::KeySpace;
use crate::tasks::models::Task;
use crate::traits::KeyValueStore;

/// Loads and saves task lists keyed by username.
#[derive(Debug, Clone)]
pub struct TaskRepository<S> {
    store: S,
    keys: KeySpace,
}

impl<S: KeyValueStore> TaskRepository<S> {
    /// Create a repository over a backend.
    pub const fn new(store: S, keys: KeySpace) -> Self {
        Self { store, keys }
    }

    /// Load a user's tasks, or an empty list if none are stored or the
    /// stored value cannot be read.
    #[must_use]
    pub fn load_tasks(&self, username: &str) -> Vec<Task> {
        let key = self.keys.derive_user_key(username);
        match self.try_load(&key) {
            Ok(tasks) => {
                tracing::info!(username, key = %key, count = tasks.len(), "loaded tasks");
                tasks
            }
            Err(e) => {
                tracing::warn!(username, key = %key, error = %e, "failed to load tasks");
                Vec::new()
            }
        }
    }

    /// Replace a user's stored list with `tasks`.
    pub fn save_tasks(&self, tasks: &[Task], username: &str) {
        let key = self.keys.derive_user_key(username);
        match self.try_save(&key, tasks) {
            Ok(()) => tracing::info!(username, key = %key, count = tasks.len(), "saved tasks"),
            Err(e) => tracing::error!(username, key = %key, error = %e, "failed to save tasks"),
        }
    }

    fn try_load(&self, key: &str) -> Result<Vec<Task>> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(Vec::new());
        };
        let records: Vec<serde_json::Value> = serde_json::from_str(&raw)?;
        let tasks = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match serde_json::from_value::<Task>(record) {
                Ok(task) => Some(task),
                Err(e) => {
                    tracing::warn!(key, index, error = %e, "skipping unreadable task record");
                    None
                }
            })
            .collect();
        Ok(tasks)
    }

    fn try_save(&self, key: &str, tasks: &[Task]) -> Result<()> {
        let raw = serde_json::to_string(tasks)?;
        self.store.set(key, &raw)
    }
}
