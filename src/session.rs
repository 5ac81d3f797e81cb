//! Session marker and per-user key namespacing.
//!
//! Storage layout under a namespace `ns`:
//! - `ns-username` holds the raw name of the logged-in user
//! - `ns-tasks-<normalized name>` holds that user's task list as JSON
//!
//! Logging out removes only the session marker. Task lists for every
//! user who ever logged in stay in storage.
//!
//! All operations here are fail-soft: backend faults are logged and turned
//! into "absent" or "empty" results, never returned to the caller.

use crate::traits::KeyValueStore;

/// Namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "task-manager";

/// Normalize a username for key derivation: trimmed and lowercased.
///
/// Names that normalize identically share one task collection.
#[must_use]
pub fn normalize_username(username: &str) -> String {
    username.trim().to_lowercase()
}

/// Storage key naming scheme for one namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySpace {
    namespace: String,
}

impl KeySpace {
    /// Create a key space with the given namespace prefix.
    #[must_use]
    pub fn new(namespace: impl Into<String>) -> Self {
        Self { namespace: namespace.into() }
    }

    /// The namespace prefix.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Key of the session marker.
    #[must_use]
    pub fn username_key(&self) -> String {
        format!("{}-username", self.namespace)
    }

    /// Prefix shared by every task collection key.
    #[must_use]
    pub fn tasks_prefix(&self) -> String {
        format!("{}-tasks-", self.namespace)
    }

    /// Derive the task collection key for a user.
    #[must_use]
    pub fn derive_user_key(&self, username: &str) -> String {
        format!("{}{}", self.tasks_prefix(), normalize_username(username))
    }
}

impl Default for KeySpace {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}

/// Persists the active username and enumerates known users.
#[derive(Debug, Clone)]
pub struct SessionStore<S> {
    store: S,
    keys: KeySpace,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Create a session store over a backend.
    pub const fn new(store: S, keys: KeySpace) -> Self {
        Self { store, keys }
    }

    /// Remember `username` (as typed) as the current session.
    pub fn save_username(&self, username: &str) {
        match self.store.set(&self.keys.username_key(), username) {
            Ok(()) => tracing::info!(username, "saved session username"),
            Err(e) => tracing::error!(username, error = %e, "failed to save session username"),
        }
    }

    /// The previously saved username, if any.
    #[must_use]
    pub fn load_username(&self) -> Option<String> {
        match self.store.get(&self.keys.username_key()) {
            Ok(username) => {
                tracing::debug!(username = ?username, "loaded session username");
                username
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load session username");
                None
            }
        }
    }

    /// End the session. Task collections are left untouched.
    pub fn clear_session(&self) {
        match self.store.remove(&self.keys.username_key()) {
            Ok(()) => tracing::info!("cleared session username"),
            Err(e) => tracing::error!(error = %e, "failed to clear session username"),
        }
    }

    /// Normalized names of every user with a stored task collection.
    #[must_use]
    pub fn list_known_usernames(&self) -> Vec<String> {
        let prefix = self.keys.tasks_prefix();
        match self.store.list_keys() {
            Ok(keys) => keys
                .into_iter()
                .filter_map(|key| key.strip_prefix(&prefix).map(str::to_string))
                .collect(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to list stored usernames");
                Vec::new()
            }
        }
    }

    /// Describe every key under the namespace.
    ///
    /// Task collections report their size; the session marker reports its
    /// value. Keys from other namespaces are skipped.
    #[must_use]
    pub fn debug_summary(&self) -> Vec<(String, String)> {
        let keys = match self.store.list_keys() {
            Ok(keys) => keys,
            Err(e) => {
                tracing::warn!(error = %e, "failed to list storage keys");
                return Vec::new();
            }
        };

        let namespace_prefix = format!("{}-", self.keys.namespace());
        let tasks_prefix = self.keys.tasks_prefix();
        keys.into_iter()
            .filter(|key| key.starts_with(&namespace_prefix))
            .map(|key| {
                let value = self.store.get(&key).ok().flatten().unwrap_or_default();
                let description = if key.starts_with(&tasks_prefix) {
                    serde_json::from_str::<Vec<serde_json::Value>>(&value).map_or_else(
                        |_| "unreadable task list".to_string(),
                        |tasks| format!("{} tasks", tasks.len()),
                    )
                } else {
                    value
                };
                (key, description)
            })
            .collect()
    }
}
