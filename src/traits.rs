//! Core traits for testability and abstraction.

use crate::error::Result;
use chrono::{DateTime, Utc};
use std::rc::Rc;

/// Trait for the persistent key-value substrate.
///
/// Task collections and the session marker are stored as plain string
/// values. The production implementation uses `SQLite`; tests use an
/// in-memory map or a fault-injecting double.
///
/// Every write is a whole-value overwrite. Implementations report faults
/// honestly; callers decide whether to swallow them.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<()>;

    /// List every stored key.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn list_keys(&self) -> Result<Vec<String>>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Rc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    fn list_keys(&self) -> Result<Vec<String>> {
        (**self).list_keys()
    }
}

/// Source of wall-clock time.
pub trait Clock {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Source of task identifiers.
///
/// Identifiers only need to be unique within one user's list.
pub trait IdGenerator {
    /// Produce a fresh identifier.
    fn next_id(&self) -> String;
}
