//! Testing utilities and mock implementations.
//!
//! These types are provided for use in tests. They may appear unused in
//! the library itself but are consumed by unit and integration tests.

#![allow(dead_code)]

use crate::error::{Error, Result};
use crate::traits::{Clock, KeyValueStore};
use chrono::{DateTime, Duration, Utc};
use std::cell::{Cell, RefCell};

/// A backend whose every operation fails, as an unavailable storage
/// substrate would.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(Error::Unavailable("storage disabled".to_string()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<()> {
        Err(Error::Unavailable("quota exceeded".to_string()))
    }

    fn remove(&self, _key: &str) -> Result<()> {
        Err(Error::Unavailable("storage disabled".to_string()))
    }

    fn list_keys(&self) -> Result<Vec<String>> {
        Err(Error::Unavailable("storage disabled".to_string()))
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Cell<DateTime<Utc>>,
}

impl ManualClock {
    /// Create a clock frozen at `now`.
    #[must_use]
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self { now: Cell::new(now) }
    }

    /// Create a clock frozen at 2024-01-01T00:00:00Z.
    #[must_use]
    pub fn at_epoch_2024() -> Self {
        Self::new(DateTime::from_timestamp(1_704_067_200, 0).unwrap_or_default())
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

/// Wraps a backend and records every key written.
#[derive(Debug, Default)]
pub struct RecordingStore<S> {
    inner: S,
    writes: RefCell<Vec<String>>,
}

impl<S: KeyValueStore> RecordingStore<S> {
    /// Wrap `inner`.
    pub fn new(inner: S) -> Self {
        Self { inner, writes: RefCell::new(Vec::new()) }
    }

    /// Keys passed to `set`, in call order.
    #[must_use]
    pub fn writes(&self) -> Vec<String> {
        self.writes.borrow().clone()
    }
}

impl<S: KeyValueStore> KeyValueStore for RecordingStore<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.writes.borrow_mut().push(key.to_string());
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.inner.remove(key)
    }

    fn list_keys(&self) -> Result<Vec<String>> {
        self.inner.list_keys()
    }
}
