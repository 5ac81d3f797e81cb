//! Task ID generation.
//!
//! The default generator issues the current time in milliseconds since the
//! Unix epoch as a decimal string. Two tasks created within the same
//! millisecond would collide, so the generator never issues a value that
//! is not strictly greater than the previous one.

use crate::traits::{Clock, IdGenerator};
use std::cell::Cell;
use std::rc::Rc;

/// Millisecond-timestamp IDs, strictly increasing per generator.
pub struct MillisIdGenerator {
    clock: Rc<dyn Clock>,
    last: Cell<i64>,
}

impl MillisIdGenerator {
    /// Create a generator reading time from `clock`.
    #[must_use]
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self { clock, last: Cell::new(i64::MIN) }
    }
}

impl std::fmt::Debug for MillisIdGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MillisIdGenerator").field("last", &self.last.get()).finish_non_exhaustive()
    }
}

impl IdGenerator for MillisIdGenerator {
    fn next_id(&self) -> String {
        let now = self.clock.now().timestamp_millis();
        let id = if now > self.last.get() { now } else { self.last.get() + 1 };
        self.last.set(id);
        id.to_string()
    }
}

/// Deterministic IDs `task-1`, `task-2`, ... for tests and fixtures.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    counter: Cell<u64>,
}

impl SequentialIdGenerator {
    /// Create a generator starting at `task-1`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> String {
        let next = self.counter.get() + 1;
        self.counter.set(next);
        format!("task-{next}")
    }
}
