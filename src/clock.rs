//! Wall-clock time and timestamp formatting.

use crate::traits::Clock;
use chrono::{DateTime, Duration, SecondsFormat, Utc};

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Create a new system clock.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Format an instant as RFC 3339 with millisecond precision, e.g.
/// `2024-01-01T00:00:00.000Z`.
#[must_use]
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a stored RFC 3339 timestamp.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.with_timezone(&Utc))
}

/// Timestamp for a mutation of a record last stamped `previous`.
///
/// Returns `now`, unless that would not be strictly later than `previous`,
/// in which case it returns `previous` plus one millisecond.
#[must_use]
pub fn next_timestamp(now: DateTime<Utc>, previous: &str) -> String {
    let stamp = match parse_timestamp(previous) {
        Some(prev) if now <= prev => prev + Duration::milliseconds(1),
        _ => now,
    };
    format_timestamp(stamp)
}
