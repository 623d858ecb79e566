//! Time-related utilities with clock abstraction for testability.
//!
//! Message timestamps travel as RFC 3339 strings produced by clients. The
//! server never re-derives them; these helpers are only used to stamp new
//! messages and to render them for display.

use std::fmt;

use chrono::{DateTime, Local, SecondsFormat, TimeZone, Utc};

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Current instant in UTC
    fn now(&self) -> DateTime<Utc>;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: DateTime<Utc>,
}

impl FixedClock {
    /// Create a new fixed clock with the given instant
    pub fn new(fixed_time: DateTime<Utc>) -> Self {
        Self { fixed_time }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.fixed_time
    }
}

/// Format an instant as an RFC 3339 string with millisecond precision
pub fn to_rfc3339(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current UTC time as an RFC 3339 string (e.g. `2024-01-01T00:00:00.000Z`)
pub fn now_rfc3339() -> String {
    to_rfc3339(SystemClock.now())
}

/// Render an RFC 3339 timestamp as `HH:MM:SS` in the given timezone.
///
/// Returns `None` when the timestamp cannot be parsed; client-supplied
/// timestamps are not guaranteed to be well-formed.
pub fn clock_time_in<Tz>(timestamp: &str, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    DateTime::parse_from_rfc3339(timestamp)
        .ok()
        .map(|dt| dt.with_timezone(tz).format("%H:%M:%S").to_string())
}

/// Render an RFC 3339 timestamp as `HH:MM:SS` in the local timezone.
pub fn clock_time_local(timestamp: &str) -> Option<String> {
    clock_time_in(timestamp, &Local)
}
