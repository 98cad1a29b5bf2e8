//! Time abstraction for testability.
//!
//! This module provides a [`Clock`] trait that allows injecting mock clocks
//! in tests while using the real system clock in production. Cron schedules
//! compute their next firing from it.

use std::time::SystemTime;

use chrono::{DateTime, Utc};

/// Abstraction over wall-clock time for testability.
///
/// # Example
///
/// ```
/// use ipwatchdog::time::{Clock, SystemClock};
///
/// let clock = SystemClock;
/// assert!(clock.now() >= std::time::SystemTime::UNIX_EPOCH);
/// ```
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> SystemTime;

    /// Returns the current time as a UTC calendar date.
    fn now_utc(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from(self.now())
    }
}

/// Production clock delegating to [`SystemTime::now()`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}
