//! Schedule expressions.
//!
//! Accepted forms:
//! - `@every <duration>` with Go-style durations: `@every 30m`, `@every 1h30m`, `@every 90s`
//! - `every <n> <unit>`: `every 30 minutes`, `every hour`, `every 2 days`
//! - Descriptors: `@hourly`, `@daily`/`@midnight`, `@weekly`, `@monthly`, `@yearly`/`@annually`
//! - Cron expressions with seconds (6 or 7 fields) or without (5 fields, seconds = 0)

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use std::time::Duration;

use chrono::{DateTime, Utc};
use regex::Regex;
use thiserror::Error;

/// One Go-style duration component, e.g. `1h`, `30m`, `1.5s`.
static DURATION_PART: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)(ns|us|µs|ms|s|m|h)").expect("duration regex is valid")
});

/// Human interval form, e.g. `every 30 minutes`.
static HUMAN_INTERVAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^every\s+(?:(\d+)\s*)?(seconds?|secs?|minutes?|mins?|hours?|hrs?|days?)$",
    )
    .expect("interval regex is valid")
});

/// Shortest interval between ticks. Shorter intervals are rounded up to it.
pub const MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Longest accepted interval.
pub const MAX_INTERVAL: Duration = Duration::from_nanos(u64::MAX);

/// Error type for schedule expression parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    /// The expression is empty.
    #[error("Schedule expression is empty")]
    Empty,

    /// The `@every` duration could not be parsed.
    #[error("Invalid duration '{value}': {reason}")]
    InvalidDuration {
        /// The duration text
        value: String,
        /// Reason for invalidity
        reason: String,
    },

    /// The interval evaluates to zero.
    #[error("Schedule interval must be greater than 0")]
    ZeroInterval,

    /// The cron expression could not be parsed.
    #[error("Invalid cron expression '{expression}': {reason}")]
    InvalidCron {
        /// The expression passed to the cron parser
        expression: String,
        /// Reason for invalidity
        reason: String,
    },
}

#[derive(Debug, Clone)]
enum Kind {
    Every(Duration),
    Cron(Box<cron::Schedule>),
}

/// A parsed schedule: either a fixed interval or a cron calendar.
#[derive(Debug, Clone)]
pub struct Schedule {
    expression: String,
    kind: Kind,
}

impl Schedule {
    /// Creates a fixed-interval schedule.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::ZeroInterval`] if `interval` is zero and
    /// [`ScheduleError::InvalidDuration`] if it exceeds [`MAX_INTERVAL`].
    /// Intervals below [`MIN_INTERVAL`] are rounded up to it.
    pub fn every(interval: Duration) -> Result<Self, ScheduleError> {
        let interval = checked_interval(&format!("{interval:?}"), interval)?;
        Ok(Self {
            expression: format!("@every {}s", interval.as_secs_f64()),
            kind: Kind::Every(interval),
        })
    }

    /// Returns the expression this schedule was parsed from.
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Returns the interval for fixed-interval schedules.
    #[must_use]
    pub const fn interval(&self) -> Option<Duration> {
        match self.kind {
            Kind::Every(interval) => Some(interval),
            Kind::Cron(_) => None,
        }
    }

    /// Returns how long to wait after `now` until the next firing.
    ///
    /// Returns `None` if a cron calendar has no future firing.
    #[must_use]
    pub fn delay_after(&self, now: DateTime<Utc>) -> Option<Duration> {
        match &self.kind {
            Kind::Every(interval) => Some(*interval),
            Kind::Cron(schedule) => {
                let next = schedule.after(&now).next()?;
                Some((next - now).to_std().unwrap_or_default())
            }
        }
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}

impl FromStr for Schedule {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ScheduleError::Empty);
        }

        let kind = if let Some(rest) = trimmed.strip_prefix("@every") {
            let rest = rest.trim();
            Kind::Every(checked_interval(rest, parse_go_duration(rest)?)?)
        } else if let Some(interval) = parse_human_interval(trimmed) {
            Kind::Every(checked_interval(trimmed, interval)?)
        } else {
            Kind::Cron(Box::new(parse_cron(trimmed)?))
        };

        Ok(Self {
            expression: trimmed.to_string(),
            kind,
        })
    }
}

/// Rejects zero and oversized intervals and rounds sub-second ones up.
fn checked_interval(value: &str, interval: Duration) -> Result<Duration, ScheduleError> {
    if interval.is_zero() {
        return Err(ScheduleError::ZeroInterval);
    }
    if interval > MAX_INTERVAL {
        return Err(ScheduleError::InvalidDuration {
            value: value.to_string(),
            reason: "duration too large".to_string(),
        });
    }
    if interval < MIN_INTERVAL {
        tracing::warn!("Interval '{value}' is below 1s, rounding up to 1s");
        return Ok(MIN_INTERVAL);
    }
    Ok(interval)
}

/// Parses a Go-style duration such as `1h30m` or `45s`.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn parse_go_duration(value: &str) -> Result<Duration, ScheduleError> {
    let invalid = |reason: &str| ScheduleError::InvalidDuration {
        value: value.to_string(),
        reason: reason.to_string(),
    };

    if value.is_empty() {
        return Err(invalid("missing duration"));
    }

    let mut consumed = 0;
    let mut nanos = 0.0_f64;

    for caps in DURATION_PART.captures_iter(value) {
        let whole = caps.get(0).ok_or_else(|| invalid("malformed component"))?;
        if whole.start() != consumed {
            return Err(invalid("unexpected characters"));
        }
        consumed = whole.end();

        let amount: f64 = caps[1].parse().map_err(|_| invalid("bad number"))?;
        let unit_nanos = match &caps[2] {
            "ns" => 1.0,
            "us" | "µs" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 6e10,
            _ => 3.6e12,
        };
        nanos += amount * unit_nanos;
    }

    if consumed != value.len() {
        return Err(invalid("expected components like 1h, 30m or 45s"));
    }

    if !nanos.is_finite() || nanos >= u64::MAX as f64 {
        return Err(invalid("duration too large"));
    }

    Ok(Duration::from_nanos(nanos.round() as u64))
}

/// Parses `every [n] <unit>`; returns `None` if the text is not in that form.
fn parse_human_interval(value: &str) -> Option<Duration> {
    let caps = HUMAN_INTERVAL.captures(value)?;
    let count: u64 = caps.get(1).map_or(Some(1), |m| m.as_str().parse().ok())?;

    let unit = caps[2].to_lowercase();
    let unit_secs = if unit.starts_with('s') {
        1
    } else if unit.starts_with('m') {
        60
    } else if unit.starts_with('h') {
        3600
    } else {
        86_400
    };

    // Saturates so an oversized count is reported as too large, not as bad cron
    Some(Duration::from_secs(count.saturating_mul(unit_secs)))
}

fn parse_cron(value: &str) -> Result<cron::Schedule, ScheduleError> {
    let expression = match value.to_lowercase().as_str() {
        "@hourly" => "0 0 * * * *".to_string(),
        "@daily" | "@midnight" => "0 0 0 * * *".to_string(),
        "@weekly" => "0 0 0 * * Sun".to_string(),
        "@monthly" => "0 0 0 1 * *".to_string(),
        "@yearly" | "@annually" => "0 0 0 1 1 *".to_string(),
        _ if value.split_whitespace().count() == 5 => format!("0 {value}"),
        _ => value.to_string(),
    };

    cron::Schedule::from_str(&expression).map_err(|e| ScheduleError::InvalidCron {
        expression,
        reason: e.to_string(),
    })
}

#[cfg(test)]
#[path = "expr_tests.rs"]
mod tests;
