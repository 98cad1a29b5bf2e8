//! IP change detection types.

use std::fmt;

/// A change of the public IP address between two consecutive ticks.
///
/// Only constructed when a previous observation exists and differs
/// from the current one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpChange {
    /// The last-known IP before this tick.
    pub previous: String,
    /// The IP observed on this tick.
    pub current: String,
}

impl IpChange {
    /// Creates a new change event.
    #[must_use]
    pub fn new(previous: impl Into<String>, current: impl Into<String>) -> Self {
        Self {
            previous: previous.into(),
            current: current.into(),
        }
    }
}

impl fmt::Display for IpChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.previous, self.current)
    }
}

/// Classification of a single observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No prior observation existed. Never triggers a change notification.
    FirstRun,
    /// The observed IP equals the last-known IP.
    Unchanged,
    /// The observed IP differs from the last-known IP.
    Changed(IpChange),
}

impl Outcome {
    /// Returns the change event if the IP changed.
    #[must_use]
    pub const fn change(&self) -> Option<&IpChange> {
        match self {
            Self::Changed(change) => Some(change),
            Self::FirstRun | Self::Unchanged => None,
        }
    }

    /// Returns true if the IP changed.
    #[must_use]
    pub const fn is_changed(&self) -> bool {
        matches!(self, Self::Changed(_))
    }
}

/// Result of observing an IP on one tick.
///
/// Besides the [`Outcome`], it carries the last-known value as it was
/// before this tick (empty on first run) and the current value, which is
/// what heartbeat notifications are sent with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    /// How the observation compares to the previous one.
    pub outcome: Outcome,
    /// Last-known IP before this tick; empty if there was none.
    pub previous: String,
    /// IP observed on this tick.
    pub current: String,
}

impl Observation {
    /// Classifies `current` against `previous`.
    #[must_use]
    pub fn classify(previous: impl Into<String>, current: impl Into<String>) -> Self {
        let previous = previous.into();
        let current = current.into();

        let outcome = if previous.is_empty() {
            Outcome::FirstRun
        } else if previous == current {
            Outcome::Unchanged
        } else {
            Outcome::Changed(IpChange::new(previous.clone(), current.clone()))
        };

        Self {
            outcome,
            previous,
            current,
        }
    }
}

#[cfg(test)]
#[path = "change_tests.rs"]
mod tests;
