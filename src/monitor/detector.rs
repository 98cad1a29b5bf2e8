//! Stateful change detector holding the last-known IP.

use std::sync::Mutex;

use super::change::Observation;

/// Remembers the last observed public IP and classifies new observations.
///
/// The last-known value lives only in process memory and starts empty.
/// Each call to [`observe`](Self::observe) reads and replaces it under one
/// lock, so the value after a call is always the IP just observed.
#[derive(Debug, Default)]
pub struct ChangeDetector {
    last_known: Mutex<String>,
}

impl ChangeDetector {
    /// Creates a detector with no prior observation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifies `current` against the last-known IP, then stores it.
    pub fn observe(&self, current: &str) -> Observation {
        let mut last_known = self
            .last_known
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let previous = std::mem::replace(&mut *last_known, current.to_string());
        drop(last_known);

        Observation::classify(previous, current)
    }

    /// Returns the last-known IP, or an empty string before the first observation.
    #[must_use]
    pub fn last_known(&self) -> String {
        self.last_known
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}
