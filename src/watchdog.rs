//! The resolve → detect → notify pipeline executed on every tick.

use crate::monitor::{ChangeDetector, Observation, Outcome};
use crate::network::{IpResolver, ResolveError};
use crate::notify::{DispatchReport, Notifier, NotifierSet};

/// What one successful tick observed and dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    /// The observation made on this tick
    pub observation: Observation,
    /// The notifiers invoked for it
    pub dispatch: DispatchReport,
}

/// Owns the resolver, the change detector and the notifier set.
///
/// Constructed once at startup and shared by every tick. The only mutable
/// state is the detector's last-known IP.
///
/// # Type Parameters
///
/// - `R`: The [`IpResolver`] implementation
/// - `E`: The email notifier
/// - `C`: The callback notifier
#[derive(Debug)]
pub struct Watchdog<R, E, C> {
    resolver: R,
    detector: ChangeDetector,
    notifiers: NotifierSet<E, C>,
}

impl<R, E, C> Watchdog<R, E, C> {
    /// Creates a watchdog with no prior observation.
    #[must_use]
    pub fn new(resolver: R, notifiers: NotifierSet<E, C>) -> Self {
        Self {
            resolver,
            detector: ChangeDetector::new(),
            notifiers,
        }
    }

    /// Returns the resolver.
    #[must_use]
    pub const fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Returns the change detector.
    #[must_use]
    pub const fn detector(&self) -> &ChangeDetector {
        &self.detector
    }

    /// Returns the notifier set.
    #[must_use]
    pub const fn notifiers(&self) -> &NotifierSet<E, C> {
        &self.notifiers
    }
}

impl<R: IpResolver, E: Notifier, C: Notifier> Watchdog<R, E, C> {
    /// Runs the pipeline once.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] if the current IP cannot be determined. In that
    /// case the last-known IP is left untouched and no notifier is invoked.
    pub async fn tick(&self) -> Result<TickReport, ResolveError> {
        let current = self.resolver.resolve().await?;
        tracing::info!("Current IP: {current}");

        let observation = self.detector.observe(&current);
        match &observation.outcome {
            Outcome::FirstRun => tracing::debug!("First observation, nothing to compare against"),
            Outcome::Unchanged => tracing::debug!("IP unchanged"),
            Outcome::Changed(change) => tracing::debug!("IP changed: {change}"),
        }

        let dispatch = self.notifiers.dispatch(&observation).await;

        Ok(TickReport {
            observation,
            dispatch,
        })
    }

    /// Runs the pipeline once and logs instead of returning errors.
    ///
    /// `seq` identifies the tick in logs; 0 is the startup tick.
    pub async fn run_tick(&self, seq: u64) -> Option<TickReport> {
        match self.tick().await {
            Ok(report) => {
                if report.dispatch.failures > 0 {
                    tracing::warn!(
                        "Tick {seq}: {} of {} notification(s) failed",
                        report.dispatch.failures,
                        report.dispatch.invoked.len()
                    );
                }
                Some(report)
            }
            Err(e) => {
                tracing::error!("Tick {seq}: failed to resolve current IP: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "watchdog_tests.rs"]
mod tests;
