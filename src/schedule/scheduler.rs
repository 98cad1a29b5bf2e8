//! Scheduler driving the watchdog pipeline.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;
use tokio_stream::StreamExt;

use super::{Schedule, TickStream};
use crate::network::IpResolver;
use crate::notify::Notifier;
use crate::time::{Clock, SystemClock};
use crate::watchdog::Watchdog;

/// What to do when a firing arrives while the previous tick is still running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlapPolicy {
    /// Skip the firing; at most one tick runs at a time.
    #[default]
    Skip,
    /// Start another tick anyway. Overlapping ticks race on the last-known IP.
    Allow,
}

impl std::fmt::Display for OverlapPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Skip => write!(f, "skip"),
            Self::Allow => write!(f, "allow"),
        }
    }
}

/// Error type for scheduler termination.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchedulerError {
    /// The schedule has no future firing.
    #[error("Schedule '{0}' has no upcoming firing")]
    Exhausted(String),
}

/// Runs the watchdog immediately and then on every schedule firing.
///
/// There is no stop operation: [`run`](Self::run) only returns if a cron
/// calendar runs out of firings. Ticks after the first are spawned as
/// independent tasks so a slow tick never delays the timer.
///
/// # Type Parameters
///
/// - `R`, `E`, `C`: see [`Watchdog`]
/// - `K`: The [`Clock`] used for cron calendars (defaults to [`SystemClock`])
pub struct Scheduler<R, E, C, K = SystemClock> {
    watchdog: Arc<Watchdog<R, E, C>>,
    schedule: Schedule,
    clock: K,
    overlap: OverlapPolicy,
}

impl<R, E, C> Scheduler<R, E, C, SystemClock> {
    /// Creates a scheduler using the system clock and [`OverlapPolicy::Skip`].
    #[must_use]
    pub fn new(watchdog: Watchdog<R, E, C>, schedule: Schedule) -> Self {
        Self::with_clock(watchdog, schedule, SystemClock)
    }
}

impl<R, E, C, K> Scheduler<R, E, C, K> {
    /// Creates a scheduler with a custom clock.
    #[must_use]
    pub fn with_clock(watchdog: Watchdog<R, E, C>, schedule: Schedule, clock: K) -> Self {
        Self {
            watchdog: Arc::new(watchdog),
            schedule,
            clock,
            overlap: OverlapPolicy::default(),
        }
    }

    /// Sets the overlap policy.
    #[must_use]
    pub const fn with_overlap(mut self, overlap: OverlapPolicy) -> Self {
        self.overlap = overlap;
        self
    }

    /// Returns a handle to the shared watchdog.
    #[must_use]
    pub fn watchdog(&self) -> Arc<Watchdog<R, E, C>> {
        Arc::clone(&self.watchdog)
    }

    /// Returns the schedule.
    #[must_use]
    pub const fn schedule(&self) -> &Schedule {
        &self.schedule
    }
}

impl<R, E, C, K> Scheduler<R, E, C, K>
where
    R: IpResolver + 'static,
    E: Notifier + 'static,
    C: Notifier + 'static,
    K: Clock + Unpin,
{
    /// Runs the startup tick, then ticks on every firing, forever.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::Exhausted`] if the schedule stops firing.
    pub async fn run(self) -> Result<(), SchedulerError> {
        self.watchdog.run_tick(0).await;

        let expression = self.schedule.expression().to_string();
        let mut ticks = TickStream::new(self.schedule, self.clock);
        let in_flight = Arc::new(Mutex::new(()));
        tracing::info!("IP watchdog scheduler started ({expression}, overlap: {})", self.overlap);

        while let Some(seq) = ticks.next().await {
            let watchdog = Arc::clone(&self.watchdog);

            match self.overlap {
                OverlapPolicy::Allow => {
                    tokio::spawn(async move {
                        watchdog.run_tick(seq).await;
                    });
                }
                OverlapPolicy::Skip => match Arc::clone(&in_flight).try_lock_owned() {
                    Ok(guard) => {
                        tokio::spawn(async move {
                            watchdog.run_tick(seq).await;
                            drop(guard);
                        });
                    }
                    Err(_) => {
                        tracing::warn!("Tick {seq} skipped: previous tick still running");
                    }
                },
            }
        }

        Err(SchedulerError::Exhausted(expression))
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
