//! Tick stream implementation.
//!
//! This module provides [`TickStream`], a stream that yields once per
//! scheduled firing.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::time::{Instant, Sleep, sleep_until};
use tokio_stream::Stream;

use super::Schedule;
use crate::time::Clock;

/// A stream of schedule firings.
///
/// Yields the firing number (starting at 1) each time the schedule fires.
/// Fixed intervals are measured from the previous deadline so they do not
/// drift; cron calendars are re-evaluated against the clock after every
/// firing. The stream ends only if a cron calendar has no future firing.
pub struct TickStream<C> {
    schedule: Schedule,
    clock: C,
    sleep: Option<Pin<Box<Sleep>>>,
    fired: u64,
}

impl<C: Clock> TickStream<C> {
    /// Creates a stream whose first firing is one schedule step from now.
    #[must_use]
    pub fn new(schedule: Schedule, clock: C) -> Self {
        let first = schedule
            .delay_after(clock.now_utc())
            .map(|delay| Box::pin(sleep_until(Instant::now() + delay)));

        Self {
            schedule,
            clock,
            sleep: first,
            fired: 0,
        }
    }

    /// Returns the number of firings yielded so far.
    #[must_use]
    pub const fn fired(&self) -> u64 {
        self.fired
    }

    fn next_deadline(&self, previous: Instant) -> Option<Instant> {
        if let Some(interval) = self.schedule.interval() {
            return Some(previous + interval);
        }
        let delay = self.schedule.delay_after(self.clock.now_utc())?;
        Some(Instant::now() + delay)
    }
}

impl<C: Clock + Unpin> Stream for TickStream<C> {
    type Item = u64;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let Some(sleep) = self.sleep.as_mut() else {
            return Poll::Ready(None);
        };

        if sleep.as_mut().poll(cx).is_pending() {
            return Poll::Pending;
        }

        let previous = sleep.deadline();
        match self.next_deadline(previous) {
            Some(deadline) => {
                if let Some(sleep) = self.sleep.as_mut() {
                    sleep.as_mut().reset(deadline);
                }
            }
            None => self.sleep = None,
        }

        self.fired += 1;
        Poll::Ready(Some(self.fired))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio_stream::StreamExt;

    use super::*;
    use crate::time::SystemClock;

    #[tokio::test(start_paused = true)]
    async fn yields_on_each_interval() {
        let schedule = Schedule::every(Duration::from_secs(30)).unwrap();
        let start = Instant::now();
        let mut stream = TickStream::new(schedule, SystemClock);

        assert_eq!(stream.next().await, Some(1));
        assert_eq!(start.elapsed(), Duration::from_secs(30));

        assert_eq!(stream.next().await, Some(2));
        assert_eq!(start.elapsed(), Duration::from_secs(60));
        assert_eq!(stream.fired(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn interval_does_not_drift_with_slow_consumer() {
        let schedule = Schedule::every(Duration::from_secs(10)).unwrap();
        let start = Instant::now();
        let mut stream = TickStream::new(schedule, SystemClock);

        stream.next().await;
        tokio::time::sleep(Duration::from_secs(4)).await;
        stream.next().await;

        assert_eq!(start.elapsed(), Duration::from_secs(20));
    }

    #[tokio::test(start_paused = true)]
    async fn longest_interval_arms_without_overflow() {
        let schedule = Schedule::every(crate::schedule::MAX_INTERVAL).unwrap();
        let mut stream = TickStream::new(schedule, SystemClock);

        let early = tokio::time::timeout(Duration::from_secs(3600), stream.next()).await;

        assert!(early.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn does_not_fire_immediately() {
        let schedule = Schedule::every(Duration::from_secs(60)).unwrap();
        let mut stream = TickStream::new(schedule, SystemClock);

        let early = tokio::time::timeout(Duration::from_secs(59), stream.next()).await;

        assert!(early.is_err());
    }
}
