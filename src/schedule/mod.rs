//! Scheduling layer.
//!
//! This module provides:
//! - Schedule expressions ([`Schedule`], [`ScheduleError`])
//! - A stream of schedule firings ([`TickStream`])
//! - The scheduler running the watchdog on every firing ([`Scheduler`], [`OverlapPolicy`])

mod expr;
mod scheduler;
mod stream;

pub use expr::{MAX_INTERVAL, MIN_INTERVAL, Schedule, ScheduleError};
pub use scheduler::{OverlapPolicy, Scheduler, SchedulerError};
pub use stream::TickStream;
