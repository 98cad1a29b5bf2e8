//! Monitor layer for detecting public IP changes.
//!
//! This module provides:
//! - Change events and observation outcomes ([`IpChange`], [`Outcome`], [`Observation`])
//! - The stateful detector holding the last-known IP ([`ChangeDetector`])

mod change;
mod detector;

pub use change::{IpChange, Observation, Outcome};
pub use detector::ChangeDetector;
