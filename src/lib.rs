//! ipwatchdog: public IP change monitor
//!
//! A library for periodically resolving the host's public IP address,
//! detecting changes, and notifying by email and/or an HTTP callback.

pub mod config;
pub mod monitor;
pub mod network;
pub mod notify;
pub mod schedule;
pub mod time;
pub mod watchdog;

#[cfg(test)]
mod test_fixtures;
