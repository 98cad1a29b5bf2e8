//! The notifier capability shared by all sinks.

use super::NotifyError;

/// A sink that is told about the public IP.
///
/// Implementations perform a single delivery attempt; failures are
/// returned to the caller, which logs them without retrying.
pub trait Notifier: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Delivers a notification for `previous` → `current`.
    ///
    /// `previous` is empty for heartbeat invocations made before any
    /// IP has been observed.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError`] if delivery fails.
    fn notify(
        &self,
        previous: &str,
        current: &str,
    ) -> impl std::future::Future<Output = Result<(), NotifyError>> + Send;
}
