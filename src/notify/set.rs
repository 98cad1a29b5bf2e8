//! Per-tick dispatch policy across the configured notifiers.

use crate::monitor::Observation;

use super::{CallbackPolicy, Notifier};

/// What happened while dispatching one observation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    /// Names of the notifiers invoked, in invocation order.
    pub invoked: Vec<&'static str>,
    /// How many of those invocations failed.
    pub failures: usize,
}

impl DispatchReport {
    async fn run<N: Notifier>(&mut self, notifier: &N, previous: &str, current: &str) {
        let name = notifier.name();
        self.invoked.push(name);

        if let Err(e) = notifier.notify(previous, current).await {
            self.failures += 1;
            tracing::error!("{name} notification failed: {e}");
        }
    }
}

/// The email and callback notifiers plus the callback policy.
///
/// Either notifier may be absent. Email fires only when the IP changed.
/// The callback fires on a change under [`CallbackPolicy::OnChange`] and on
/// every tick under [`CallbackPolicy::EveryTick`], never twice per tick.
///
/// # Type Parameters
///
/// - `E`: The email notifier
/// - `C`: The callback notifier
#[derive(Debug)]
pub struct NotifierSet<E, C> {
    email: Option<E>,
    callback: Option<C>,
    callback_policy: CallbackPolicy,
}

impl<E, C> Default for NotifierSet<E, C> {
    fn default() -> Self {
        Self {
            email: None,
            callback: None,
            callback_policy: CallbackPolicy::default(),
        }
    }
}

impl<E, C> NotifierSet<E, C> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables the email notifier.
    #[must_use]
    pub fn with_email(mut self, email: E) -> Self {
        self.email = Some(email);
        self
    }

    /// Enables the callback notifier under `policy`.
    #[must_use]
    pub fn with_callback(mut self, callback: C, policy: CallbackPolicy) -> Self {
        self.callback = Some(callback);
        self.callback_policy = policy;
        self
    }

    /// Returns true if no notifier is enabled.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.email.is_none() && self.callback.is_none()
    }

    /// Returns the email notifier, if enabled.
    #[must_use]
    pub const fn email(&self) -> Option<&E> {
        self.email.as_ref()
    }

    /// Returns the callback notifier, if enabled.
    #[must_use]
    pub const fn callback(&self) -> Option<&C> {
        self.callback.as_ref()
    }

    /// Returns the callback policy.
    #[must_use]
    pub const fn callback_policy(&self) -> CallbackPolicy {
        self.callback_policy
    }
}

impl<E: Notifier, C: Notifier> NotifierSet<E, C> {
    /// Invokes the notifiers that the observation calls for.
    ///
    /// Failures are logged and counted in the report; they never stop the
    /// remaining notifiers from running.
    pub async fn dispatch(&self, observation: &Observation) -> DispatchReport {
        let mut report = DispatchReport::default();
        let change = observation.outcome.change();

        if let Some(change) = change {
            tracing::info!("IP has changed! Previous was: {}", change.previous);

            if let Some(email) = &self.email {
                report.run(email, &change.previous, &change.current).await;
            }
        }

        if let Some(callback) = &self.callback {
            let due = match self.callback_policy {
                CallbackPolicy::EveryTick => true,
                CallbackPolicy::OnChange => change.is_some(),
            };

            if due {
                report
                    .run(callback, &observation.previous, &observation.current)
                    .await;
            }
        }

        report
    }
}

#[cfg(test)]
#[path = "set_tests.rs"]
mod tests;
