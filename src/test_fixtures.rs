//! Shared test doubles for the resolver and notifiers.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::network::{HttpError, IpResolver, ResolveError};
use crate::notify::{Notifier, NotifyError};

/// Resolver that plays back a script of results.
///
/// Once the script is exhausted the last successful IP is repeated.
/// An optional delay simulates a slow check-IP endpoint.
pub struct ScriptedResolver {
    script: Mutex<VecDeque<Result<String, ()>>>,
    last: Mutex<String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl ScriptedResolver {
    /// Plays back `ips` in order.
    pub fn new(ips: &[&str]) -> Self {
        Self::from_script(ips.iter().map(|ip| Ok((*ip).to_string())).collect())
    }

    /// Plays back results where `None` is a network failure.
    pub fn with_failures(steps: &[Option<&str>]) -> Self {
        Self::from_script(
            steps
                .iter()
                .map(|step| step.map(ToString::to_string).ok_or(()))
                .collect(),
        )
    }

    fn from_script(script: VecDeque<Result<String, ()>>) -> Self {
        Self {
            script: Mutex::new(script),
            last: Mutex::new(String::new()),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Makes every resolve take `delay`.
    pub fn slow(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of resolve calls started so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl IpResolver for ScriptedResolver {
    async fn resolve(&self) -> Result<String, ResolveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let step = self.script.lock().unwrap().pop_front();
        match step {
            Some(Ok(ip)) => {
                (*self.last.lock().unwrap()).clone_from(&ip);
                Ok(ip)
            }
            Some(Err(())) => Err(ResolveError::Http(HttpError::Connection(
                "network unreachable".into(),
            ))),
            None => Ok(self.last.lock().unwrap().clone()),
        }
    }
}

/// Notifier that records every invocation.
pub struct RecordingNotifier {
    name: &'static str,
    calls: Mutex<Vec<(String, String)>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            calls: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing(name: &'static str) -> Self {
        Self {
            fail: true,
            ..Self::new(name)
        }
    }

    /// Recorded `(previous, current)` pairs.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn notify(&self, previous: &str, current: &str) -> Result<(), NotifyError> {
        self.calls
            .lock()
            .unwrap()
            .push((previous.to_string(), current.to_string()));
        if self.fail {
            return Err(NotifyError::Template("boom".to_string()));
        }
        Ok(())
    }
}

/// Shorthand for an expected `(previous, current)` pair.
pub fn pair(previous: &str, current: &str) -> (String, String) {
    (previous.to_string(), current.to_string())
}
