//! Application execution logic.
//!
//! This module wires the validated configuration into a [`Watchdog`] and runs
//! its [`Scheduler`] until a shutdown signal arrives.

use thiserror::Error;
use tokio::signal;

use ipwatchdog::config::{CredentialsError, ValidatedConfig};
use ipwatchdog::network::{HttpResolver, ReqwestClient};
use ipwatchdog::notify::{
    CallbackNotifier, CallbackSettings, EmailNotifier, EmailSettings, LettreMailer, MailError,
    NotifierSet,
};
use ipwatchdog::schedule::{Scheduler, SchedulerError};
use ipwatchdog::watchdog::Watchdog;

/// Notifier set used by the application.
type AppNotifiers = NotifierSet<EmailNotifier<LettreMailer>, CallbackNotifier<ReqwestClient>>;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to build the SMTP transport.
    #[error("Failed to set up mail transport: {0}")]
    Mailer(#[source] MailError),

    /// `--save-credentials` was given but the store could not be written.
    #[error("Failed to save credentials: {0}")]
    Credentials(#[source] CredentialsError),

    /// `--save-credentials` was given but no store location is known.
    #[error("No credentials file location; use --credentials-file")]
    NoCredentialsPath,

    /// The scheduler stopped on its own.
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
}

/// Executes the main application loop.
///
/// This function:
/// 1. Persists the resolved secrets if `--save-credentials` was given
/// 2. Creates the check-IP resolver and the enabled notifiers
/// 3. Runs the scheduler (startup check, then every firing) until shutdown
///
/// # Errors
///
/// Returns an error if:
/// - The credential store cannot be written
/// - The mail transport cannot be built
/// - A cron schedule has no upcoming firing
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    if config.save_credentials {
        save_credentials(&config)?;
    }

    let client = ReqwestClient::new();
    let resolver = HttpResolver::new(client.clone(), config.checkip_url.clone());
    let notifiers = build_notifiers(&config, &client)?;
    let watchdog = Watchdog::new(resolver, notifiers);

    let scheduler = Scheduler::new(watchdog, config.schedule).with_overlap(config.overlap);

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    tokio::select! {
        biased;

        () = &mut shutdown => {
            tracing::info!("Shutdown signal received, stopping...");
            Ok(())
        }

        result = scheduler.run() => result.map_err(RunError::from),
    }
}

/// Writes the resolved secrets to the credential store.
fn save_credentials(config: &ValidatedConfig) -> Result<(), RunError> {
    let path = config
        .credentials_file
        .as_deref()
        .ok_or(RunError::NoCredentialsPath)?;

    config
        .credentials()
        .save(path)
        .map_err(RunError::Credentials)?;

    tracing::info!("Credentials saved to {}", path.display());
    Ok(())
}

/// Creates the notifiers enabled by the configuration.
fn build_notifiers(
    config: &ValidatedConfig,
    client: &ReqwestClient,
) -> Result<AppNotifiers, RunError> {
    let mut notifiers = NotifierSet::new();

    if let Some(ref settings) = config.email {
        notifiers = notifiers.with_email(create_email(settings)?);
        tracing::info!(
            "Email alerts enabled: {} -> {}",
            settings.sender,
            settings.recipient
        );
    }

    if let Some(ref settings) = config.callback {
        let callback = create_callback(settings, client.clone());
        notifiers = notifiers.with_callback(callback, settings.policy);
        tracing::info!("Callback enabled ({})", settings.policy);
    }

    Ok(notifiers)
}

/// Creates the email notifier from its settings.
fn create_email(settings: &EmailSettings) -> Result<EmailNotifier<LettreMailer>, RunError> {
    let mailer = LettreMailer::new(
        &settings.host,
        settings.port,
        settings.username(),
        &settings.password,
    )
    .map_err(RunError::Mailer)?;

    let mut email = EmailNotifier::new(mailer, &settings.sender, &settings.recipient);
    if let Some(ref template) = settings.body_template {
        email = email.with_body_template(template);
    }

    Ok(email)
}

/// Creates the callback notifier from its settings.
fn create_callback<H>(settings: &CallbackSettings, client: H) -> CallbackNotifier<H> {
    let mut callback = CallbackNotifier::new(client, settings.url.clone());

    if let Some(ref param) = settings.ip_param {
        callback = callback.with_ip_param(param);
    }
    if let Some(ref value) = settings.auth_header {
        callback = callback.with_auth_header(value.clone());
    }

    callback
}

/// Returns a future that completes when a shutdown signal is received.
///
/// If a handler cannot be installed, that signal is logged and ignored.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
