//! Error types for notification delivery.

use thiserror::Error;

use crate::network::HttpError;

/// Error type for mail submission.
#[derive(Debug, Error)]
pub enum MailError {
    /// A sender or recipient address could not be parsed.
    #[error("Invalid email address '{address}': {reason}")]
    InvalidAddress {
        /// The address as configured
        address: String,
        /// Reason for invalidity
        reason: String,
    },

    /// The message could not be assembled.
    #[error("Failed to build email: {0}")]
    Build(String),

    /// The mail relay rejected the credentials.
    #[error("SMTP authentication failed: {0}")]
    Auth(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Connecting to the relay or submitting the message failed.
    #[error("SMTP send failed: {0}")]
    Send(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Error type for a single notifier invocation.
///
/// These never abort a tick; the notifier set logs them and moves on.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Email delivery failed.
    #[error("Email notification failed: {0}")]
    Email(#[from] MailError),

    /// The email body template could not be rendered.
    #[error("Failed to render email body: {0}")]
    Template(String),

    /// The callback request could not be completed.
    #[error("Callback request failed: {0}")]
    Callback(#[from] HttpError),

    /// The callback endpoint answered with a non-2xx status.
    #[error("Callback returned {status}: {}", .body.as_deref().unwrap_or("<non-utf8 body>"))]
    CallbackStatus {
        /// HTTP status code returned
        status: http::StatusCode,
        /// Response body, if valid UTF-8
        body: Option<String>,
    },
}
