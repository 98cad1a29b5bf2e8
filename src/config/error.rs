//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

use crate::schedule::ScheduleError;

use super::credentials::CredentialsError;

/// Error type for configuration operations.
///
/// Every variant is fatal: it is reported once at startup and the
/// scheduler never starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The credential store could not be read or written.
    #[error(transparent)]
    Credentials(#[from] CredentialsError),

    /// A field required by an enabled feature is missing or empty.
    #[error("Missing required field: {field}. {hint}")]
    MissingRequired {
        /// Name of the missing field
        field: &'static str,
        /// Hint for how to provide the value
        hint: &'static str,
    },

    /// Neither email alerts nor the callback are enabled.
    #[error("Nothing to notify: enable email alerts (email.sender/email.recipient) or set callback.url")]
    NoNotifier,

    /// Invalid URL provided.
    #[error("Invalid URL for {field} '{url}': {reason}")]
    InvalidUrl {
        /// Name of the field
        field: &'static str,
        /// The invalid URL string
        url: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Invalid schedule expression.
    #[error("Invalid schedule: {0}")]
    InvalidSchedule(#[from] ScheduleError),

    /// Invalid enumerated value in the config file.
    #[error("Invalid value '{value}' for {field}: expected {expected}")]
    InvalidValue {
        /// Name of the field
        field: &'static str,
        /// The invalid value provided
        value: String,
        /// Accepted values
        expected: &'static str,
    },

    /// Invalid callback authorization header value.
    #[error("Invalid callback auth header: {reason}")]
    InvalidAuthHeader {
        /// Reason for invalidity
        reason: String,
    },

    /// Invalid email body template (Handlebars syntax error).
    #[error("Invalid email body template: {reason}")]
    InvalidTemplate {
        /// Reason for invalidity
        reason: String,
    },
}

/// Well-known field names for `MissingRequired` errors.
///
/// Use these constants for compile-time safety when matching field names.
pub mod field {
    /// The email sender address.
    pub const EMAIL_SENDER: &str = "email.sender";
    /// The email recipient address.
    pub const EMAIL_RECIPIENT: &str = "email.recipient";
    /// The mail relay password.
    pub const EMAIL_PASSWORD: &str = "email.password";
    /// The check-IP endpoint.
    pub const CHECKIP_URL: &str = "check.url";
    /// The callback endpoint.
    pub const CALLBACK_URL: &str = "callback.url";
    /// The callback policy.
    pub const CALLBACK_POLICY: &str = "callback.policy";
    /// The overlap policy.
    pub const OVERLAP: &str = "check.overlap";
}

impl ConfigError {
    /// Creates a `MissingRequired` error for a required field.
    #[must_use]
    pub const fn missing(field: &'static str, hint: &'static str) -> Self {
        Self::MissingRequired { field, hint }
    }
}
