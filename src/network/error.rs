//! Error types for HTTP operations and IP resolution.

use thiserror::Error;

/// Error type for HTTP operations.
///
/// Describes what went wrong without dictating recovery strategy.
/// Nothing in this crate retries; callers log and move on.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    ///
    /// Only reported when the underlying client applies its own timeout.
    #[error("Request timed out")]
    Timeout,

    /// The provided URL is invalid.
    ///
    /// This typically indicates a configuration error rather than
    /// a transient failure.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Error type for public IP resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The request to the check-IP endpoint could not be completed.
    #[error("Check-IP request failed: {0}")]
    Http(#[from] HttpError),

    /// The check-IP endpoint answered with a non-2xx status.
    #[error("Check-IP endpoint returned {status}")]
    Status {
        /// HTTP status code returned
        status: http::StatusCode,
        /// Response body, if valid UTF-8
        body: Option<String>,
    },

    /// The response body was not valid UTF-8.
    #[error("Check-IP response body is not valid UTF-8")]
    InvalidBody,
}
