//! HTTP callback notifier.

use http::HeaderValue;
use http::header::AUTHORIZATION;

use crate::network::{HttpClient, HttpRequest};

use super::{Notifier, NotifyError};

/// When the callback fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallbackPolicy {
    /// On every tick, whether or not the IP changed (heartbeat).
    #[default]
    EveryTick,
    /// Only on ticks where the IP changed.
    OnChange,
}

impl std::fmt::Display for CallbackPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EveryTick => write!(f, "every-tick"),
            Self::OnChange => write!(f, "on-change"),
        }
    }
}

/// Callback endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackSettings {
    /// Endpoint hit with a GET request
    pub url: url::Url,
    /// Query parameter name carrying the current IP; omitted when `None`
    pub ip_param: Option<String>,
    /// Static `Authorization` header value
    pub auth_header: Option<HeaderValue>,
    /// When the callback fires
    pub policy: CallbackPolicy,
}

/// Hits a configured URL with the current IP.
///
/// # Type Parameters
///
/// - `H`: The [`HttpClient`] implementation
#[derive(Debug)]
pub struct CallbackNotifier<H> {
    client: H,
    url: url::Url,
    ip_param: Option<String>,
    auth_header: Option<HeaderValue>,
}

impl<H> CallbackNotifier<H> {
    /// Creates a callback notifier for `url` with no IP parameter and no auth header.
    #[must_use]
    pub const fn new(client: H, url: url::Url) -> Self {
        Self {
            client,
            url,
            ip_param: None,
            auth_header: None,
        }
    }

    /// Sets the query parameter used to pass the current IP.
    #[must_use]
    pub fn with_ip_param(mut self, name: impl Into<String>) -> Self {
        self.ip_param = Some(name.into());
        self
    }

    /// Sets the `Authorization` header sent with every request.
    #[must_use]
    pub fn with_auth_header(mut self, value: HeaderValue) -> Self {
        self.auth_header = Some(value);
        self
    }

    /// Builds the request URL for `current`.
    #[must_use]
    pub fn build_url(&self, current: &str) -> url::Url {
        let mut url = self.url.clone();
        if let Some(param) = &self.ip_param {
            url.query_pairs_mut().append_pair(param, current);
        }
        url
    }
}

impl<H: HttpClient> Notifier for CallbackNotifier<H> {
    fn name(&self) -> &'static str {
        "callback"
    }

    async fn notify(&self, _previous: &str, current: &str) -> Result<(), NotifyError> {
        let url = self.build_url(current);
        tracing::info!("Invoking callback url: {url}");

        let mut request = HttpRequest::get(url);
        if let Some(value) = &self.auth_header {
            request = request.with_header(AUTHORIZATION, value.clone());
        }

        let response = self.client.request(request).await?;
        let body = response.body_text().map(ToString::to_string);

        if !response.is_success() {
            return Err(NotifyError::CallbackStatus {
                status: response.status,
                body,
            });
        }

        tracing::info!(
            "Server replied: {}",
            body.as_deref().unwrap_or("<non-utf8 body>")
        );
        Ok(())
    }
}
