//! Public IP resolution.

use super::{HttpClient, HttpRequest, ResolveError};

/// Trait for determining the caller's current public IP address.
///
/// # Design
///
/// - One call performs exactly one lookup; there is no retry
/// - The returned text is not validated as an IP address
/// - Enables dependency injection for testing with mock implementations
pub trait IpResolver: Send + Sync {
    /// Returns the current external IP as text.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] when the lookup cannot be completed or the
    /// endpoint does not answer with a 2xx status.
    fn resolve(&self) -> impl std::future::Future<Output = Result<String, ResolveError>> + Send;
}

/// Resolves the public IP by issuing a GET to a check-IP endpoint.
///
/// The endpoint is expected to reply with the bare address as plain text
/// (as `http://checkip.amazonaws.com` does). The whole body, minus trailing
/// whitespace, is taken as the IP.
#[derive(Debug)]
pub struct HttpResolver<H> {
    client: H,
    url: url::Url,
}

impl<H> HttpResolver<H> {
    /// Creates a resolver that queries `url` through `client`.
    #[must_use]
    pub const fn new(client: H, url: url::Url) -> Self {
        Self { client, url }
    }

    /// Returns the configured check-IP URL.
    #[must_use]
    pub const fn url(&self) -> &url::Url {
        &self.url
    }
}

impl<H: HttpClient> IpResolver for HttpResolver<H> {
    async fn resolve(&self) -> Result<String, ResolveError> {
        let response = self
            .client
            .request(HttpRequest::get(self.url.clone()))
            .await?;

        if !response.is_success() {
            return Err(ResolveError::Status {
                status: response.status,
                body: response.body_text().map(ToString::to_string),
            });
        }

        let body = response.body_text().ok_or(ResolveError::InvalidBody)?;
        Ok(body.trim_end().to_string())
    }
}
