//! Email notifier.

use handlebars::Handlebars;
use serde::Serialize;

use super::{MailMessage, MailTransport, Notifier, NotifyError};

/// Subject line of every alert email.
pub const SUBJECT: &str = "IP address changed";

/// Mail relay and addressing settings for email alerts.
#[derive(Clone, PartialEq, Eq)]
pub struct EmailSettings {
    /// Sender address (also the login when `username` is unset)
    pub sender: String,
    /// The single recipient
    pub recipient: String,
    /// Mail relay hostname
    pub host: String,
    /// Mail relay port
    pub port: u16,
    /// Login for the relay, if different from the sender
    pub username: Option<String>,
    /// Password for the relay
    pub password: String,
    /// Handlebars template for the body; `{{previous}}` and `{{current}}` are available
    pub body_template: Option<String>,
}

impl EmailSettings {
    /// Returns the relay login, defaulting to the sender address.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or(&self.sender)
    }
}

impl std::fmt::Debug for EmailSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailSettings")
            .field("sender", &self.sender)
            .field("recipient", &self.recipient)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("body_template", &self.body_template)
            .finish()
    }
}

#[derive(Serialize)]
struct TemplateData<'a> {
    previous: &'a str,
    current: &'a str,
}

/// Sends a plain-text alert email stating the previous and new IP.
///
/// # Type Parameters
///
/// - `M`: The [`MailTransport`] used for submission
#[derive(Debug)]
pub struct EmailNotifier<M> {
    transport: M,
    sender: String,
    recipient: String,
    body_template: Option<String>,
}

impl<M> EmailNotifier<M> {
    /// Creates a notifier sending from `sender` to `recipient` through `transport`.
    #[must_use]
    pub fn new(transport: M, sender: impl Into<String>, recipient: impl Into<String>) -> Self {
        Self {
            transport,
            sender: sender.into(),
            recipient: recipient.into(),
            body_template: None,
        }
    }

    /// Sets the body template (Handlebars syntax).
    #[must_use]
    pub fn with_body_template(mut self, template: impl Into<String>) -> Self {
        self.body_template = Some(template.into());
        self
    }

    /// Returns the configured recipient.
    #[must_use]
    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    /// Renders the message body for a transition from `previous` to `current`.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Template`] if the configured template fails to render.
    pub fn render_body(&self, previous: &str, current: &str) -> Result<String, NotifyError> {
        let Some(template) = &self.body_template else {
            return Ok(format!(
                "IP has changed! New IP is {current} while previous IP was {previous}"
            ));
        };

        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars
            .render_template(template, &TemplateData { previous, current })
            .map_err(|e| NotifyError::Template(e.to_string()))
    }
}

impl<M: MailTransport> Notifier for EmailNotifier<M> {
    fn name(&self) -> &'static str {
        "email"
    }

    async fn notify(&self, previous: &str, current: &str) -> Result<(), NotifyError> {
        let message = MailMessage {
            from: self.sender.clone(),
            to: self.recipient.clone(),
            subject: SUBJECT.to_string(),
            body: self.render_body(previous, current)?,
        };

        tracing::info!("Sending mail to: {}", self.recipient);
        self.transport.send(message).await?;
        tracing::debug!("Mail delivered to {}", self.recipient);
        Ok(())
    }
}
