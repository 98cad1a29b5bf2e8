//! Mail transport trait and SMTP implementation using lettre.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::{Credentials, Mechanism};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::MailError;

/// A plain-text email ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    /// Sender address
    pub from: String,
    /// Single recipient address
    pub to: String,
    /// Subject line
    pub subject: String,
    /// Plain-text body
    pub body: String,
}

/// Trait for submitting email to a mail relay.
///
/// Separates message composition ([`super::EmailNotifier`]) from delivery so
/// that the notifier can be tested without an SMTP server.
pub trait MailTransport: Send + Sync {
    /// Submits `message` to the relay.
    ///
    /// # Errors
    ///
    /// Returns [`MailError`] if an address is invalid, authentication fails,
    /// or the relay cannot be reached.
    fn send(
        &self,
        message: MailMessage,
    ) -> impl std::future::Future<Output = Result<(), MailError>> + Send;
}

/// SMTP submission with PLAIN authentication over STARTTLS.
#[derive(Clone)]
pub struct LettreMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl std::fmt::Debug for LettreMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LettreMailer").finish_non_exhaustive()
    }
}

impl LettreMailer {
    /// Creates a mailer for `host:port` authenticating as `username`.
    ///
    /// # Errors
    ///
    /// Returns [`MailError::Send`] if the TLS parameters for `host` cannot be built.
    pub fn new(host: &str, port: u16, username: &str, password: &str) -> Result<Self, MailError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .map_err(|e| MailError::Send(Box::new(e)))?
            .port(port)
            .credentials(Credentials::new(username.to_string(), password.to_string()))
            .authentication(vec![Mechanism::Plain])
            .build();

        Ok(Self { transport })
    }
}

impl MailTransport for LettreMailer {
    async fn send(&self, message: MailMessage) -> Result<(), MailError> {
        let email = Message::builder()
            .from(parse_mailbox(&message.from)?)
            .to(parse_mailbox(&message.to)?)
            .subject(message.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(message.body)
            .map_err(|e| MailError::Build(e.to_string()))?;

        self.transport.send(email).await.map_err(|e| {
            if is_auth_failure(&e) {
                MailError::Auth(Box::new(e))
            } else {
                MailError::Send(Box::new(e))
            }
        })?;

        Ok(())
    }
}

fn parse_mailbox(address: &str) -> Result<lettre::message::Mailbox, MailError> {
    address.parse().map_err(|e: lettre::address::AddressError| MailError::InvalidAddress {
        address: address.to_string(),
        reason: e.to_string(),
    })
}

/// SMTP replies 530, 534 and 535 all report rejected or missing credentials.
fn is_auth_failure(error: &lettre::transport::smtp::Error) -> bool {
    error
        .status()
        .is_some_and(|code| matches!(code.to_string().as_str(), "530" | "534" | "535"))
}
