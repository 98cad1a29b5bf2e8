//! Notification layer for IP change alerts.
//!
//! This module provides:
//! - The notifier capability ([`Notifier`]) and its errors ([`NotifyError`], [`MailError`])
//! - Email alerts ([`EmailNotifier`]) over a mail transport ([`MailTransport`], [`LettreMailer`])
//! - HTTP callbacks ([`CallbackNotifier`]) with a heartbeat policy ([`CallbackPolicy`])
//! - Per-tick dispatch ([`NotifierSet`], [`DispatchReport`])

mod callback;
mod email;
mod error;
mod mailer;
mod notifier;
mod set;


pub use callback::{CallbackNotifier, CallbackPolicy, CallbackSettings};
pub use email::{EmailNotifier, EmailSettings, SUBJECT};
pub use error::{MailError, NotifyError};
pub use mailer::{LettreMailer, MailMessage, MailTransport};
pub use notifier::Notifier;
pub use set::{DispatchReport, NotifierSet};
