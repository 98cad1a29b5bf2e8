//! Validated configuration after merging CLI, TOML and credential store sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};

use handlebars::Handlebars;
use http::HeaderValue;
use url::Url;

use crate::notify::{CallbackPolicy, CallbackSettings, EmailSettings};
use crate::schedule::{OverlapPolicy, Schedule};

use super::cli::Cli;
use super::credentials::{Credentials, expand_tilde};
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// At least one of `email` and `callback` is `Some`.
///
/// # Construction
///
/// Use [`ValidatedConfig::load`] to read the config file and credential
/// store named by the CLI, or [`ValidatedConfig::from_raw`] when the
/// sources are already in memory.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Endpoint returning the public IP
    pub checkip_url: Url,

    /// When to check
    pub schedule: Schedule,

    /// What to do with a firing while a check is still running
    pub overlap: OverlapPolicy,

    /// Email alert settings; `None` when email alerts are disabled
    pub email: Option<EmailSettings>,

    /// Callback settings; `None` when the callback is disabled
    pub callback: Option<CallbackSettings>,

    /// Location of the credential store, if one could be determined
    pub credentials_file: Option<PathBuf>,

    /// Contents of the credential store at startup
    pub stored_credentials: Option<Credentials>,

    /// Whether to persist the resolved secrets at startup
    pub save_credentials: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let email = self.email.as_ref().map_or_else(
            || "off".to_string(),
            |e| format!("{} -> {} via {}:{}", e.sender, e.recipient, e.host, e.port),
        );
        let callback = self.callback.as_ref().map_or_else(
            || "off".to_string(),
            |c| {
                let mut url = c.url.clone();
                url.set_query(None);
                format!("{url} ({})", c.policy)
            },
        );

        write!(
            f,
            "Config {{ checkip_url: {}, schedule: {}, overlap: {}, email: {email}, callback: {callback} }}",
            self.checkip_url, self.schedule, self.overlap,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from its raw sources.
    ///
    /// CLI arguments take precedence over TOML values, which take precedence
    /// over built-in defaults. Secrets missing from both are taken from
    /// `stored`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Email is enabled but sender, recipient or password is missing
    /// - A URL, address, schedule or enumerated value is invalid
    /// - The email body template does not compile
    /// - Neither email nor callback is enabled
    pub fn from_raw(
        cli: &Cli,
        toml: Option<&TomlConfig>,
        stored: Option<&Credentials>,
    ) -> Result<Self, ConfigError> {
        let checkip_url = parse_url(
            field::CHECKIP_URL,
            cli.checkip_url
                .as_deref()
                .or_else(|| toml.and_then(|t| t.check.url.as_deref()))
                .unwrap_or(defaults::CHECKIP_URL),
        )?;

        let schedule = cli
            .schedule
            .as_deref()
            .or_else(|| toml.and_then(|t| t.check.schedule.as_deref()))
            .unwrap_or(defaults::SCHEDULE)
            .parse::<Schedule>()?;

        let overlap = Self::resolve_overlap(cli, toml)?;
        let email = Self::resolve_email(cli, toml, stored)?;
        let callback = Self::resolve_callback(cli, toml, stored)?;

        if email.is_none() && callback.is_none() {
            return Err(ConfigError::NoNotifier);
        }

        Ok(Self {
            checkip_url,
            schedule,
            overlap,
            email,
            callback,
            credentials_file: Self::resolve_credentials_file(cli, toml),
            stored_credentials: stored.cloned(),
            save_credentials: cli.save_credentials,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI, optional config file and
    /// credential store.
    ///
    /// If `cli.config` is set, loads the TOML file from that path. A missing
    /// credential store is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The credential store exists but cannot be read
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        let stored = match Self::resolve_credentials_file(cli, toml.as_ref()) {
            Some(path) => Credentials::load(&path)?,
            None => None,
        };
        if stored.is_some() {
            tracing::debug!("Loaded credential store");
        }

        Self::from_raw(cli, toml.as_ref(), stored.as_ref())
    }

    /// Returns the secrets to persist, in credential store form.
    ///
    /// Secrets resolved for an enabled notifier win; the others keep their
    /// stored value.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        let stored = self.stored_credentials.clone().unwrap_or_default();

        let mail_password = self
            .email
            .as_ref()
            .map(|e| e.password.clone())
            .or(stored.mail_password);
        let callback_auth_header = self
            .callback
            .as_ref()
            .and_then(|c| c.auth_header.as_ref())
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
            .or(stored.callback_auth_header);

        Credentials {
            mail_password,
            callback_auth_header,
        }
    }

    fn resolve_overlap(cli: &Cli, toml: Option<&TomlConfig>) -> Result<OverlapPolicy, ConfigError> {
        if let Some(arg) = cli.overlap {
            return Ok(arg.into());
        }

        match toml.and_then(|t| t.check.overlap.as_deref()) {
            None => Ok(OverlapPolicy::default()),
            Some(value) => parse_overlap(value),
        }
    }

    fn resolve_email(
        cli: &Cli,
        toml: Option<&TomlConfig>,
        stored: Option<&Credentials>,
    ) -> Result<Option<EmailSettings>, ConfigError> {
        let section = toml.map(|t| &t.email);
        let sender = pick(
            cli.email_sender.as_deref(),
            section.and_then(|s| s.sender.as_deref()),
        );
        let recipient = pick(
            cli.email_recipient.as_deref(),
            section.and_then(|s| s.recipient.as_deref()),
        );
        let username = pick(
            cli.email_username.as_deref(),
            section.and_then(|s| s.username.as_deref()),
        );
        let explicit_password = pick(
            cli.email_password.as_deref(),
            section.and_then(|s| s.password.as_deref()),
        );

        let enabled = sender.is_some()
            || recipient.is_some()
            || username.is_some()
            || explicit_password.is_some();
        if !enabled {
            return Ok(None);
        }

        let sender = sender.ok_or_else(|| {
            ConfigError::missing(
                field::EMAIL_SENDER,
                "Use --email-sender or set email.sender in config file",
            )
        })?;
        let recipient = recipient.ok_or_else(|| {
            ConfigError::missing(
                field::EMAIL_RECIPIENT,
                "Use --email-recipient or set email.recipient in config file",
            )
        })?;
        validate_address(field::EMAIL_SENDER, sender)?;
        validate_address(field::EMAIL_RECIPIENT, recipient)?;

        let password = explicit_password
            .or_else(|| non_empty(stored.and_then(|c| c.mail_password.as_deref())))
            .ok_or_else(|| {
                ConfigError::missing(
                    field::EMAIL_PASSWORD,
                    "Use --email-password, IPWATCHDOG_EMAIL_PASSWORD or the credentials file",
                )
            })?;

        let host = pick(
            cli.email_host.as_deref(),
            section.and_then(|s| s.host.as_deref()),
        )
        .unwrap_or(defaults::EMAIL_HOST);
        let port = cli
            .email_port
            .or_else(|| section.and_then(|s| s.port))
            .unwrap_or(defaults::EMAIL_PORT);

        let body_template = cli
            .email_body_template
            .clone()
            .or_else(|| section.and_then(|s| s.body_template.clone()));
        if let Some(ref template) = body_template {
            validate_template(template)?;
        }

        Ok(Some(EmailSettings {
            sender: sender.to_string(),
            recipient: recipient.to_string(),
            host: host.to_string(),
            port,
            username: username.map(ToString::to_string),
            password: password.to_string(),
            body_template,
        }))
    }

    fn resolve_callback(
        cli: &Cli,
        toml: Option<&TomlConfig>,
        stored: Option<&Credentials>,
    ) -> Result<Option<CallbackSettings>, ConfigError> {
        let section = toml.map(|t| &t.callback);

        let Some(url_str) = pick(
            cli.callback_url.as_deref(),
            section.and_then(|s| s.url.as_deref()),
        ) else {
            return Ok(None);
        };
        let url = parse_url(field::CALLBACK_URL, url_str)?;

        let ip_param = pick(
            cli.callback_ip_param.as_deref(),
            section.and_then(|s| s.ip_param.as_deref()),
        )
        .map(ToString::to_string);

        let auth_header = pick(
            cli.callback_auth_header.as_deref(),
            section.and_then(|s| s.auth_header.as_deref()),
        )
        .or_else(|| non_empty(stored.and_then(|c| c.callback_auth_header.as_deref())))
        .map(parse_auth_header)
        .transpose()?;

        let policy = match (cli.callback_policy, section.and_then(|s| s.policy.as_deref())) {
            (Some(arg), _) => arg.into(),
            (None, Some(value)) => parse_callback_policy(value)?,
            (None, None) => CallbackPolicy::default(),
        };

        Ok(Some(CallbackSettings {
            url,
            ip_param,
            auth_header,
            policy,
        }))
    }

    fn resolve_credentials_file(cli: &Cli, toml: Option<&TomlConfig>) -> Option<PathBuf> {
        cli.credentials_file
            .clone()
            .or_else(|| toml.and_then(|t| t.credentials.file.clone()))
            .map(|p| expand_tilde(&p))
            .or_else(defaults::credentials_file)
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// First non-blank value, CLI before TOML.
fn pick<'a>(cli: Option<&'a str>, toml: Option<&'a str>) -> Option<&'a str> {
    non_empty(cli).or_else(|| non_empty(toml))
}

fn parse_url(field: &'static str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|e| ConfigError::InvalidUrl {
        field,
        url: value.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl {
            field,
            url: value.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    Ok(url)
}

fn validate_address(field: &'static str, value: &str) -> Result<(), ConfigError> {
    value
        .parse::<lettre::Address>()
        .map(|_| ())
        .map_err(|_| ConfigError::InvalidValue {
            field,
            value: value.to_string(),
            expected: "an email address",
        })
}

fn validate_template(template: &str) -> Result<(), ConfigError> {
    let mut hbs = Handlebars::new();
    hbs.register_template_string("body", template)
        .map_err(|e| ConfigError::InvalidTemplate {
            reason: e.to_string(),
        })
}

/// Accepts visible ASCII only, so the value can be written back to the store.
fn parse_auth_header(value: &str) -> Result<HeaderValue, ConfigError> {
    let header = HeaderValue::from_str(value).map_err(|e| ConfigError::InvalidAuthHeader {
        reason: e.to_string(),
    })?;

    if header.to_str().is_err() {
        return Err(ConfigError::InvalidAuthHeader {
            reason: "only visible ASCII characters are allowed".to_string(),
        });
    }

    Ok(header)
}

fn parse_overlap(s: &str) -> Result<OverlapPolicy, ConfigError> {
    match s.to_lowercase().as_str() {
        "skip" => Ok(OverlapPolicy::Skip),
        "allow" => Ok(OverlapPolicy::Allow),
        _ => Err(ConfigError::InvalidValue {
            field: field::OVERLAP,
            value: s.to_string(),
            expected: "\"skip\" or \"allow\"",
        }),
    }
}

fn parse_callback_policy(s: &str) -> Result<CallbackPolicy, ConfigError> {
    match s.to_lowercase().replace('_', "-").as_str() {
        "every-tick" => Ok(CallbackPolicy::EveryTick),
        "on-change" => Ok(CallbackPolicy::OnChange),
        _ => Err(ConfigError::InvalidValue {
            field: field::CALLBACK_POLICY,
            value: s.to_string(),
            expected: "\"every-tick\" or \"on-change\"",
        }),
    }
}
