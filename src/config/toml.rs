//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// IP check configuration section
    #[serde(default)]
    pub check: CheckSection,

    /// Email alert configuration section
    #[serde(default)]
    pub email: EmailSection,

    /// Callback configuration section
    #[serde(default)]
    pub callback: CallbackSection,

    /// Credential store configuration section
    #[serde(default)]
    pub credentials: CredentialsSection,
}

/// IP check configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckSection {
    /// Endpoint returning the public IP as plain text
    pub url: Option<String>,

    /// Schedule expression
    pub schedule: Option<String>,

    /// Overlap policy: "skip" or "allow"
    pub overlap: Option<String>,
}

/// Email alert configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmailSection {
    /// Sender address
    pub sender: Option<String>,

    /// Recipient address
    pub recipient: Option<String>,

    /// Mail relay hostname
    pub host: Option<String>,

    /// Mail relay port
    pub port: Option<u16>,

    /// Mail relay login
    pub username: Option<String>,

    /// Mail relay password
    pub password: Option<String>,

    /// Handlebars body template
    pub body_template: Option<String>,
}

/// Callback configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CallbackSection {
    /// Callback URL
    pub url: Option<String>,

    /// Query parameter carrying the current IP
    pub ip_param: Option<String>,

    /// Authorization header value
    pub auth_header: Option<String>,

    /// Callback policy: "every-tick" or "on-change"
    pub policy: Option<String>,
}

/// Credential store configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CredentialsSection {
    /// Path to the credential store
    pub file: Option<PathBuf>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# ipwatchdog configuration file
# Every value can also be given on the command line or through an
# IPWATCHDOG_* environment variable, which take precedence.

[check]
# Endpoint returning the public IP as plain text
url = "http://checkip.amazonaws.com"

# How often to check. Accepted forms:
#   "@every 30m", "@every 1h30m"     fixed interval
#   "every 5 minutes", "every hour"  fixed interval
#   "@hourly", "@daily", "@weekly"   calendar descriptors
#   "*/10 * * * *"                   cron (5 or 6 fields)
schedule = "@every 30m"

# What to do when a check is due while the previous one is still running:
# "skip" (default) or "allow"
# overlap = "skip"

[email]
# Email alerts are enabled as soon as any of sender, recipient, username
# or password is set. Sender and recipient are then required.
# sender = "me@example.com"
# recipient = "me@example.com"

# Mail relay (STARTTLS, PLAIN authentication)
# host = "smtp.gmail.com"
# port = 587

# Relay login, defaults to the sender address
# username = "me@example.com"

# Prefer the credential store or IPWATCHDOG_EMAIL_PASSWORD over this
# password = "app-password"

# Handlebars body template
# Available variables: {{previous}}, {{current}}
# body_template = "IP has changed! New IP is {{current}} while previous IP was {{previous}}"

[callback]
# URL hit with a GET request; enables the callback
# url = "https://example.com/update"

# Query parameter carrying the current IP (omitted if unset)
# ip_param = "ip"

# Authorization header value
# auth_header = "Bearer your-token-here"

# "every-tick" (default, heartbeat) or "on-change"
# policy = "every-tick"

[credentials]
# Two-line file: mail password, then callback auth header (default: ~/.ipwatchdog)
# file = "~/.ipwatchdog"
"#
    .to_string()
}
