//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.
//! Every option can also be supplied through an `IPWATCHDOG_*` environment
//! variable.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::notify::CallbackPolicy;
use crate::schedule::OverlapPolicy;

/// ipwatchdog: public IP change monitor
///
/// Periodically checks the host's public IP address and sends an email
/// and/or hits a callback URL when it changes.
#[derive(Debug, Parser)]
#[command(name = "ipwatchdog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Endpoint returning the caller's public IP as plain text
    #[arg(long = "checkip-url", env = "IPWATCHDOG_CHECKIP_URL")]
    pub checkip_url: Option<String>,

    /// Check schedule: "@every 30m", "every 5 minutes", "@hourly" or a cron expression
    #[arg(long, env = "IPWATCHDOG_SCHEDULE")]
    pub schedule: Option<String>,

    /// What to do when a check is due while the previous one is still running
    #[arg(long, value_enum, env = "IPWATCHDOG_OVERLAP")]
    pub overlap: Option<OverlapArg>,

    /// Sender email address; enables email alerts
    #[arg(long = "email-sender", env = "IPWATCHDOG_EMAIL_SENDER")]
    pub email_sender: Option<String>,

    /// Recipient email address; enables email alerts
    #[arg(long = "email-recipient", env = "IPWATCHDOG_EMAIL_RECIPIENT")]
    pub email_recipient: Option<String>,

    /// Mail relay hostname
    #[arg(long = "email-host", env = "IPWATCHDOG_EMAIL_HOST")]
    pub email_host: Option<String>,

    /// Mail relay port
    #[arg(long = "email-port", env = "IPWATCHDOG_EMAIL_PORT")]
    pub email_port: Option<u16>,

    /// Mail relay login (defaults to the sender address)
    #[arg(long = "email-username", env = "IPWATCHDOG_EMAIL_USERNAME")]
    pub email_username: Option<String>,

    /// Mail relay password
    #[arg(
        long = "email-password",
        env = "IPWATCHDOG_EMAIL_PASSWORD",
        hide_env_values = true
    )]
    pub email_password: Option<String>,

    /// Handlebars template for the email body ({{previous}}, {{current}})
    #[arg(long = "email-body-template", env = "IPWATCHDOG_EMAIL_BODY_TEMPLATE")]
    pub email_body_template: Option<String>,

    /// URL to hit with a GET request; enables the callback
    #[arg(long = "callback-url", env = "IPWATCHDOG_CALLBACK_URL")]
    pub callback_url: Option<String>,

    /// Query parameter carrying the current IP (omitted if unset)
    #[arg(long = "callback-ip-param", env = "IPWATCHDOG_CALLBACK_IP_PARAM")]
    pub callback_ip_param: Option<String>,

    /// Authorization header value sent with the callback
    #[arg(
        long = "callback-auth-header",
        env = "IPWATCHDOG_CALLBACK_AUTH_HEADER",
        hide_env_values = true
    )]
    pub callback_auth_header: Option<String>,

    /// When the callback fires
    #[arg(long = "callback-policy", value_enum, env = "IPWATCHDOG_CALLBACK_POLICY")]
    pub callback_policy: Option<CallbackPolicyArg>,

    /// Path to the credential store (default: ~/.ipwatchdog)
    #[arg(long = "credentials-file", env = "IPWATCHDOG_CREDENTIALS_FILE")]
    pub credentials_file: Option<PathBuf>,

    /// Write the resolved secrets to the credential store
    #[arg(long = "save-credentials")]
    pub save_credentials: bool,

    /// Path to configuration file
    #[arg(long, short, env = "IPWATCHDOG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for ipwatchdog
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "ipwatchdog.toml")]
        output: PathBuf,
    },
}

/// Overlap policy argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OverlapArg {
    /// Skip a firing while the previous check is running
    Skip,
    /// Start overlapping checks
    Allow,
}

impl From<OverlapArg> for OverlapPolicy {
    fn from(arg: OverlapArg) -> Self {
        match arg {
            OverlapArg::Skip => Self::Skip,
            OverlapArg::Allow => Self::Allow,
        }
    }
}

/// Callback policy argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CallbackPolicyArg {
    /// Fire on every check (heartbeat)
    EveryTick,
    /// Fire only when the IP changed
    OnChange,
}

impl From<CallbackPolicyArg> for CallbackPolicy {
    fn from(arg: CallbackPolicyArg) -> Self {
        match arg {
            CallbackPolicyArg::EveryTick => Self::EveryTick,
            CallbackPolicyArg::OnChange => Self::OnChange,
        }
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
