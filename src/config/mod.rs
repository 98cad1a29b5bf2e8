//! Configuration layer for ipwatchdog.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - The on-disk credential store ([`Credentials`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values passed on the command line or via `IPWATCHDOG_*`
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Credential store** - Only for the mail password and callback auth header
//! 4. **Built-in defaults** - Hardcoded default values
//!
//! Blank values count as absent at every level.
//!
//! # Enabling notifiers
//!
//! Email alerts are enabled when any of sender, recipient, username or
//! password is given explicitly; a password found only in the credential
//! store does not enable them. The callback is enabled when a callback URL is
//! given. At least one must be enabled.

mod cli;
mod credentials;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod cli_tests;
#[cfg(test)]
mod validated_tests;

pub use cli::{CallbackPolicyArg, Cli, Command, OverlapArg};
pub use credentials::{Credentials, CredentialsError, expand_tilde};
pub use error::{ConfigError, field};
pub use toml::{TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
