//! Tests for validated configuration.

use super::ConfigError;
use super::cli::Cli;
use super::credentials::Credentials;
use super::toml::TomlConfig;
use super::validated::ValidatedConfig;

/// Helper to create CLI args from a slice
fn cli(args: &[&str]) -> Cli {
    let mut full_args = vec!["ipwatchdog"];
    full_args.extend(args);
    Cli::parse_from_iter(full_args)
}

/// Helper to parse TOML config
fn toml(content: &str) -> TomlConfig {
    TomlConfig::parse(content).unwrap()
}

/// CLI args enabling only the callback
const CALLBACK_ONLY: [&str; 2] = ["--callback-url", "https://example.com/update"];

mod email_tests;
mod precedence_tests;
