//! Default values for configuration options.
//!
//! Centralized constants to avoid magic values scattered across the codebase.

use std::path::PathBuf;

/// Default check-IP endpoint.
pub const CHECKIP_URL: &str = "http://checkip.amazonaws.com";

/// Default schedule expression.
pub const SCHEDULE: &str = "@every 30m";

/// Default mail relay host.
pub const EMAIL_HOST: &str = "smtp.gmail.com";

/// Default mail relay port (submission with STARTTLS).
pub const EMAIL_PORT: u16 = 587;

/// File name of the credential store inside the home directory.
pub const CREDENTIALS_FILE_NAME: &str = ".ipwatchdog";

/// Default credential store location (`~/.ipwatchdog`).
///
/// Returns `None` if the home directory cannot be determined.
#[must_use]
pub fn credentials_file() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CREDENTIALS_FILE_NAME))
}
