//! On-disk credential store.
//!
//! The store is a plain text file with two lines:
//!
//! ```text
//! <mail relay password>
//! <callback Authorization header value>
//! ```
//!
//! Either line may be empty. Secrets given on the command line, in the
//! environment or in the config file take precedence over the store.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors reading or writing the credential store.
#[derive(Debug, Error)]
pub enum CredentialsError {
    /// The store exists but could not be read.
    #[error("Failed to read credentials file '{}': {source}", path.display())]
    Read {
        /// Path to the store
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The store could not be written.
    #[error("Failed to write credentials file '{}': {source}", path.display())]
    Write {
        /// Path to the store
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Secrets held by the credential store.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Mail relay password
    pub mail_password: Option<String>,
    /// Callback `Authorization` header value
    pub callback_auth_header: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("Credentials")
            .field("mail_password", &redact(&self.mail_password))
            .field("callback_auth_header", &redact(&self.callback_auth_header))
            .finish()
    }
}

impl Credentials {
    /// Parses the two-line store format. Empty or missing lines become `None`.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let mut lines = content.lines().map(str::trim_end);
        let mut next = || {
            lines
                .next()
                .filter(|line| !line.is_empty())
                .map(ToString::to_string)
        };

        let mail_password = next();
        let callback_auth_header = next();

        Self {
            mail_password,
            callback_auth_header,
        }
    }

    /// Renders the two-line store format.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "{}\n{}\n",
            self.mail_password.as_deref().unwrap_or_default(),
            self.callback_auth_header.as_deref().unwrap_or_default()
        )
    }

    /// Returns true if neither secret is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.mail_password.is_none() && self.callback_auth_header.is_none()
    }

    /// Loads the store at `path`.
    ///
    /// Returns `Ok(None)` if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialsError::Read`] if the file exists but cannot be read.
    pub fn load(path: &Path) -> Result<Option<Self>, CredentialsError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Some(Self::parse(&content))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(CredentialsError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Writes the store to `path`, readable by the owner only on Unix.
    ///
    /// Writes to `{path}.tmp` first and renames it into place.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialsError::Write`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), CredentialsError> {
        let write_err = |source| CredentialsError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(write_err)?;
            }
        }

        let temp_path = PathBuf::from(format!("{}.tmp", path.display()));
        match std::fs::remove_file(&temp_path) {
            Err(e) if e.kind() != ErrorKind::NotFound => return Err(write_err(e)),
            _ => {}
        }
        write_private(&temp_path, self.render().as_bytes()).map_err(write_err)?;
        std::fs::rename(&temp_path, path).map_err(write_err)?;

        Ok(())
    }
}

#[cfg(unix)]
fn write_private(path: &Path, content: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // mode() only applies on creation
    file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    file.write_all(content)
}

#[cfg(not(unix))]
fn write_private(path: &Path, content: &[u8]) -> std::io::Result<()> {
    std::fs::write(path, content)
}

/// Expands a leading `~/` to the home directory.
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    dirs::home_dir().map_or_else(|| path.to_path_buf(), |home| home.join(rest))
}
