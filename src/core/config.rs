//! Configuration file management.
//!
//! Reads the optional `~/.config/keypick/config.toml`. Every field has a
//! default, so a missing file and an empty file behave the same.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::constants;
use crate::core::domain::RecordKind;
use crate::core::host::{HostKind, LaunchType};
use crate::core::store::StoreKind;
use crate::error::{ConfigError, Result};

/// User configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// OS vault backend
    pub store: StoreKind,
    /// Terminal to drive
    pub host: HostKind,
    /// Explicit fzf binary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picker: Option<PathBuf>,
    /// Answer used when delete confirmation gets a bare Enter
    pub delete_default_yes: bool,
    /// Vault account per record kind
    pub accounts: Accounts,
    /// How connections are opened
    pub connect: ConnectConfig,
}

/// Vault account namespaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Accounts {
    pub ssh: String,
    pub password: String,
}

/// Connection and password-prompt detection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConnectConfig {
    /// Command to run; `user@host` is appended.
    pub command: Vec<String>,
    /// Screen text that marks the password prompt (case-insensitive).
    pub prompt: String,
    /// Screen polls before giving up.
    pub attempts: u32,
    /// Delay between polls.
    pub interval_ms: u64,
    /// Where the connection opens.
    pub launch: LaunchType,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreKind::default(),
            host: HostKind::default(),
            picker: None,
            delete_default_yes: true,
            accounts: Accounts::default(),
            connect: ConnectConfig::default(),
        }
    }
}

impl Default for Accounts {
    fn default() -> Self {
        Self {
            ssh: constants::SSH_ACCOUNT.to_string(),
            password: constants::PASSWORD_ACCOUNT.to_string(),
        }
    }
}

impl Default for ConnectConfig {
    fn default() -> Self {
        Self {
            command: constants::CONNECT_COMMAND
                .iter()
                .map(|s| s.to_string())
                .collect(),
            prompt: constants::PASSWORD_PROMPT.to_string(),
            attempts: constants::PROMPT_ATTEMPTS,
            interval_ms: constants::PROMPT_INTERVAL_MS,
            launch: LaunchType::default(),
        }
    }
}

impl Config {
    /// Default config location (`~/.config/keypick/config.toml` on Linux).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(constants::CONFIG_FILE))
    }

    /// Load configuration.
    ///
    /// An `explicit` path must exist. Without one, the default location is
    /// used if present and defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` if an explicit file can't be read,
    /// `ConfigError::Parse` for malformed TOML, or
    /// `ConfigError::InvalidValue` if validation fails.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                _ => {
                    debug!("no config file, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        debug!(path = %path.display(), "loading config");
        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::ReadFile {
            path: path.clone(),
            source,
        })?;
        Self::parse(&contents, &path)
    }

    /// Parse and validate TOML text; `path` is only used in errors.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` or `ConfigError::InvalidValue`.
    pub fn parse(contents: &str, path: &Path) -> Result<Self> {
        let config: Self = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde can't.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` on the first bad field.
    pub fn validate(&self) -> Result<()> {
        if self.accounts.ssh.trim().is_empty() {
            return Err(invalid("accounts.ssh", "cannot be empty"));
        }
        if self.accounts.password.trim().is_empty() {
            return Err(invalid("accounts.password", "cannot be empty"));
        }
        if self.connect.command.first().map_or(true, |c| c.trim().is_empty()) {
            return Err(invalid("connect.command", "needs at least a program name"));
        }
        if self.connect.prompt.trim().is_empty() {
            return Err(invalid("connect.prompt", "cannot be empty"));
        }
        if self.connect.attempts == 0 {
            return Err(invalid("connect.attempts", "must be at least 1"));
        }
        Ok(())
    }

    /// Vault account holding `kind` records.
    pub fn account_for(&self, kind: RecordKind) -> &str {
        match kind {
            RecordKind::Ssh => &self.accounts.ssh,
            RecordKind::Password => &self.accounts.password,
        }
    }

    /// fzf path from `KEYPICK_FZF`, falling back to the config file.
    pub fn picker_path(&self) -> Option<PathBuf> {
        std::env::var_os(constants::FZF_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| self.picker.clone())
    }
}

fn invalid(field: &'static str, reason: &str) -> crate::error::Error {
    ConfigError::InvalidValue {
        field,
        reason: reason.to_string(),
    }
    .into()
}
