//! Error types for keypick.
//!
//! Lookup misses are not errors: `Vault::find` returns `Option` and
//! `Vault::delete` returns `bool`.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Picker(#[from] PickerError),

    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error(transparent)]
    Host(#[from] HostError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("no record named '{0}'")]
    NotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether the picker loop can report this error and show the menu again.
    ///
    /// Only a picker that can't be started at all ends the session.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Store(_)
                | Error::Prompt(_)
                | Error::Validation(_)
                | Error::Host(_)
                | Error::Picker(PickerError::Failed { .. })
        )
    }
}

/// Configuration file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Secret store (vault CLI) errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{tool} {action} failed: {stderr}")]
    Command {
        tool: &'static str,
        action: &'static str,
        stderr: String,
    },

    #[error("failed to run {tool}: {source}")]
    Spawn {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} returned invalid UTF-8")]
    InvalidUtf8 { tool: &'static str },
}

/// Fuzzy-finder errors.
#[derive(Error, Debug)]
pub enum PickerError {
    #[error("fzf not found (searched: {}; PATH={path_var})", format_searched(.searched))]
    NotFound {
        searched: Vec<PathBuf>,
        path_var: String,
    },

    #[error("fzf exited with status {code}")]
    Failed { code: i32 },

    #[error("failed to run fzf: {0}")]
    Spawn(#[source] std::io::Error),
}

fn format_searched(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Interactive prompt errors.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("passwords do not match")]
    ConfirmationMismatch,

    #[error("{0} cannot be empty")]
    Empty(&'static str),

    #[error("prompt failed: {0}")]
    Terminal(#[from] dialoguer::Error),
}

/// Terminal host (remote control) errors.
#[derive(Error, Debug)]
pub enum HostError {
    #[error("{tool} {action} failed: {stderr}")]
    Command {
        tool: &'static str,
        action: &'static str,
        stderr: String,
    },

    #[error("failed to run {tool}: {source}")]
    Spawn {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("not running inside {tool}: {var} is not set")]
    NoSession { tool: &'static str, var: &'static str },

    #[error("{tool} returned an unexpected session id: {output}")]
    BadSessionId { tool: &'static str, output: String },
}

/// Input validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("label cannot be empty")]
    EmptyLabel,

    #[error("invalid label '{label}': {reason}")]
    InvalidLabel { label: String, reason: String },

    #[error("invalid principal '{0}': expected user@host")]
    InvalidPrincipal(String),

    #[error("{0} records have no principal")]
    UnexpectedPrincipal(&'static str),
}

impl From<dialoguer::Error> for Error {
    fn from(e: dialoguer::Error) -> Self {
        Error::Prompt(PromptError::Terminal(e))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
