//! Constants used throughout keypick.
//!
//! Centralizes magic strings and default configuration values.

/// Default vault account for SSH records.
pub const SSH_ACCOUNT: &str = "kitty-ssh";

/// Default vault account for plain password records.
pub const PASSWORD_ACCOUNT: &str = "kitty-password";

/// Separates the label from `user@host` in SSH service strings.
pub const PRINCIPAL_DELIMITER: char = '|';

/// Config file path relative to the platform config dir.
pub const CONFIG_FILE: &str = "keypick/config.toml";

/// Env var that points at an explicit config file.
pub const CONFIG_ENV: &str = "KEYPICK_CONFIG";

/// Env var that points at an explicit fzf binary.
pub const FZF_ENV: &str = "KEYPICK_FZF";

/// Env var holding the tracing filter.
pub const LOG_ENV: &str = "KEYPICK_LOG";

/// Well-known fzf install locations, checked before PATH.
///
/// Entries starting with `~/` are resolved against the home directory.
pub const FZF_SEARCH_PATHS: &[&str] = &[
    "/opt/homebrew/bin/fzf",
    "/usr/local/bin/fzf",
    "~/.fzf/bin/fzf",
];

/// Default connect command; `user@host` is appended.
pub const CONNECT_COMMAND: &[&str] = &["ssh"];

/// Screen text that means the remote side wants the password.
pub const PASSWORD_PROMPT: &str = "password:";

/// How many times the screen is polled for the password prompt.
pub const PROMPT_ATTEMPTS: u32 = 50;

/// Delay between screen polls in milliseconds.
pub const PROMPT_INTERVAL_MS: u64 = 100;
