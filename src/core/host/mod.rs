//! Terminal host control.
//!
//! The host is the terminal emulator keypick runs in, driven through
//! its remote-control CLI. The picker loop needs three things from it:
//! start a command in a new window, read what a window shows, and type
//! into a window.

use std::fmt;
use std::process::{Command, Output};

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::core::process;
use crate::error::{HostError, Result};

mod kitty;
mod wezterm;

pub use kitty::Kitty;
pub use wezterm::WezTerm;

/// A window or pane in the host terminal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Session(String);

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Terminal remote control.
pub trait Host {
    /// The session keypick itself is running in.
    ///
    /// # Errors
    ///
    /// Returns `HostError::NoSession` when not running inside the host.
    fn current(&self) -> Result<Session>;

    /// Start `argv` in a new session.
    ///
    /// # Errors
    ///
    /// Returns `HostError` if the host refuses to launch it.
    fn spawn(&self, argv: &[String]) -> Result<Session>;

    /// Visible text of `session`.
    ///
    /// # Errors
    ///
    /// Returns `HostError` if the screen cannot be read.
    fn read_screen(&self, session: &Session) -> Result<String>;

    /// Type `text` into `session`, followed by Enter when `submit` is set.
    ///
    /// # Errors
    ///
    /// Returns `HostError` if the text cannot be delivered.
    fn send_text(&self, session: &Session, text: &str, submit: bool) -> Result<()>;
}

/// Source of screen text for prompt detection.
///
/// Kept apart from `Host` so a more reliable signal than screen
/// scraping can stand in without touching the executor.
pub trait Screen {
    /// # Errors
    ///
    /// Returns an error if the text cannot be read.
    fn read(&self) -> Result<String>;
}

/// `Screen` backed by one host session.
pub struct HostScreen<'a> {
    host: &'a dyn Host,
    session: &'a Session,
}

impl<'a> HostScreen<'a> {
    pub fn new(host: &'a dyn Host, session: &'a Session) -> Self {
        Self { host, session }
    }
}

impl Screen for HostScreen<'_> {
    fn read(&self) -> Result<String> {
        self.host.read_screen(self.session)
    }
}

/// Which terminal to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HostKind {
    #[default]
    Kitty,
    Wezterm,
}

/// Where a spawned connection opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LaunchType {
    Window,
    #[default]
    Tab,
    OsWindow,
}

/// Build the host for `kind`.
pub fn default_host(kind: HostKind, launch: LaunchType) -> Box<dyn Host> {
    match kind {
        HostKind::Kitty => Box::new(Kitty::new(launch)),
        HostKind::Wezterm => Box::new(WezTerm::new(launch)),
    }
}

/// Run a host CLI command and require success.
pub(crate) fn exec(
    tool: &'static str,
    action: &'static str,
    cmd: &mut Command,
    input: Option<&[u8]>,
) -> Result<Output> {
    let output =
        process::run(cmd, input).map_err(|source| HostError::Spawn { tool, source })?;
    if !output.status.success() {
        error!(tool, action, code = ?output.status.code(), "host command failed");
        return Err(HostError::Command {
            tool,
            action,
            stderr: process::stderr_text(&output),
        }
        .into());
    }
    Ok(output)
}

/// Parse the numeric id a launch command prints.
pub(crate) fn parse_session_id(tool: &'static str, stdout: &[u8]) -> Result<Session> {
    let text = String::from_utf8_lossy(stdout);
    let id = text.trim();
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
        return Err(HostError::BadSessionId {
            tool,
            output: id.to_string(),
        }
        .into());
    }
    Ok(Session::new(id))
}

/// Session id from an environment variable set by the host.
pub(crate) fn session_from_env(tool: &'static str, var: &'static str) -> Result<Session> {
    match std::env::var(var) {
        Ok(id) if !id.trim().is_empty() => Ok(Session::new(id.trim())),
        _ => Err(HostError::NoSession { tool, var }.into()),
    }
}
