//! WezTerm remote control (`wezterm cli`).

use std::process::Command;

use tracing::debug;

use super::{exec, parse_session_id, session_from_env, Host, LaunchType, Session};
use crate::error::Result;

const TOOL: &str = "wezterm";

/// WezTerm, driven through `wezterm cli`.
#[derive(Debug, Clone)]
pub struct WezTerm {
    launch: LaunchType,
}

impl WezTerm {
    pub fn new(launch: LaunchType) -> Self {
        Self { launch }
    }

    fn cli(args: &[&str]) -> Command {
        let mut cmd = Command::new(TOOL);
        cmd.arg("cli").args(args);
        cmd
    }
}

impl Host for WezTerm {
    fn current(&self) -> Result<Session> {
        session_from_env(TOOL, "WEZTERM_PANE")
    }

    fn spawn(&self, argv: &[String]) -> Result<Session> {
        debug!(program = ?argv.first(), "wezterm spawn");
        let mut cmd = Self::cli(&["spawn"]);
        // wezterm has no separate "window inside a tab"; both open a tab.
        if self.launch == LaunchType::OsWindow {
            cmd.arg("--new-window");
        }
        cmd.arg("--").args(argv);
        let output = exec(TOOL, "spawn", &mut cmd, None)?;
        parse_session_id(TOOL, &output.stdout)
    }

    fn read_screen(&self, session: &Session) -> Result<String> {
        let output = exec(
            TOOL,
            "get-text",
            &mut Self::cli(&["get-text", "--pane-id", session.id()]),
            None,
        )?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn send_text(&self, session: &Session, text: &str, submit: bool) -> Result<()> {
        let mut payload = zeroize::Zeroizing::new(text.to_string());
        if submit {
            payload.push('\r');
        }
        // Without a text argument, send-text reads stdin.
        exec(
            TOOL,
            "send-text",
            &mut Self::cli(&["send-text", "--no-paste", "--pane-id", session.id()]),
            Some(payload.as_bytes()),
        )?;
        Ok(())
    }
}
