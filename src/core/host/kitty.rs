//! kitty remote control (`kitty @`).
//!
//! Needs `allow_remote_control` in kitty.conf, or a `KITTY_LISTEN_ON`
//! socket.

use std::process::Command;

use tracing::debug;

use super::{exec, parse_session_id, session_from_env, Host, LaunchType, Session};
use crate::error::Result;

const TOOL: &str = "kitty";

/// kitty, driven through `kitty @`.
#[derive(Debug, Clone)]
pub struct Kitty {
    launch: LaunchType,
}

impl Kitty {
    pub fn new(launch: LaunchType) -> Self {
        Self { launch }
    }

    fn remote(args: &[&str]) -> Command {
        let mut cmd = Command::new(TOOL);
        cmd.arg("@").args(args);
        cmd
    }

    fn launch_flag(&self) -> &'static str {
        match self.launch {
            LaunchType::Window => "--type=window",
            LaunchType::Tab => "--type=tab",
            LaunchType::OsWindow => "--type=os-window",
        }
    }
}

impl Host for Kitty {
    fn current(&self) -> Result<Session> {
        session_from_env(TOOL, "KITTY_WINDOW_ID")
    }

    fn spawn(&self, argv: &[String]) -> Result<Session> {
        debug!(program = ?argv.first(), "kitty launch");
        let mut cmd = Self::remote(&["launch", self.launch_flag()]);
        cmd.args(argv);
        let output = exec(TOOL, "launch", &mut cmd, None)?;
        parse_session_id(TOOL, &output.stdout)
    }

    fn read_screen(&self, session: &Session) -> Result<String> {
        let target = format!("id:{}", session.id());
        let output = exec(
            TOOL,
            "get-text",
            &mut Self::remote(&["get-text", "--match", &target]),
            None,
        )?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn send_text(&self, session: &Session, text: &str, submit: bool) -> Result<()> {
        let target = format!("id:{}", session.id());
        let mut payload = zeroize::Zeroizing::new(text.to_string());
        if submit {
            payload.push('\r');
        }
        // --stdin keeps the text out of the process list.
        exec(
            TOOL,
            "send-text",
            &mut Self::remote(&["send-text", "--match", &target, "--stdin"]),
            Some(payload.as_bytes()),
        )?;
        Ok(())
    }
}
