//! Subprocess helpers shared by the vault, picker and host adapters.

use std::io::{self, Write};
use std::process::{Command, Output, Stdio};

use tracing::debug;

/// Run a command to completion, optionally feeding `input` on stdin.
///
/// stdout and stderr are captured. stdin is closed when `input` is
/// `None` so tools that would otherwise prompt fail fast instead.
pub(crate) fn run(cmd: &mut Command, input: Option<&[u8]>) -> io::Result<Output> {
    debug!(program = ?cmd.get_program(), args = cmd.get_args().count(), "running");

    cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
    cmd.stdin(if input.is_some() {
        Stdio::piped()
    } else {
        Stdio::null()
    });

    let mut child = cmd.spawn()?;
    if let Some(bytes) = input {
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(bytes)?;
        }
    }
    let output = child.wait_with_output()?;

    debug!(status = ?output.status.code(), "finished");
    Ok(output)
}

/// Lossy, trimmed stderr for error messages.
pub(crate) fn stderr_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_string()
}
