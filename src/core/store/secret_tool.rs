//! libsecret backend (GNOME Keyring, KWallet via Secret Service).
//!
//! Drives the `secret-tool` CLI. Entries carry two attributes,
//! `account` and `service`, mirroring the Keychain layout.

use std::path::PathBuf;
use std::process::{Command, Output};

use tracing::{debug, error, info};
use zeroize::Zeroizing;

use super::Store;
use crate::core::process;
use crate::error::{Result, StoreError};

/// Secret Service backend driven through `secret-tool`.
#[derive(Debug, Clone)]
pub struct SecretTool {
    program: PathBuf,
}

impl Default for SecretTool {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretTool {
    const TOOL: &'static str = "secret-tool";

    /// Use `secret-tool` from `PATH`.
    pub fn new() -> Self {
        Self::with_program(Self::TOOL)
    }

    /// Use a specific `secret-tool` binary.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn exec(&self, action: &'static str, args: &[&str], input: Option<&[u8]>) -> Result<Output> {
        debug!(action, program = %self.program.display(), "running secret-tool");
        let mut cmd = Command::new(&self.program);
        cmd.arg(action).args(args);
        process::run(&mut cmd, input).map_err(|source| {
            StoreError::Spawn {
                tool: Self::TOOL,
                source,
            }
            .into()
        })
    }

    fn failure(action: &'static str, output: &Output) -> crate::error::Error {
        error!(action, code = ?output.status.code(), "secret-tool failed");
        StoreError::Command {
            tool: Self::TOOL,
            action,
            stderr: process::stderr_text(output),
        }
        .into()
    }
}

impl Store for SecretTool {
    fn name(&self) -> &'static str {
        "secret-tool"
    }

    fn services(&self, account: &str) -> Result<Vec<String>> {
        let output = self.exec("search", &["--all", "account", account], None)?;
        // No matches is exit 1 with empty output.
        if !output.status.success() && output.stdout.is_empty() {
            let stderr = process::stderr_text(&output);
            if !stderr.is_empty() && !stderr.contains("No matching") {
                return Err(Self::failure("search", &output));
            }
        }

        // search prints each item's secret too; keep the buffers wiped.
        let stdout = Zeroizing::new(String::from_utf8_lossy(&output.stdout).into_owned());
        let stderr = Zeroizing::new(String::from_utf8_lossy(&output.stderr).into_owned());
        Ok(parse_search(&stdout)
            .into_iter()
            .chain(parse_search(&stderr))
            .collect())
    }

    fn get(&self, account: &str, service: &str) -> Result<Option<Zeroizing<String>>> {
        let output = self.exec("lookup", &["account", account, "service", service], None)?;
        if !output.status.success() {
            if output.stderr.is_empty() {
                debug!(account, service, "not in secret service");
                return Ok(None);
            }
            return Err(Self::failure("lookup", &output));
        }
        let stdout = Zeroizing::new(output.stdout);
        let secret = std::str::from_utf8(&stdout)
            .map_err(|_| StoreError::InvalidUtf8 { tool: Self::TOOL })?;
        Ok(Some(Zeroizing::new(secret.to_string())))
    }

    fn set(&self, account: &str, service: &str, secret: &str) -> Result<()> {
        info!(account, service, "storing secret");
        let label = format!("--label={}", service);
        // store replaces an item with identical attributes.
        let output = self.exec(
            "store",
            &[label.as_str(), "account", account, "service", service],
            Some(secret.as_bytes()),
        )?;
        if !output.status.success() {
            return Err(Self::failure("store", &output));
        }
        Ok(())
    }

    fn remove(&self, account: &str, service: &str) -> Result<bool> {
        info!(account, service, "clearing secret");
        // clear succeeds whether or not anything matched.
        if self.get(account, service)?.is_none() {
            return Ok(false);
        }
        let output = self.exec("clear", &["account", account, "service", service], None)?;
        if !output.status.success() {
            return Err(Self::failure("clear", &output));
        }
        Ok(true)
    }
}

/// Collect `attribute.service = ...` values from `secret-tool search` output.
pub(crate) fn parse_search(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| {
            let (key, value) = line.split_once(" = ")?;
            (key.trim() == "attribute.service" && !value.is_empty()).then(|| value.to_string())
        })
        .collect()
}
