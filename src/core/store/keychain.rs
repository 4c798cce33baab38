//! macOS Keychain backend.
//!
//! Drives the `security` CLI. Entries are generic passwords keyed by
//! account (`-a`) and service (`-s`).

use std::path::PathBuf;
use std::process::{Command, Output};

use tracing::{debug, error, info};
use zeroize::Zeroizing;

use super::Store;
use crate::core::process;
use crate::error::{Result, StoreError};

/// `security` exit status for errSecItemNotFound.
const ITEM_NOT_FOUND: i32 = 44;

/// Keychain backend driven through `security`.
#[derive(Debug, Clone)]
pub struct Keychain {
    program: PathBuf,
}

impl Default for Keychain {
    fn default() -> Self {
        Self::new()
    }
}

impl Keychain {
    const TOOL: &'static str = "security";

    /// Use `security` from `PATH`.
    pub fn new() -> Self {
        Self::with_program(Self::TOOL)
    }

    /// Use a specific `security` binary.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn exec(&self, action: &'static str, args: &[&str]) -> Result<Output> {
        debug!(action, program = %self.program.display(), "running security");
        let mut cmd = Command::new(&self.program);
        cmd.args(args);
        process::run(&mut cmd, None).map_err(|source| {
            StoreError::Spawn {
                tool: Self::TOOL,
                source,
            }
            .into()
        })
    }

    fn failure(action: &'static str, output: &Output) -> crate::error::Error {
        let stderr = process::stderr_text(output);
        error!(action, code = ?output.status.code(), "security failed");
        StoreError::Command {
            tool: Self::TOOL,
            action,
            stderr,
        }
        .into()
    }

    fn is_not_found(output: &Output) -> bool {
        output.status.code() == Some(ITEM_NOT_FOUND)
            || process::stderr_text(output).contains("could not be found")
    }
}

impl Store for Keychain {
    fn name(&self) -> &'static str {
        "keychain"
    }

    fn services(&self, account: &str) -> Result<Vec<String>> {
        debug!(account, "dumping keychain");
        let output = self.exec("dump-keychain", &["dump-keychain"])?;
        if !output.status.success() {
            return Err(Self::failure("dump-keychain", &output));
        }
        // Other apps' items can hold arbitrary bytes; those blocks just
        // won't match.
        let dump = String::from_utf8_lossy(&output.stdout);
        Ok(parse_dump(&dump, account))
    }

    fn get(&self, account: &str, service: &str) -> Result<Option<Zeroizing<String>>> {
        debug!(account, service, "finding generic password");
        let output = self.exec(
            "find-generic-password",
            &["find-generic-password", "-a", account, "-s", service, "-w"],
        )?;
        if !output.status.success() {
            if Self::is_not_found(&output) {
                debug!(account, service, "not in keychain");
                return Ok(None);
            }
            return Err(Self::failure("find-generic-password", &output));
        }

        let stdout = Zeroizing::new(output.stdout);
        let secret = std::str::from_utf8(&stdout)
            .map_err(|_| StoreError::InvalidUtf8 { tool: Self::TOOL })?;
        Ok(Some(Zeroizing::new(
            secret.trim_end_matches(['\r', '\n']).to_string(),
        )))
    }

    fn set(&self, account: &str, service: &str, secret: &str) -> Result<()> {
        info!(account, service, "storing generic password");
        // -U updates an existing item instead of failing with a duplicate.
        let output = self.exec(
            "add-generic-password",
            &[
                "add-generic-password",
                "-U",
                "-a",
                account,
                "-s",
                service,
                "-w",
                secret,
            ],
        )?;
        if !output.status.success() {
            return Err(Self::failure("add-generic-password", &output));
        }
        Ok(())
    }

    fn remove(&self, account: &str, service: &str) -> Result<bool> {
        info!(account, service, "deleting generic password");
        let output = self.exec(
            "delete-generic-password",
            &["delete-generic-password", "-a", account, "-s", service],
        )?;
        if output.status.success() {
            return Ok(true);
        }
        if Self::is_not_found(&output) {
            return Ok(false);
        }
        Err(Self::failure("delete-generic-password", &output))
    }
}

/// Extract the service strings of every item owned by `account` from
/// `security dump-keychain` output.
///
/// Items are separated by `keychain: ` headers. Hex-encoded values
/// (non-printable data) and items without a service are skipped.
pub(crate) fn parse_dump(dump: &str, account: &str) -> Vec<String> {
    dump.split("keychain: ")
        .filter(|block| blob_value(block, "acct").as_deref() == Some(account))
        .filter_map(|block| blob_value(block, "svce"))
        .collect()
}

fn blob_value(block: &str, attr: &str) -> Option<String> {
    let prefix = format!("\"{}\"<blob>=", attr);
    block.lines().find_map(|line| {
        let rest = line.trim().strip_prefix(prefix.as_str())?;
        let value = rest.strip_prefix('"')?.strip_suffix('"')?;
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    })
}
