//! Test support utilities for keypick integration tests.
//!
//! `fakes` stands in for fzf, the terminal and the host so the picker
//! loop can run in-process. `stub` fakes the external CLIs for the
//! adapters. `Test` drives the real binary in isolation.

#![allow(dead_code)]

pub mod assertions;
pub mod fakes;
#[cfg(unix)]
pub mod stub;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fakes::*;

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// Isolated environment for running the binary.
///
/// `HOME` and `XDG_CONFIG_HOME` point into a temp dir so no user config
/// is picked up. No process-global state is mutated.
pub struct Test {
    pub home: TempDir,
}

impl Test {
    pub fn new() -> Self {
        let home = TempDir::new().expect("failed to create temp home");
        Self { home }
    }

    /// Command for the keypick binary with the isolated environment.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("keypick").expect("failed to find keypick binary");
        cmd.env("HOME", self.home.path());
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("XDG_CONFIG_HOME", self.home.path().join(".config"));
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("KEYPICK_CONFIG");
        cmd.env_remove("KEYPICK_FZF");
        cmd.env_remove("KEYPICK_LOG");
        cmd
    }

    /// Write `contents` to a config file in the temp home and return its path.
    pub fn config(&self, contents: &str) -> PathBuf {
        let path = self.home.path().join("keypick.toml");
        std::fs::write(&path, contents).expect("failed to write config");
        path
    }
}
