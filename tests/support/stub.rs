//! Stand-in executables for the subprocess adapters.
//!
//! A stub is a shell script in its own temp dir. Every run appends its
//! argv and stdin to files there, then replays the configured stdout,
//! stderr and exit code.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

const END_OF_CALL: &str = "--end-of-call--";

pub struct Stub {
    dir: TempDir,
    path: PathBuf,
}

impl Stub {
    /// Create an executable called `name` that succeeds with no output.
    pub fn new(name: &str) -> Self {
        let dir = TempDir::new().expect("failed to create stub dir");
        let path = dir.path().join(name);
        let d = dir.path().display().to_string();

        let script = format!(
            "#!/bin/sh\n\
             for arg in \"$@\"; do printf '%s\\n' \"$arg\" >> '{d}/argv'; done\n\
             printf '%s\\n' '{end}' >> '{d}/argv'\n\
             cat >> '{d}/stdin'\n\
             cat '{d}/stdout'\n\
             cat '{d}/stderr' >&2\n\
             exit \"$(cat '{d}/code')\"\n",
            d = d,
            end = END_OF_CALL,
        );
        fs::write(&path, script).expect("failed to write stub");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("failed to chmod stub");

        let stub = Self { dir, path };
        stub.respond("", "", 0);
        stub
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Set what every following run prints and exits with.
    pub fn respond(&self, stdout: &str, stderr: &str, code: i32) {
        self.respond_bytes(stdout.as_bytes(), stderr, code);
    }

    pub fn respond_bytes(&self, stdout: &[u8], stderr: &str, code: i32) {
        let d = self.dir.path();
        fs::write(d.join("stdout"), stdout).expect("failed to write stub stdout");
        fs::write(d.join("stderr"), stderr).expect("failed to write stub stderr");
        fs::write(d.join("code"), code.to_string()).expect("failed to write stub code");
    }

    /// argv of every run so far, oldest first.
    pub fn calls(&self) -> Vec<Vec<String>> {
        let log = fs::read_to_string(self.dir.path().join("argv")).unwrap_or_default();
        let mut calls = Vec::new();
        let mut current = Vec::new();
        for line in log.lines() {
            if line == END_OF_CALL {
                calls.push(std::mem::take(&mut current));
            } else {
                current.push(line.to_string());
            }
        }
        calls
    }

    /// Everything written to the stub's stdin across all runs.
    pub fn stdin(&self) -> String {
        fs::read_to_string(self.dir.path().join("stdin")).unwrap_or_default()
    }
}
