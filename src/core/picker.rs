//! Fuzzy-finder integration.
//!
//! Candidate lines go to fzf on stdin. fzf reports the typed query, the
//! `--expect` key that ended the session, and the chosen line on stdout.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::core::constants::FZF_SEARCH_PATHS;
use crate::core::domain::PickerKey;
use crate::error::{PickerError, Result};

/// How a picker session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pick {
    /// An existing line was accepted, with Enter (`key: None`) or a bound key.
    Chosen { line: String, key: Option<PickerKey> },
    /// Nothing matched; the user accepted what they typed.
    Query { query: String, key: Option<PickerKey> },
    /// Escape, ctrl-c, or nothing to return.
    Cancelled,
}

/// Interactive single-line chooser.
pub trait Picker {
    /// Let the user choose one of `items`.
    ///
    /// # Errors
    ///
    /// Returns `PickerError` if the chooser cannot be run.
    fn choose(&self, prompt: &str, header: &str, items: &[String], keys: &[PickerKey]) -> Result<Pick>;
}

/// fzf driven as a subprocess.
#[derive(Debug, Clone)]
pub struct Fzf {
    binary: PathBuf,
}

impl Fzf {
    /// Use a specific fzf binary.
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Locate fzf: an explicit path first, then well-known install
    /// locations, then `PATH`.
    ///
    /// # Errors
    ///
    /// Returns `PickerError::NotFound` listing every searched location and
    /// the current `PATH`.
    pub fn locate(explicit: Option<&Path>) -> Result<Self> {
        let mut searched = Vec::new();

        if let Some(path) = explicit {
            if path.is_file() {
                info!(path = %path.display(), "using configured fzf");
                return Ok(Self::new(path));
            }
            searched.push(path.to_path_buf());
        }

        for candidate in FZF_SEARCH_PATHS.iter().filter_map(|p| expand_home(p)) {
            if candidate.is_file() {
                debug!(path = %candidate.display(), "found fzf");
                return Ok(Self::new(candidate));
            }
            searched.push(candidate);
        }

        match which::which("fzf") {
            Ok(path) => {
                debug!(path = %path.display(), "found fzf on PATH");
                Ok(Self::new(path))
            }
            Err(_) => {
                searched.push(PathBuf::from("$PATH/fzf"));
                Err(PickerError::NotFound {
                    searched,
                    path_var: std::env::var("PATH").unwrap_or_default(),
                }
                .into())
            }
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

impl Picker for Fzf {
    fn choose(&self, prompt: &str, header: &str, items: &[String], keys: &[PickerKey]) -> Result<Pick> {
        let expect: Vec<&str> = keys.iter().map(|k| k.fzf_name()).collect();

        let mut cmd = Command::new(&self.binary);
        cmd.arg("--print-query")
            .arg(format!("--prompt={}", prompt))
            .arg(format!("--header={}", header))
            .arg("--no-multi");
        if !expect.is_empty() {
            cmd.arg(format!("--expect={}", expect.join(",")));
        }
        // fzf draws on /dev/tty; only stdin and stdout are ours.
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());

        debug!(items = items.len(), "starting fzf");
        let mut child = cmd.spawn().map_err(PickerError::Spawn)?;
        if let Some(mut stdin) = child.stdin.take() {
            let input = items.join("\n");
            // fzf may exit before reading everything; a broken pipe is fine.
            let _ = stdin.write_all(input.as_bytes());
        }
        let output = child.wait_with_output().map_err(PickerError::Spawn)?;

        let code = output.status.code().unwrap_or(130);
        let stdout = String::from_utf8_lossy(&output.stdout);
        debug!(code, "fzf finished");
        parse_output(code, &stdout)
    }
}

/// Interpret fzf's exit status and `--print-query --expect` output.
///
/// Output layout is query, pressed key (empty for Enter), then the
/// selected line.
pub(crate) fn parse_output(code: i32, stdout: &str) -> Result<Pick> {
    let mut lines = stdout.lines();
    let query = lines.next().unwrap_or_default().trim().to_string();
    let key = lines.next().and_then(PickerKey::from_fzf_name);
    let line = lines.next().unwrap_or_default().to_string();

    match code {
        // ctrl-n always means "new", even with a line highlighted.
        0 | 1 if key == Some(PickerKey::Create) => Ok(Pick::Query { query, key }),
        0 if !line.is_empty() => Ok(Pick::Chosen { line, key }),
        0 | 1 if !query.is_empty() => Ok(Pick::Query { query, key }),
        0 | 1 | 130 => Ok(Pick::Cancelled),
        _ => Err(PickerError::Failed { code }.into()),
    }
}

fn expand_home(path: &str) -> Option<PathBuf> {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir().map(|home| home.join(rest)),
        None => Some(PathBuf::from(path)),
    }
}
