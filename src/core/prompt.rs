//! Interactive prompts.
//!
//! `Prompter` is the terminal seam; `collect_new` and `confirm_delete`
//! are the fixed prompt sequences the picker loop runs through it.

use zeroize::Zeroizing;

use crate::core::domain::{CredentialRecord, Principal, RecordKind};
use crate::error::{PromptError, Result};

/// Something the loop wants the user to see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Creating { label: String, kind: RecordKind },
    Created(CredentialRecord),
    DeleteTarget(CredentialRecord),
    Deleted(CredentialRecord),
    DeleteCancelled(String),
    NotFound(String),
    Connecting(CredentialRecord),
    Pasted(String),
    PromptTimedOut(String),
    Failed(String),
}

/// Blocking prompts against the controlling terminal.
pub trait Prompter {
    /// Read one echoed line. An empty answer returns `default` when given.
    ///
    /// # Errors
    ///
    /// Returns `PromptError::Terminal` if the terminal can't be read.
    fn read_line(&self, prompt: &str, default: Option<&str>) -> Result<String>;

    /// Read one line without echo.
    ///
    /// # Errors
    ///
    /// Returns `PromptError::Terminal` if the terminal can't be read.
    fn read_secret(&self, prompt: &str) -> Result<Zeroizing<String>>;

    /// Show a notice.
    fn notify(&self, notice: Notice);

    /// Wait for the user to acknowledge before the screen is redrawn.
    ///
    /// # Errors
    ///
    /// Returns `PromptError::Terminal` if the terminal can't be read.
    fn pause(&self) -> Result<()>;
}

/// Everything needed to create a record.
#[derive(Debug)]
pub struct NewRecord {
    pub label: String,
    pub principal: Option<Principal>,
    pub secret: Zeroizing<String>,
}

/// Prompt for the fields of a new `kind` record named `label`.
///
/// SSH records ask for username (defaulting to `default_user`) and
/// hostname first. Every kind asks for the secret twice.
///
/// # Errors
///
/// Returns `PromptError::Empty` for a blank field and
/// `PromptError::ConfirmationMismatch` if the two secrets differ.
pub fn collect_new(
    prompter: &dyn Prompter,
    label: &str,
    kind: RecordKind,
    default_user: Option<&str>,
) -> Result<NewRecord> {
    prompter.notify(Notice::Creating {
        label: label.to_string(),
        kind,
    });

    let principal = if kind.has_principal() {
        let user = prompter.read_line("Username", default_user)?;
        let user = user.trim();
        if user.is_empty() {
            return Err(PromptError::Empty("username").into());
        }
        let host = prompter.read_line("Hostname", None)?;
        let host = host.trim();
        if host.is_empty() {
            return Err(PromptError::Empty("hostname").into());
        }
        Some(Principal::new(user, host)?)
    } else {
        None
    };

    let secret = collect_secret(prompter)?;

    Ok(NewRecord {
        label: label.to_string(),
        principal,
        secret,
    })
}

/// Ask for a secret and its confirmation.
///
/// # Errors
///
/// Returns `PromptError::Empty` for a blank secret and
/// `PromptError::ConfirmationMismatch` if the two entries differ.
pub fn collect_secret(prompter: &dyn Prompter) -> Result<Zeroizing<String>> {
    let secret = prompter.read_secret("Password")?;
    if secret.is_empty() {
        return Err(PromptError::Empty("password").into());
    }
    let confirm = prompter.read_secret("Confirm password")?;
    if *secret != *confirm {
        return Err(PromptError::ConfirmationMismatch.into());
    }
    Ok(secret)
}

/// Show `record` and ask whether to delete it.
///
/// A bare Enter returns `default_yes`.
///
/// # Errors
///
/// Returns `PromptError::Terminal` if the terminal can't be read.
pub fn confirm_delete(
    prompter: &dyn Prompter,
    record: &CredentialRecord,
    default_yes: bool,
) -> Result<bool> {
    prompter.notify(Notice::DeleteTarget(record.clone()));
    let question = if default_yes {
        "Delete? [Y/n]"
    } else {
        "Delete? [y/N]"
    };
    let answer = prompter.read_line(question, None)?;
    Ok(parse_yes_no(&answer, default_yes))
}

/// Interpret a yes/no answer. Anything unrecognised counts as no.
pub fn parse_yes_no(answer: &str, default: bool) -> bool {
    match answer.trim().to_ascii_lowercase().as_str() {
        "" => default,
        "y" | "yes" => true,
        _ => false,
    }
}
