//! Terminal prompter.
//!
//! Reads from the controlling terminal with dialoguer and renders loop
//! notices with the output helpers.

use console::Term;
use dialoguer::{Input, Password};
use zeroize::Zeroizing;

use crate::cli::output;
use crate::core::prompt::{Notice, Prompter};
use crate::error::Result;

/// `Prompter` on the real terminal.
pub struct Terminal {
    term: Term,
}

impl Terminal {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for Terminal {
    fn read_line(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        Ok(input.interact_text_on(&self.term)?)
    }

    fn read_secret(&self, prompt: &str) -> Result<Zeroizing<String>> {
        let secret = Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact_on(&self.term)?;
        Ok(Zeroizing::new(secret))
    }

    fn notify(&self, notice: Notice) {
        match notice {
            Notice::Creating { label, kind } => {
                println!();
                output::header(&format!("New {} record: {}", kind, label));
            }
            Notice::Created(record) => match record.principal() {
                Some(p) => output::success(&format!(
                    "saved {} ({})",
                    output::label(record.label()),
                    p
                )),
                None => output::success(&format!("saved {}", output::label(record.label()))),
            },
            Notice::DeleteTarget(record) => {
                println!();
                output::warn("About to delete:");
                output::kv("name:", record.label());
                if let Some(p) = record.principal() {
                    output::kv("connection:", p);
                }
                output::dimmed("This cannot be undone.");
            }
            Notice::Deleted(record) => {
                output::success(&format!("deleted {}", output::label(record.label())))
            }
            Notice::DeleteCancelled(label) => {
                output::hint(&format!("kept {}", output::label(&label)))
            }
            Notice::NotFound(label) => output::error(&format!("no record named '{}'", label)),
            Notice::Connecting(record) => {
                let target = record
                    .principal()
                    .map(|p| p.to_string())
                    .unwrap_or_default();
                output::success(&format!(
                    "connecting to {} ({})",
                    output::label(record.label()),
                    target
                ));
            }
            Notice::Pasted(label) => {
                output::success(&format!("typed password for {}", output::label(&label)))
            }
            Notice::PromptTimedOut(label) => output::warn(&format!(
                "no password prompt seen for {}; type it yourself",
                label
            )),
            Notice::Failed(msg) => output::error(&msg),
        }
    }

    fn pause(&self) -> Result<()> {
        self.term.write_str("\nPress Enter to continue...")?;
        self.term.read_line()?;
        Ok(())
    }
}
