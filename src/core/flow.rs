//! The credential picker loop.
//!
//! ```text
//! Listing ──▶ Picking ──cancel──▶ Done
//!    ▲           │
//!    │           ├─create/delete──▶ Prompting ──▶ Executing ──┐
//!    │           └─connect/paste─────────────────▶ Executing ──┼──▶ Done
//!    └─────────────────────── after create/delete ─────────────┘
//! ```
//!
//! Failures after listing are shown to the user and the loop starts over
//! from Listing. A failed listing, or a picker that can't be started,
//! ends it.

use tracing::debug;

use crate::core::domain::{label_from_query, Action, CredentialRecord, PickerKey, Selection};
use crate::core::executor::{Executor, Injection};
use crate::core::picker::{Pick, Picker};
use crate::core::prompt::{self, NewRecord, Notice, Prompter};
use crate::core::store::Store;
use crate::core::validation::validate_label;
use crate::core::vault::Vault;
use crate::error::{Error, Result};

/// Knobs for one run of the loop.
#[derive(Debug, Clone)]
pub struct FlowOptions {
    /// Answer used when delete confirmation gets a bare Enter.
    pub delete_default_yes: bool,
    /// Pre-filled username for new SSH records.
    pub default_user: Option<String>,
}

impl Default for FlowOptions {
    fn default() -> Self {
        Self {
            delete_default_yes: true,
            default_user: None,
        }
    }
}

/// How the loop ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Cancelled,
    Connected { label: String, injection: Injection },
    Pasted { label: String },
}

enum State {
    Listing,
    Picking(Vec<CredentialRecord>),
    Prompting(Selection),
    Executing(Plan),
    Done(Outcome),
}

enum Plan {
    Create(NewRecord),
    Delete(CredentialRecord),
    Connect(CredentialRecord),
    Paste(CredentialRecord),
}

/// One picker session over a vault.
pub struct Flow<'a, S: Store> {
    vault: &'a Vault<S>,
    picker: &'a dyn Picker,
    prompter: &'a dyn Prompter,
    executor: &'a Executor<'a>,
    options: FlowOptions,
}

impl<'a, S: Store> Flow<'a, S> {
    pub fn new(
        vault: &'a Vault<S>,
        picker: &'a dyn Picker,
        prompter: &'a dyn Prompter,
        executor: &'a Executor<'a>,
        options: FlowOptions,
    ) -> Self {
        Self {
            vault,
            picker,
            prompter,
            executor,
            options,
        }
    }

    /// Run until the user connects, pastes or cancels.
    ///
    /// # Errors
    ///
    /// Returns the first unrecoverable error: a failed listing, or fzf
    /// missing or failing to start.
    pub fn run(&self) -> Result<Outcome> {
        let mut state = State::Listing;
        loop {
            // Retrying a failed listing would just fail again.
            let listing = matches!(state, State::Listing);
            state = match self.step(state) {
                Ok(State::Done(outcome)) => {
                    debug!(?outcome, "picker loop done");
                    return Ok(outcome);
                }
                Ok(next) => next,
                Err(e) if e.is_recoverable() && !listing => {
                    self.recover(&e)?;
                    State::Listing
                }
                Err(e) => return Err(e),
            };
        }
    }

    fn step(&self, state: State) -> Result<State> {
        match state {
            State::Listing => {
                let records = self.vault.list()?;
                debug!(count = records.len(), "listed records");
                Ok(State::Picking(records))
            }
            State::Picking(records) => self.pick(&records),
            State::Prompting(selection) => self.prompt(selection),
            State::Executing(plan) => self.execute(plan),
            State::Done(outcome) => Ok(State::Done(outcome)),
        }
    }

    fn pick(&self, records: &[CredentialRecord]) -> Result<State> {
        let kind = self.vault.kind();
        let lines: Vec<String> = records.iter().map(|r| r.display_line()).collect();
        let pick = self
            .picker
            .choose(kind.prompt(), &kind.header(), &lines, kind.keys())?;

        let selection = match pick {
            Pick::Cancelled => Selection::Cancel,
            Pick::Chosen { line, key } => {
                let Some(record) = records.iter().find(|r| r.display_line() == line) else {
                    return self.not_found(line);
                };
                let action = key.map_or(kind.default_action(), PickerKey::action);
                Selection::Existing {
                    record: record.clone(),
                    action,
                }
            }
            Pick::Query { query, key } => match key {
                None | Some(PickerKey::Create) => {
                    let label = if query.is_empty() {
                        self.prompter.read_line("Name", None)?.trim().to_string()
                    } else {
                        label_from_query(&query).to_string()
                    };
                    Selection::Create { label }
                }
                // Delete or paste on something that isn't listed.
                Some(_) => return self.not_found(query),
            },
        };

        debug!(action = ?selection.action(), "selection");
        Ok(match selection {
            Selection::Cancel => State::Done(Outcome::Cancelled),
            Selection::Existing {
                record,
                action: Action::Connect,
            } => State::Executing(Plan::Connect(record)),
            Selection::Existing {
                record,
                action: Action::Paste,
            } => State::Executing(Plan::Paste(record)),
            other => State::Prompting(other),
        })
    }

    fn prompt(&self, selection: Selection) -> Result<State> {
        match selection {
            Selection::Create { label } => {
                validate_label(&label)?;
                let new = prompt::collect_new(
                    self.prompter,
                    &label,
                    self.vault.kind(),
                    self.options.default_user.as_deref(),
                )?;
                Ok(State::Executing(Plan::Create(new)))
            }
            Selection::Existing {
                record,
                action: Action::Delete,
            } => {
                if prompt::confirm_delete(self.prompter, &record, self.options.delete_default_yes)? {
                    Ok(State::Executing(Plan::Delete(record)))
                } else {
                    self.prompter
                        .notify(Notice::DeleteCancelled(record.label().to_string()));
                    self.prompter.pause()?;
                    Ok(State::Listing)
                }
            }
            // New record over an existing one: same as creating by name.
            Selection::Existing {
                record,
                action: Action::Create,
            } => self.prompt(Selection::Create {
                label: record.label().to_string(),
            }),
            Selection::Existing {
                record,
                action: Action::Connect,
            } => Ok(State::Executing(Plan::Connect(record))),
            Selection::Existing {
                record,
                action: Action::Paste,
            } => Ok(State::Executing(Plan::Paste(record))),
            Selection::Existing {
                action: Action::Cancel,
                ..
            }
            | Selection::Cancel => Ok(State::Done(Outcome::Cancelled)),
        }
    }

    fn execute(&self, plan: Plan) -> Result<State> {
        match plan {
            Plan::Create(new) => {
                let record = self
                    .vault
                    .create(&new.label, new.principal.as_ref(), &new.secret)?;
                self.prompter.notify(Notice::Created(record));
                self.prompter.pause()?;
                Ok(State::Listing)
            }
            Plan::Delete(record) => {
                if self.vault.delete(record.label())? {
                    self.prompter.notify(Notice::Deleted(record));
                } else {
                    self.prompter
                        .notify(Notice::NotFound(record.label().to_string()));
                }
                self.prompter.pause()?;
                Ok(State::Listing)
            }
            Plan::Connect(record) => {
                let Some(secret) = self.vault.find(record.label())? else {
                    return self.not_found(record.label().to_string());
                };
                self.prompter.notify(Notice::Connecting(record.clone()));
                let (_, injection) = self.executor.connect(&record, &secret)?;
                if injection == Injection::TimedOut {
                    self.prompter
                        .notify(Notice::PromptTimedOut(record.label().to_string()));
                }
                Ok(State::Done(Outcome::Connected {
                    label: record.label().to_string(),
                    injection,
                }))
            }
            Plan::Paste(record) => {
                let Some(secret) = self.vault.find(record.label())? else {
                    return self.not_found(record.label().to_string());
                };
                self.executor.paste(&secret)?;
                self.prompter
                    .notify(Notice::Pasted(record.label().to_string()));
                Ok(State::Done(Outcome::Pasted {
                    label: record.label().to_string(),
                }))
            }
        }
    }

    fn not_found(&self, label: String) -> Result<State> {
        self.prompter.notify(Notice::NotFound(label));
        self.prompter.pause()?;
        Ok(State::Listing)
    }

    fn recover(&self, error: &Error) -> Result<()> {
        debug!(error = %error, "recovering");
        self.prompter.notify(Notice::Failed(error.to_string()));
        self.prompter.pause()
    }
}
