//! Scripted stand-ins for the picker, the terminal and the host.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use zeroize::Zeroizing;

use keypick::core::config::ConnectConfig;
use keypick::core::domain::PickerKey;
use keypick::core::host::{Host, Session};
use keypick::core::picker::{Pick, Picker};
use keypick::core::prompt::{Notice, Prompter};
use keypick::core::store::{MemoryStore, Store};
use keypick::error::{HostError, PickerError, Result, StoreError};

/// Connect settings that never sleep.
pub fn fast_connect(attempts: u32) -> ConnectConfig {
    ConnectConfig {
        attempts,
        interval_ms: 0,
        ..ConnectConfig::default()
    }
}

/// Picker that replays queued results and records what it was shown.
#[derive(Default)]
pub struct ScriptedPicker {
    script: RefCell<VecDeque<Result<Pick>>>,
    pub shown: RefCell<Vec<Vec<String>>>,
}

impl ScriptedPicker {
    pub fn new(picks: impl IntoIterator<Item = Pick>) -> Self {
        Self {
            script: RefCell::new(picks.into_iter().map(Ok).collect()),
            shown: RefCell::default(),
        }
    }

    /// Picker whose first session fails as if fzf were missing.
    pub fn missing() -> Self {
        let err = PickerError::NotFound {
            searched: vec!["/opt/homebrew/bin/fzf".into()],
            path_var: String::new(),
        };
        Self {
            script: RefCell::new(VecDeque::from([Err(err.into())])),
            shown: RefCell::default(),
        }
    }

    /// Picker whose first session exits with an unexpected status.
    pub fn crashing(code: i32) -> Self {
        Self {
            script: RefCell::new(VecDeque::from([Err(PickerError::Failed { code }.into())])),
            shown: RefCell::default(),
        }
    }

    pub fn sessions(&self) -> usize {
        self.shown.borrow().len()
    }
}

impl Picker for ScriptedPicker {
    fn choose(&self, _prompt: &str, _header: &str, items: &[String], _keys: &[PickerKey]) -> Result<Pick> {
        self.shown.borrow_mut().push(items.to_vec());
        // Running off the end of the script ends the loop.
        self.script
            .borrow_mut()
            .pop_front()
            .unwrap_or(Ok(Pick::Cancelled))
    }
}

/// Prompter that answers from queues and records notices.
#[derive(Default)]
pub struct ScriptedPrompter {
    lines: RefCell<VecDeque<String>>,
    secrets: RefCell<VecDeque<String>>,
    pub questions: RefCell<Vec<String>>,
    pub notices: RefCell<Vec<Notice>>,
    pub pauses: Cell<usize>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(self, lines: &[&str]) -> Self {
        self.lines
            .borrow_mut()
            .extend(lines.iter().map(|s| s.to_string()));
        self
    }

    pub fn secrets(self, secrets: &[&str]) -> Self {
        self.secrets
            .borrow_mut()
            .extend(secrets.iter().map(|s| s.to_string()));
        self
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn read_line(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        self.questions.borrow_mut().push(prompt.to_string());
        let answer = self
            .lines
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected prompt: {}", prompt));
        match default {
            Some(d) if answer.is_empty() => Ok(d.to_string()),
            _ => Ok(answer),
        }
    }

    fn read_secret(&self, prompt: &str) -> Result<Zeroizing<String>> {
        self.questions.borrow_mut().push(prompt.to_string());
        let answer = self
            .secrets
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected secret prompt: {}", prompt));
        Ok(Zeroizing::new(answer))
    }

    fn notify(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }

    fn pause(&self) -> Result<()> {
        self.pauses.set(self.pauses.get() + 1);
        Ok(())
    }
}

/// Text sent to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sent {
    pub session: Session,
    pub text: String,
    pub submit: bool,
}

/// Host that serves screen frames and records spawns and keystrokes.
pub struct FakeHost {
    current: Option<Session>,
    refuse: bool,
    frames: Vec<String>,
    reads: Cell<usize>,
    pub spawned: RefCell<Vec<Vec<String>>>,
    pub sent: RefCell<Vec<Sent>>,
}

impl FakeHost {
    /// Host whose spawned sessions show `frames` in order, then the last one forever.
    pub fn with_frames(frames: &[&str]) -> Self {
        Self {
            current: Some(Session::new("1")),
            refuse: false,
            frames: frames.iter().map(|s| s.to_string()).collect(),
            reads: Cell::new(0),
            spawned: RefCell::default(),
            sent: RefCell::default(),
        }
    }

    pub fn new() -> Self {
        Self::with_frames(&[])
    }

    /// Host with no current session, as when run outside the terminal.
    pub fn detached() -> Self {
        Self {
            current: None,
            ..Self::new()
        }
    }

    /// Host with remote control switched off: launches and sends fail.
    pub fn refusing() -> Self {
        Self {
            refuse: true,
            ..Self::new()
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.get()
    }

    pub fn calls(&self) -> usize {
        self.spawned.borrow().len() + self.sent.borrow().len() + self.reads()
    }
}

impl Host for FakeHost {
    fn current(&self) -> Result<Session> {
        self.current.clone().ok_or_else(|| {
            HostError::NoSession {
                tool: "fake",
                var: "FAKE_WINDOW_ID",
            }
            .into()
        })
    }

    fn spawn(&self, argv: &[String]) -> Result<Session> {
        if self.refuse {
            return Err(refused("launch"));
        }
        let mut spawned = self.spawned.borrow_mut();
        spawned.push(argv.to_vec());
        Ok(Session::new((spawned.len() + 1).to_string()))
    }

    fn read_screen(&self, _session: &Session) -> Result<String> {
        let i = self.reads.get();
        self.reads.set(i + 1);
        Ok(self
            .frames
            .get(i)
            .or(self.frames.last())
            .cloned()
            .unwrap_or_default())
    }

    fn send_text(&self, session: &Session, text: &str, submit: bool) -> Result<()> {
        if self.refuse {
            return Err(refused("send-text"));
        }
        self.sent.borrow_mut().push(Sent {
            session: session.clone(),
            text: text.to_string(),
            submit,
        });
        Ok(())
    }
}

fn refused(action: &'static str) -> keypick::error::Error {
    HostError::Command {
        tool: "fake",
        action,
        stderr: "remote control is disabled".to_string(),
    }
    .into()
}

/// Memory store whose writes can be made to fail.
#[derive(Default)]
pub struct FlakyStore {
    pub inner: MemoryStore,
    pub fail_writes: Cell<bool>,
}

impl Store for FlakyStore {
    fn name(&self) -> &'static str {
        "flaky"
    }

    fn services(&self, account: &str) -> Result<Vec<String>> {
        self.inner.services(account)
    }

    fn get(&self, account: &str, service: &str) -> Result<Option<Zeroizing<String>>> {
        self.inner.get(account, service)
    }

    fn set(&self, account: &str, service: &str, secret: &str) -> Result<()> {
        if self.fail_writes.get() {
            return Err(StoreError::Command {
                tool: "flaky",
                action: "write",
                stderr: "keyring is locked".to_string(),
            }
            .into());
        }
        self.inner.set(account, service, secret)
    }

    fn remove(&self, account: &str, service: &str) -> Result<bool> {
        self.inner.remove(account, service)
    }
}
