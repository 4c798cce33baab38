//! Connect and paste actions.
//!
//! Connecting opens the record's SSH command in a new host session, then
//! watches the screen for a password prompt and types the secret once.
//! The watch is best effort: if no prompt shows up the session is left
//! alone for the user to finish by hand.

use std::thread;
use std::time::Duration;

use tracing::{debug, info};

use crate::core::config::ConnectConfig;
use crate::core::domain::{CredentialRecord, RecordKind};
use crate::core::host::{Host, HostScreen, Screen, Session};
use crate::error::{Result, ValidationError};

/// What happened to the secret after a connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Injection {
    /// The prompt appeared and the secret was typed.
    Typed,
    /// The prompt never appeared; nothing was typed.
    TimedOut,
}

/// Performs connect and paste against a host.
pub struct Executor<'a> {
    host: &'a dyn Host,
    connect: ConnectConfig,
    kind: RecordKind,
}

impl<'a> Executor<'a> {
    pub fn new(host: &'a dyn Host, connect: ConnectConfig, kind: RecordKind) -> Self {
        Self {
            host,
            connect,
            kind,
        }
    }

    /// argv that connects to `record`'s principal.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidPrincipal` for records without one.
    pub fn connect_command(&self, record: &CredentialRecord) -> Result<Vec<String>> {
        let principal = record
            .principal()
            .ok_or_else(|| ValidationError::InvalidPrincipal(record.label().to_string()))?;
        let mut argv = self.connect.command.clone();
        argv.push(principal.to_string());
        Ok(argv)
    }

    /// Open a connection for `record` and type `secret` at its password prompt.
    ///
    /// # Errors
    ///
    /// Returns `HostError` if the session cannot be spawned or the secret
    /// cannot be typed. A prompt that never appears is not an error.
    pub fn connect(&self, record: &CredentialRecord, secret: &str) -> Result<(Session, Injection)> {
        let argv = self.connect_command(record)?;
        info!(label = record.label(), program = ?argv.first(), "connecting");
        let session = self.host.spawn(&argv)?;

        let screen = HostScreen::new(self.host, &session);
        let found = wait_for_prompt(
            &screen,
            &self.connect.prompt,
            self.connect.attempts,
            Duration::from_millis(self.connect.interval_ms),
        );
        if !found {
            debug!(session = %session, "password prompt never appeared");
            return Ok((session, Injection::TimedOut));
        }

        self.host.send_text(&session, secret, true)?;
        info!(session = %session, "password typed");
        Ok((session, Injection::Typed))
    }

    /// Type `secret` into the session keypick runs in.
    ///
    /// Password records submit with Enter; SSH records don't.
    ///
    /// # Errors
    ///
    /// Returns `HostError` if there is no current session or the text
    /// cannot be delivered.
    pub fn paste(&self, secret: &str) -> Result<Session> {
        let session = self.host.current()?;
        self.host
            .send_text(&session, secret, self.kind.paste_submits())?;
        debug!(session = %session, "secret pasted");
        Ok(session)
    }
}

/// Poll `screen` until it shows `marker` (case-insensitive).
///
/// Makes at most `attempts` reads, sleeping `interval` between them.
/// Read failures count as a miss.
pub fn wait_for_prompt(screen: &dyn Screen, marker: &str, attempts: u32, interval: Duration) -> bool {
    let marker = marker.to_lowercase();
    for attempt in 0..attempts {
        match screen.read() {
            Ok(text) if text.to_lowercase().contains(&marker) => {
                debug!(attempt, "prompt detected");
                return true;
            }
            Ok(_) => {}
            Err(e) => debug!(attempt, error = %e, "screen read failed"),
        }
        if attempt + 1 < attempts {
            thread::sleep(interval);
        }
    }
    false
}
