//! Record-kind policy.
//!
//! SSH records and plain password records share one picker loop. The
//! differences between them (service string layout, what Enter does,
//! whether a paste submits) live here.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::action::{Action, PickerKey};
use super::record::{CredentialRecord, Principal};
use crate::core::constants::PRINCIPAL_DELIMITER;
use crate::error::ValidationError;

/// Which flavour of record a vault holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RecordKind {
    /// `label|user@host` entries that open an SSH session
    Ssh,
    /// `label` entries whose secret is typed into the current window
    Password,
}

impl RecordKind {
    /// Action for a plain Enter on an existing item.
    pub fn default_action(self) -> Action {
        match self {
            Self::Ssh => Action::Connect,
            Self::Password => Action::Paste,
        }
    }

    /// Extra picker keys this kind understands.
    pub fn keys(self) -> &'static [PickerKey] {
        match self {
            Self::Ssh => &[PickerKey::Delete, PickerKey::Paste, PickerKey::Create],
            Self::Password => &[PickerKey::Delete, PickerKey::Create],
        }
    }

    /// Whether pasting the secret should be followed by Enter.
    pub fn paste_submits(self) -> bool {
        matches!(self, Self::Password)
    }

    /// Whether records of this kind carry a principal.
    pub fn has_principal(self) -> bool {
        matches!(self, Self::Ssh)
    }

    /// Service string stored in the vault for a record.
    pub fn service_for(self, label: &str, principal: Option<&Principal>) -> Result<String, ValidationError> {
        match (self, principal) {
            (Self::Ssh, Some(p)) => Ok(format!("{}{}{}", label, PRINCIPAL_DELIMITER, p)),
            (Self::Ssh, None) => Err(ValidationError::InvalidPrincipal(String::new())),
            (Self::Password, None) => Ok(label.to_string()),
            (Self::Password, Some(_)) => Err(ValidationError::UnexpectedPrincipal("password")),
        }
    }

    /// Recover a record from a vault service string.
    ///
    /// Returns `None` for strings that don't fit this kind's layout.
    pub fn parse_service(self, account: &str, service: &str) -> Option<CredentialRecord> {
        match self {
            Self::Ssh => {
                let (label, principal) = service.split_once(PRINCIPAL_DELIMITER)?;
                if label.is_empty() {
                    return None;
                }
                let principal: Principal = principal.parse().ok()?;
                Some(CredentialRecord::new(label, account, Some(principal)))
            }
            Self::Password => {
                if service.is_empty() {
                    return None;
                }
                Some(CredentialRecord::new(service, account, None))
            }
        }
    }

    /// Picker prompt text.
    pub fn prompt(self) -> &'static str {
        match self {
            Self::Ssh => "ssh> ",
            Self::Password => "password> ",
        }
    }

    /// Picker header describing the bindings.
    pub fn header(self) -> String {
        let enter = match self.default_action() {
            Action::Connect => "↵ connect",
            _ => "↵ paste",
        };
        let mut parts = vec![enter.to_string()];
        for key in self.keys() {
            parts.push(format!("{} {}", key.fzf_name(), key.describe()));
        }
        parts.push("esc cancel".to_string());
        parts.join(" | ")
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ssh => write!(f, "ssh"),
            Self::Password => write!(f, "password"),
        }
    }
}
