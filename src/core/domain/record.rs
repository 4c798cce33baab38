//! Credential record type.
//!
//! A record is what the vault lists: a label, the account namespace it
//! lives in, and for SSH records the `user@host` it connects to. The
//! secret itself is never part of a record.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ValidationError;

/// The `user@host` pair of an SSH record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Principal {
    user: String,
    host: String,
}

impl Principal {
    /// Build a principal from its parts.
    ///
    /// Both parts end up as one argument to the connect command, so they
    /// must be non-empty, must not start with `-`, and must not contain
    /// whitespace or control characters. The host can't contain `@`.
    pub fn new(user: impl Into<String>, host: impl Into<String>) -> Result<Self, ValidationError> {
        let user = user.into();
        let host = host.into();
        if !is_safe_part(&user) || !is_safe_part(&host) || host.contains('@') {
            return Err(ValidationError::InvalidPrincipal(format!("{}@{}", user, host)));
        }
        Ok(Self { user, host })
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn host(&self) -> &str {
        &self.host
    }
}

fn is_safe_part(part: &str) -> bool {
    !part.is_empty()
        && !part.starts_with('-')
        && !part.chars().any(|c| c.is_whitespace() || c.is_control())
}

impl FromStr for Principal {
    type Err = ValidationError;

    /// Parse `user@host`, splitting at the first `@`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('@') {
            Some((user, host)) => Self::new(user, host)
                .map_err(|_| ValidationError::InvalidPrincipal(s.to_string())),
            None => Err(ValidationError::InvalidPrincipal(s.to_string())),
        }
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.user, self.host)
    }
}

/// One stored credential, without its secret.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CredentialRecord {
    label: String,
    account: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    principal: Option<Principal>,
}

impl CredentialRecord {
    pub fn new(label: impl Into<String>, account: impl Into<String>, principal: Option<Principal>) -> Self {
        Self {
            label: label.into(),
            account: account.into(),
            principal,
        }
    }

    /// User-chosen name, unique within the account.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Vault namespace the record belongs to.
    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    /// Line shown in the picker: `label (user@host)` or just `label`.
    pub fn display_line(&self) -> String {
        match &self.principal {
            Some(p) => format!("{} ({})", self.label, p),
            None => self.label.clone(),
        }
    }
}

/// Label a typed picker query refers to.
///
/// A query typed in display form, `name (user@host)`, means `name`.
pub fn label_from_query(query: &str) -> &str {
    let query = query.trim();
    if query.contains('(') && query.contains(')') && query.contains('@') {
        query.split('(').next().unwrap_or(query).trim()
    } else {
        query
    }
}

impl fmt::Display for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}
