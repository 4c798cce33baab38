//! Picker actions and key bindings.

use super::record::CredentialRecord;

/// What the user asked the picker loop to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Connect,
    Paste,
    Delete,
    Create,
    Cancel,
}

/// Extra key bound in the picker, on top of Enter and Escape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerKey {
    Delete,
    Paste,
    Create,
}

impl PickerKey {
    /// Key name as fzf spells it in `--expect`.
    pub fn fzf_name(self) -> &'static str {
        match self {
            Self::Delete => "ctrl-d",
            Self::Paste => "ctrl-y",
            Self::Create => "ctrl-n",
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Self::Delete => "delete",
            Self::Paste => "paste only",
            Self::Create => "new",
        }
    }

    pub fn action(self) -> Action {
        match self {
            Self::Delete => Action::Delete,
            Self::Paste => Action::Paste,
            Self::Create => Action::Create,
        }
    }

    /// Look up a key by the name fzf printed.
    pub fn from_fzf_name(name: &str) -> Option<Self> {
        [Self::Delete, Self::Paste, Self::Create]
            .into_iter()
            .find(|k| k.fzf_name() == name)
    }
}

/// The picker result for one loop iteration.
///
/// Consumed immediately; never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Act on an existing record.
    Existing {
        record: CredentialRecord,
        action: Action,
    },
    /// Create a new record under this label.
    Create { label: String },
    Cancel,
}

impl Selection {
    pub fn action(&self) -> Action {
        match self {
            Self::Existing { action, .. } => *action,
            Self::Create { .. } => Action::Create,
            Self::Cancel => Action::Cancel,
        }
    }
}
