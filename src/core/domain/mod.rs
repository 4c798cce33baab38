//! Domain types.

mod action;
mod kind;
mod record;

pub use action::{Action, PickerKey, Selection};
pub use kind::RecordKind;
pub use record::{label_from_query, CredentialRecord, Principal};
