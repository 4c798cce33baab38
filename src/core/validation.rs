//! Input validation for keypick operations.
//!
//! Validates record labels before they reach the vault.

use crate::core::constants::PRINCIPAL_DELIMITER;
use crate::error::{Result, ValidationError};

/// Validate a record label.
///
/// Labels double as the vault service string (or its prefix), so:
/// - Cannot be empty or only whitespace
/// - Cannot have leading or trailing whitespace
/// - Cannot contain the `|` delimiter
/// - Cannot contain control characters (fzf is line based)
///
/// # Errors
///
/// Returns `ValidationError` if the label is invalid.
pub fn validate_label(label: &str) -> Result<()> {
    if label.trim().is_empty() {
        return Err(ValidationError::EmptyLabel.into());
    }

    if label.trim() != label {
        return Err(invalid(label, "leading or trailing whitespace"));
    }

    for (i, ch) in label.chars().enumerate() {
        if ch == PRINCIPAL_DELIMITER {
            return Err(invalid(
                label,
                &format!("'{}' at position {} is reserved", ch, i + 1),
            ));
        }
        if ch.is_control() {
            return Err(invalid(
                label,
                &format!("control character at position {}", i + 1),
            ));
        }
    }

    Ok(())
}

fn invalid(label: &str, reason: &str) -> crate::error::Error {
    ValidationError::InvalidLabel {
        label: label.to_string(),
        reason: reason.to_string(),
    }
    .into()
}
