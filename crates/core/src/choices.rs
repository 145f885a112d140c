//! Helpers shared by every closed set of text choices.
//!
//! Choice columns are stored as TEXT with a CHECK constraint; the same
//! values are validated here before a write so callers get a 400 with a
//! readable message instead of a constraint violation.

use crate::error::CoreError;

/// Validate that `value` is one of `valid`, naming `field` in the error.
pub fn validate_choice(field: &str, value: &str, valid: &[&str]) -> Result<(), CoreError> {
    if valid.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::InvalidField {
            field: field.to_string(),
            message: format!(
                "Invalid {field} '{value}'. Must be one of: {}",
                valid.join(", ")
            ),
        })
    }
}

/// Validate an optional choice; `None` always passes.
pub fn validate_optional_choice(
    field: &str,
    value: Option<&str>,
    valid: &[&str],
) -> Result<(), CoreError> {
    match value {
        Some(v) => validate_choice(field, v, valid),
        None => Ok(()),
    }
}

/// Human-readable label for a snake_case value (`"field_report"` -> `"Field Report"`).
pub fn display_label(value: &str) -> String {
    value
        .split(['_', ' '])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `(value, label)` pairs for a choice set, used by dashboard select widgets.
pub fn choice_pairs(valid: &[&str]) -> Vec<(String, String)> {
    valid
        .iter()
        .map(|v| (v.to_string(), display_label(v)))
        .collect()
}
