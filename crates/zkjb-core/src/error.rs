//! # Error Types
//!
//! Structured errors for the foundational crate, built with `thiserror`.
//! No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Validation failures are field-keyed so that callers render messages per
//! field instead of inspecting error shapes — the tagged-variant replacement
//! for dynamic error sniffing.

use std::collections::BTreeMap;

use thiserror::Error;

/// Map from field name to the messages that field failed with.
///
/// `BTreeMap` keeps field ordering deterministic in rendered output.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Errors during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in canonical representations.
    /// Counts and years must be integers.
    #[error("float values are not permitted in canonical representations: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed during canonicalization.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// One or more fields failed their declared constraints.
///
/// Carried as a map so the caller can surface every failing field at once;
/// the caller must not proceed to proof generation or persistence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("validation failed for {}: {}", field_list(.fields), summary(.fields))]
pub struct ValidationError {
    /// The failing fields and their messages.
    pub fields: FieldErrors,
}

impl ValidationError {
    /// Construct from a collected field-error map.
    pub fn new(fields: FieldErrors) -> Self {
        Self { fields }
    }

    /// Construct a single-field validation error.
    pub fn single(field: &str, message: &str) -> Self {
        let mut fields = FieldErrors::new();
        fields.insert(field.to_string(), vec![message.to_string()]);
        Self { fields }
    }
}

fn field_list(fields: &FieldErrors) -> String {
    fields.keys().cloned().collect::<Vec<_>>().join(", ")
}

fn summary(fields: &FieldErrors) -> String {
    fields
        .values()
        .flatten()
        .cloned()
        .collect::<Vec<_>>()
        .join("; ")
}

/// Format errors for domain-primitive newtypes constructed from strings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// Identifier is not a valid UUID.
    #[error("invalid identifier: \"{0}\" (expected a UUID)")]
    InvalidUuid(String),

    /// Nullifier is not a 64-character lowercase hex digest.
    #[error("invalid nullifier: expected 64 lowercase hex characters, got {0} characters")]
    InvalidNullifier(usize),

    /// Applicant secret is not a 64-character lowercase hex string.
    #[error("invalid secret: expected 64 lowercase hex characters")]
    InvalidSecret,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_lists_fields() {
        let mut fields = FieldErrors::new();
        fields.insert("title".to_string(), vec!["too short".to_string()]);
        fields.insert(
            "company".to_string(),
            vec!["too long".to_string(), "weird".to_string()],
        );
        let err = ValidationError::new(fields);
        let msg = format!("{err}");
        assert!(msg.contains("company, title"));
        assert!(msg.contains("too short"));
        assert!(msg.contains("weird"));
    }

    #[test]
    fn single_field_constructor() {
        let err = ValidationError::single("secret", "must be 64 hex chars");
        assert_eq!(err.fields.len(), 1);
        assert!(format!("{err}").contains("secret"));
    }

    #[test]
    fn identity_error_display() {
        let err = IdentityError::InvalidNullifier(10);
        assert!(format!("{err}").contains("10"));
        let err = IdentityError::InvalidUuid("nope".to_string());
        assert!(format!("{err}").contains("nope"));
    }

    #[test]
    fn canonicalization_float_display() {
        let err = CanonicalizationError::FloatRejected(3.5);
        assert!(format!("{err}").contains("3.5"));
    }
}
