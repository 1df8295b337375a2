//! Field-level validation helpers.
//!
//! Input DTOs derive `validator::Validate`; this module turns the resulting
//! `ValidationErrors` into an ordered list of field messages.

use serde::{Deserialize, Serialize};
use validator::ValidationErrors;

use crate::error::DomainError;

/// A single failed field check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Input field name
    pub field: String,
    /// Human readable message
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Flatten validation errors, keeping the declared field order.
///
/// `ValidationErrors` is backed by a hash map, so `order` lists the fields in
/// the order their messages should be reported.
pub fn collect_field_errors(errors: &ValidationErrors, order: &[&str]) -> Vec<FieldError> {
    let by_field = errors.field_errors();

    order
        .iter()
        .filter_map(|field| by_field.get(*field).map(|errs| (*field, errs)))
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| {
                let message = err
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                FieldError::new(field, message)
            })
        })
        .collect()
}

/// Convert validation errors into a domain error.
pub fn invalid_input(errors: &ValidationErrors, order: &[&str]) -> DomainError {
    DomainError::InvalidInput(collect_field_errors(errors, order))
}
