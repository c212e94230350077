use serde::Serialize;
use thiserror::Error;

use crate::fault::Fault;
use crate::kind::{self, ErrorKind};

/// A single failed constraint on an input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Wire name of the field, e.g. `numberOfSeats`
    pub field: String,
    /// Which constraint failed
    pub message: String,
}

/// Input constraint checks failed for one or more fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("validation failed for {} fields", .violations.len())]
pub struct ValidationError {
    violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failed constraint
    #[must_use]
    pub fn with_violation(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.push(field, message);
        self
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.violations.push(FieldViolation {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Names of the failed fields, in the order they were recorded
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.violations.iter().map(|v| v.field.as_str())
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// `Err(self)` when any constraint failed
    ///
    /// # Errors
    ///
    /// Returns the collected violations when there is at least one
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl Fault for ValidationError {
    fn kind(&self) -> &'static ErrorKind {
        &kind::VALIDATION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_validation_passes() {
        assert!(ValidationError::new().into_result().is_ok());
    }

    #[test]
    fn violations_keep_insertion_order() {
        let err = ValidationError::new()
            .with_violation("numberOfSeats", "must be at most 20")
            .with_violation("email", "must be a well-formed email address");

        let fields: Vec<_> = err.fields().collect();
        assert_eq!(fields, ["numberOfSeats", "email"]);
        assert_eq!(err.to_string(), "validation failed for 2 fields");
        assert!(err.into_result().is_err());
    }
}
