//! Per-field validation error aggregation.
//!
//! The generated `validate()` method evaluates every field's rule expression
//! and collects the failures here instead of short-circuiting, so a caller
//! sees all invalid fields at once.

use std::fmt;

use crate::validator::RuleViolation;

/// A single field's validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    field: String,
    violation: RuleViolation,
}

impl ValidationError {
    /// Create a validation error for `field`.
    pub fn new(field: impl Into<String>, violation: RuleViolation) -> Self {
        Self {
            field: field.into(),
            violation,
        }
    }

    /// Name of the failed field.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The underlying rule violation.
    pub fn violation(&self) -> &RuleViolation {
        &self.violation
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}): field `{}` did not pass the test: {}",
            self.field, self.field, self.violation
        )
    }
}

impl std::error::Error for ValidationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.violation)
    }
}

/// Collection of per-field validation failures.
///
/// Empty collections are not errors: [`ValidationErrors::into_result`]
/// returns `Ok(())` when nothing was added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one field's rule evaluation.
    ///
    /// `Ok(())` outcomes are discarded.
    pub fn add(&mut self, field: &str, outcome: Result<(), RuleViolation>) {
        if let Err(violation) = outcome {
            self.0.push(ValidationError::new(field, violation));
        }
    }

    /// All collected failures, in evaluation order.
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    /// Whether no failure was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Convert into a `Result`: `Ok(())` when empty, `Err(self)` otherwise.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValidationErrors: ")?;
        for (i, err) in self.0.iter().enumerate() {
            if i != 0 {
                write!(f, "; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
