//! # options-gen
//!
//! Runtime support for code generated by the `options-gen` CLI.
//!
//! Generated files reference this crate for three things:
//!
//! - [`ValidationErrors`] — per-field error aggregation used by the generated
//!   `validate()` method,
//! - the [`RuleEvaluator`] capability — the pluggable engine that actually
//!   evaluates `validate = "..."` rule expressions against field values,
//! - [`duration`] — the duration-literal parser used for `default = "3s"`
//!   style initialization.
//!
//! The rule grammar itself is opaque to this crate: the process-wide default
//! evaluator accepts everything, and applications install a real engine with
//! [`install_evaluator`] before constructing any options values.

pub mod duration;
pub mod errors;
pub mod validator;

pub use errors::{ValidationError, ValidationErrors};
pub use validator::{evaluator, install_evaluator, RuleEvaluator, RuleViolation};
