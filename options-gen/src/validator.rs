//! The rule-evaluator capability used by generated `validate()` methods.
//!
//! Generated code never interprets rule expressions itself: it hands the
//! field value and the verbatim `validate = "..."` string to the process-wide
//! [`RuleEvaluator`]. The default evaluator accepts everything; applications
//! plug in a real engine with [`install_evaluator`].
//!
//! The installed evaluator is swap-before-use: install it during startup,
//! before any generated constructor or `validate()` call runs. Swapping while
//! validations are in flight is not supported by the contract (in-flight
//! calls keep the evaluator they already resolved).

use std::any::Any;
use std::sync::{Arc, OnceLock, RwLock};

use thiserror::Error;

/// A failed rule evaluation for a single field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RuleViolation {
    message: String,
}

impl RuleViolation {
    /// Create a violation with a human-readable message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The violation message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Capability that evaluates one field value against a rule expression.
///
/// `rules` is the verbatim directive string from the source declaration; its
/// grammar is owned by the installed engine, not by this crate.
pub trait RuleEvaluator: Send + Sync {
    fn eval(&self, field: &str, value: &dyn Any, rules: &str) -> Result<(), RuleViolation>;
}

/// Default evaluator: accepts every value.
///
/// Stands in until a real engine is installed, so generated code remains
/// callable in programs that never configure validation.
#[derive(Debug, Default)]
pub struct AcceptAll;

impl RuleEvaluator for AcceptAll {
    fn eval(&self, _field: &str, _value: &dyn Any, _rules: &str) -> Result<(), RuleViolation> {
        Ok(())
    }
}

fn slot() -> &'static RwLock<Arc<dyn RuleEvaluator>> {
    static SLOT: OnceLock<RwLock<Arc<dyn RuleEvaluator>>> = OnceLock::new();
    SLOT.get_or_init(|| RwLock::new(Arc::new(AcceptAll)))
}

/// The process-wide rule evaluator.
pub fn evaluator() -> Arc<dyn RuleEvaluator> {
    slot().read().expect("evaluator slot poisoned").clone()
}

/// Install a process-wide rule evaluator.
///
/// Must happen before generated validation code runs (swap-before-use).
pub fn install_evaluator(ev: Arc<dyn RuleEvaluator>) {
    *slot().write().expect("evaluator slot poisoned") = ev;
}
