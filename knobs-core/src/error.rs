use crate::value::Value;
use thiserror::Error;

/// Knob errors
///
/// Only misuse of the construction API is fatal; the registry's lenient
/// entry points log the other variants and carry on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KnobError {
    #[error("Options knob requires at least one option")]
    EmptyOptions,
    #[error("Knob '{label}' holds a {expected} value, got {found:?}")]
    TypeMismatch {
        label: String,
        expected: &'static str,
        found: Value,
    },
    #[error("Knob '{label}' has no option with value {found:?}")]
    NotAnOption { label: String, found: Value },
    #[error("Unknown knob: {0}")]
    UnknownLabel(String),
    #[error("No example is active")]
    NoActiveExample,
}
