//! Knob value object

use crate::error::KnobError;
use crate::value::Value;
use crate::variant::KnobKind;
use serde::Serialize;
use std::hash::{Hash, Hasher};

/// One adjustable parameter of a catalog example.
///
/// The label is the primary key: equality compares label, value and
/// description, but hashing uses the label alone. Values may be `f64`, so
/// there is no `Eq` and knobs are not meant as `HashSet`/`HashMap` keys;
/// key by label instead.
#[derive(Clone, Debug, Serialize)]
pub struct Knob {
    label: String,
    description: Option<String>,
    #[serde(flatten)]
    kind: KnobKind,
    /// Value at registration, before any URL override. Presets reset to it.
    #[serde(skip)]
    default: Value,
    /// Raw URL argument this knob was last reconciled with.
    #[serde(skip)]
    url_applied: Option<String>,
}

impl Knob {
    pub fn new(label: impl Into<String>, description: Option<String>, kind: KnobKind) -> Self {
        let default = kind.value();
        Self {
            label: label.into(),
            description,
            kind,
            default,
            url_applied: None,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn kind(&self) -> &KnobKind {
        &self.kind
    }

    pub fn value(&self) -> Value {
        self.kind.value()
    }

    pub fn default_value(&self) -> &Value {
        &self.default
    }

    pub fn is_default(&self) -> bool {
        self.kind.value() == self.default
    }

    /// Whether the knob currently holds `value`, after the same coercion
    /// [`Knob::set_value`] applies (an integer matches an equal number).
    pub fn holds(&self, value: &Value) -> bool {
        let mut probe = self.kind.clone();
        probe.set_value(value.clone()) == Some(false)
    }

    /// Replace the current value. Returns whether it changed.
    pub fn set_value(&mut self, value: Value) -> Result<bool, KnobError> {
        match self.kind.set_value(value.clone()) {
            Some(changed) => Ok(changed),
            None if matches!(self.kind, KnobKind::Options(_)) => Err(KnobError::NotAnOption {
                label: self.label.clone(),
                found: value,
            }),
            None => Err(KnobError::TypeMismatch {
                label: self.label.clone(),
                expected: self.kind.type_name(),
                found: value,
            }),
        }
    }

    /// Back to the registered value. Returns whether it changed.
    pub fn reset(&mut self) -> bool {
        self.kind.set_value(self.default.clone()).unwrap_or(false)
    }

    /// Decode a raw URL argument against this knob's kind.
    pub fn decode_url_arg(&self, raw: &str) -> Option<Value> {
        self.kind.decode_text(raw)
    }

    pub(crate) fn url_applied(&self) -> Option<&str> {
        self.url_applied.as_deref()
    }

    pub(crate) fn mark_url_applied(&mut self, raw: &str) {
        self.url_applied = Some(raw.to_string());
    }

    /// Reconcile with a raw URL argument. Undecodable arguments leave the
    /// value alone. Returns whether the value changed.
    pub(crate) fn apply_url_arg(&mut self, raw: &str) -> bool {
        self.mark_url_applied(raw);
        match self.decode_url_arg(raw) {
            Some(value) => self.kind.set_value(value).unwrap_or(false),
            None => false,
        }
    }
}

impl PartialEq for Knob {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label
            && self.value() == other.value()
            && self.description == other.description
    }
}

impl Hash for Knob {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.label.hash(state);
    }
}
