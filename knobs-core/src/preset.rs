//! Named knob configurations for quick switching

use crate::knob::Knob;
use crate::value::{KnobValue, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named preset with predefined knob values
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    #[serde(default)]
    pub values: BTreeMap<String, Value>,
}

impl Preset {
    /// Create a new preset with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: BTreeMap::new(),
        }
    }

    /// Set the value for one knob label
    pub fn set<T: KnobValue>(mut self, label: impl Into<String>, value: T) -> Self {
        self.values.insert(label.into(), value.into_value());
        self
    }

    pub fn set_bool(self, label: impl Into<String>, value: bool) -> Self {
        self.set(label, value)
    }

    pub fn set_string(self, label: impl Into<String>, value: &str) -> Self {
        self.set(label, value.to_string())
    }

    pub fn set_number(self, label: impl Into<String>, value: f64) -> Self {
        self.set(label, value)
    }

    /// Check if this preset matches a knob set.
    ///
    /// Knobs named by the preset must hold the preset's value; every other
    /// knob must be at its registered default.
    pub fn matches(&self, knobs: &[Knob]) -> bool {
        knobs.iter().all(|knob| match self.values.get(knob.label()) {
            Some(expected) => knob.holds(expected),
            None => knob.is_default(),
        })
    }
}
