//! The closed set of knob kinds

use crate::error::KnobError;
use crate::value::Value;
use serde::Serialize;

/// Slider value used when the caller supplies no value and no bounds.
pub const DEFAULT_SLIDER_VALUE: f64 = 10.0;

/// Distance from the slider value to a bound the caller left out.
pub const DEFAULT_SLIDER_SPREAD: f64 = 10.0;

/// Kind of a knob together with its current value and constraints.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum KnobKind {
    Boolean { value: bool },
    NullableBoolean { value: Option<bool> },
    Text { value: String },
    NullableText { value: Option<String> },
    Number { value: f64 },
    NullableNumber { value: Option<f64> },
    Slider { value: f64, bounds: SliderBounds },
    NullableSlider { value: Option<f64>, bounds: SliderBounds },
    Options(OptionsKnob),
}

impl KnobKind {
    pub fn boolean(value: bool) -> Self {
        KnobKind::Boolean { value }
    }

    pub fn nullable_boolean(value: Option<bool>) -> Self {
        KnobKind::NullableBoolean { value }
    }

    pub fn text(value: impl Into<String>) -> Self {
        KnobKind::Text {
            value: value.into(),
        }
    }

    pub fn nullable_text(value: Option<String>) -> Self {
        KnobKind::NullableText { value }
    }

    pub fn number(value: f64) -> Self {
        KnobKind::Number { value }
    }

    pub fn nullable_number(value: Option<f64>) -> Self {
        KnobKind::NullableNumber { value }
    }

    pub fn slider(params: SliderParams) -> Self {
        let (value, bounds) = params.resolve();
        KnobKind::Slider { value, bounds }
    }

    /// Like [`KnobKind::slider`], but a missing initial value stays absent.
    pub fn nullable_slider(params: SliderParams) -> Self {
        let (_, bounds) = params.resolve();
        KnobKind::NullableSlider {
            value: params.initial,
            bounds,
        }
    }

    pub fn options(options: Vec<KnobOption>) -> Result<Self, KnobError> {
        OptionsKnob::new(options).map(KnobKind::Options)
    }

    /// Human-readable kind name, used in logs and errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            KnobKind::Boolean { .. } => "boolean",
            KnobKind::NullableBoolean { .. } => "nullable boolean",
            KnobKind::Text { .. } => "text",
            KnobKind::NullableText { .. } => "nullable text",
            KnobKind::Number { .. } => "number",
            KnobKind::NullableNumber { .. } => "nullable number",
            KnobKind::Slider { .. } => "slider",
            KnobKind::NullableSlider { .. } => "nullable slider",
            KnobKind::Options(_) => "options",
        }
    }

    pub fn is_nullable(&self) -> bool {
        matches!(
            self,
            KnobKind::NullableBoolean { .. }
                | KnobKind::NullableText { .. }
                | KnobKind::NullableNumber { .. }
                | KnobKind::NullableSlider { .. }
        )
    }

    /// Whether both kinds hold the same value type.
    pub fn same_kind(&self, other: &KnobKind) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    pub fn value(&self) -> Value {
        match self {
            KnobKind::Boolean { value } => Value::Bool(*value),
            KnobKind::NullableBoolean { value } => value.map_or(Value::Null, Value::Bool),
            KnobKind::Text { value } => Value::Text(value.clone()),
            KnobKind::NullableText { value } => value.clone().map_or(Value::Null, Value::Text),
            KnobKind::Number { value } | KnobKind::Slider { value, .. } => Value::Number(*value),
            KnobKind::NullableNumber { value } | KnobKind::NullableSlider { value, .. } => {
                value.map_or(Value::Null, Value::Number)
            }
            KnobKind::Options(options) => options.value.clone(),
        }
    }

    /// Present text value, the only thing that goes into URL args.
    pub fn text_value(&self) -> Option<&str> {
        match self {
            KnobKind::Text { value } => Some(value),
            KnobKind::NullableText { value } => value.as_deref(),
            _ => None,
        }
    }

    /// Only text kinds can be restored from a raw URL string.
    pub fn supports_text_decode(&self) -> bool {
        matches!(self, KnobKind::Text { .. } | KnobKind::NullableText { .. })
    }

    /// Decode a raw URL argument into a value of this kind.
    ///
    /// Returns `None` ("leave unchanged") for every kind without text decode.
    pub fn decode_text(&self, raw: &str) -> Option<Value> {
        if self.supports_text_decode() {
            Some(Value::Text(raw.to_string()))
        } else {
            None
        }
    }

    /// Store `value` if it fits this kind. Returns whether the value changed,
    /// or `None` if it was rejected.
    pub(crate) fn set_value(&mut self, value: Value) -> Option<bool> {
        let value = self.normalize(value)?;
        let changed = self.value() != value;
        match (self, value) {
            (KnobKind::Boolean { value: slot }, Value::Bool(b)) => *slot = b,
            (KnobKind::NullableBoolean { value: slot }, Value::Bool(b)) => *slot = Some(b),
            (KnobKind::NullableBoolean { value: slot }, Value::Null) => *slot = None,
            (KnobKind::Text { value: slot }, Value::Text(s)) => *slot = s,
            (KnobKind::NullableText { value: slot }, Value::Text(s)) => *slot = Some(s),
            (KnobKind::NullableText { value: slot }, Value::Null) => *slot = None,
            (
                KnobKind::Number { value: slot } | KnobKind::Slider { value: slot, .. },
                Value::Number(n),
            ) => *slot = n,
            (
                KnobKind::NullableNumber { value: slot }
                | KnobKind::NullableSlider { value: slot, .. },
                Value::Number(n),
            ) => *slot = Some(n),
            (
                KnobKind::NullableNumber { value: slot }
                | KnobKind::NullableSlider { value: slot, .. },
                Value::Null,
            ) => *slot = None,
            (KnobKind::Options(options), value) => options.value = value,
            _ => return None,
        }
        Some(changed)
    }

    /// Bring `value` into this kind's representation: ints become numbers,
    /// slider values are clamped into their bounds and option values resolve
    /// to the listed value. `None` if an options knob does not list it.
    fn normalize(&self, value: Value) -> Option<Value> {
        match self {
            KnobKind::Options(options) => options.find(&value).map(|option| option.value.clone()),
            KnobKind::Slider { bounds, .. } | KnobKind::NullableSlider { bounds, .. } => {
                Some(match value.as_number() {
                    Some(n) => Value::Number(bounds.clamp(n)),
                    None => value,
                })
            }
            KnobKind::Number { .. } | KnobKind::NullableNumber { .. } => Some(match value {
                Value::Int(i) => Value::Number(i as f64),
                other => other,
            }),
            _ => Some(value),
        }
    }
}

/// Caller-supplied slider constraints; every field is optional.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SliderParams {
    pub initial: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub divisions: Option<u32>,
}

impl SliderParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initial(mut self, value: f64) -> Self {
        self.initial = Some(value);
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn divisions(mut self, divisions: u32) -> Self {
        self.divisions = Some(divisions);
        self
    }

    /// Resolve the effective value and bounds.
    ///
    /// The value falls back to `min`, then `max`, then
    /// [`DEFAULT_SLIDER_VALUE`]; a missing bound sits
    /// [`DEFAULT_SLIDER_SPREAD`] away from that value.
    pub fn resolve(&self) -> (f64, SliderBounds) {
        let value = self
            .initial
            .or(self.min)
            .or(self.max)
            .unwrap_or(DEFAULT_SLIDER_VALUE);
        let bounds = SliderBounds {
            min: self.min.unwrap_or(value - DEFAULT_SLIDER_SPREAD),
            max: self.max.unwrap_or(value + DEFAULT_SLIDER_SPREAD),
            divisions: self.divisions,
        };
        (value, bounds)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SliderBounds {
    pub min: f64,
    pub max: f64,
    pub divisions: Option<u32>,
}

impl SliderBounds {
    /// `value` pulled into `min..=max`. NaN lands on `min`.
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }
}

/// One entry of a single-select knob.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct KnobOption {
    pub label: String,
    pub value: Value,
}

impl KnobOption {
    pub fn new(label: impl Into<String>, value: Value) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Single-select knob. Always holds at least one option and starts on the
/// first one.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OptionsKnob {
    options: Vec<KnobOption>,
    value: Value,
}

impl OptionsKnob {
    pub fn new(options: Vec<KnobOption>) -> Result<Self, KnobError> {
        let value = options
            .first()
            .map(|option| option.value.clone())
            .ok_or(KnobError::EmptyOptions)?;
        Ok(Self { options, value })
    }

    pub fn options(&self) -> &[KnobOption] {
        &self.options
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The option whose value is currently selected.
    pub fn selected(&self) -> Option<&KnobOption> {
        self.options.iter().find(|option| option.value == self.value)
    }

    /// The option listing `value`; ints match numeric options.
    pub fn find(&self, value: &Value) -> Option<&KnobOption> {
        self.options.iter().find(|option| option.value.same_value(value))
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.find(value).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slider_defaults_without_any_input() {
        let kind = KnobKind::slider(SliderParams::new());
        assert_eq!(
            kind,
            KnobKind::Slider {
                value: 10.0,
                bounds: SliderBounds {
                    min: 0.0,
                    max: 20.0,
                    divisions: None
                }
            }
        );
    }

    #[test]
    fn slider_bounds_follow_initial_value() {
        let (value, bounds) = SliderParams::new().initial(50.0).resolve();
        assert_eq!(value, 50.0);
        assert_eq!((bounds.min, bounds.max), (40.0, 60.0));
    }

    #[test]
    fn slider_keeps_explicit_bounds() {
        let (value, bounds) = SliderParams::new().min(1.0).max(5.0).divisions(4).resolve();
        assert_eq!(value, 1.0);
        assert_eq!((bounds.min, bounds.max, bounds.divisions), (1.0, 5.0, Some(4)));
    }

    #[test]
    fn nullable_slider_keeps_absent_value() {
        let kind = KnobKind::nullable_slider(SliderParams::new());
        assert_eq!(kind.value(), Value::Null);
        match kind {
            KnobKind::NullableSlider { bounds, .. } => {
                assert_eq!((bounds.min, bounds.max), (0.0, 20.0))
            }
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn options_start_on_first_option() {
        let kind = KnobKind::options(vec![
            KnobOption::new("A", Value::Int(1)),
            KnobOption::new("B", Value::Int(2)),
        ])
        .unwrap();
        assert_eq!(kind.value(), Value::Int(1));
    }

    #[test]
    fn empty_options_are_rejected() {
        assert_eq!(KnobKind::options(Vec::new()), Err(KnobError::EmptyOptions));
    }

    #[test]
    fn options_only_accept_listed_values() {
        let mut kind = KnobKind::options(vec![
            KnobOption::new("A", Value::Text("a".into())),
            KnobOption::new("B", Value::Text("b".into())),
        ])
        .unwrap();
        assert_eq!(kind.set_value(Value::Text("c".into())), None);
        assert_eq!(kind.set_value(Value::Text("b".into())), Some(true));
        assert_eq!(kind.value(), Value::Text("b".into()));
    }

    #[test]
    fn set_value_rejects_wrong_type() {
        let mut kind = KnobKind::boolean(false);
        assert_eq!(kind.set_value(Value::Text("true".into())), None);
        assert_eq!(kind.set_value(Value::Null), None);
        assert_eq!(kind.value(), Value::Bool(false));
    }

    #[test]
    fn nullable_kinds_accept_null() {
        let mut kind = KnobKind::nullable_text(Some("x".into()));
        assert_eq!(kind.set_value(Value::Null), Some(true));
        assert_eq!(kind.value(), Value::Null);
        assert_eq!(kind.set_value(Value::Null), Some(false));
    }

    #[test]
    fn numbers_take_ints() {
        let mut kind = KnobKind::number(2.0);
        assert_eq!(kind.set_value(Value::Int(2)), Some(false));
        assert_eq!(kind.set_value(Value::Int(3)), Some(true));
        assert_eq!(kind.value(), Value::Number(3.0));
    }

    #[test]
    fn slider_values_stay_within_bounds() {
        let mut kind = KnobKind::slider(SliderParams::new().min(8.0).max(48.0));
        assert_eq!(kind.set_value(Value::Number(1_000_000.0)), Some(true));
        assert_eq!(kind.value(), Value::Number(48.0));
        assert_eq!(kind.set_value(Value::Number(f64::INFINITY)), Some(false));
        assert_eq!(kind.set_value(Value::Int(-3)), Some(true));
        assert_eq!(kind.value(), Value::Number(8.0));
        assert_eq!(kind.set_value(Value::Number(f64::NAN)), Some(false));

        let mut nullable = KnobKind::nullable_slider(SliderParams::new());
        assert_eq!(nullable.set_value(Value::Number(-5.0)), Some(true));
        assert_eq!(nullable.value(), Value::Number(0.0));
        assert_eq!(nullable.set_value(Value::Null), Some(true));
    }

    #[test]
    fn numeric_options_take_ints() {
        let mut kind = KnobKind::options(vec![
            KnobOption::new("Narrow", Value::Number(12.5)),
            KnobOption::new("Wide", Value::Number(24.0)),
        ])
        .unwrap();
        assert_eq!(kind.set_value(Value::Int(24)), Some(true));
        assert_eq!(kind.value(), Value::Number(24.0));
        assert_eq!(kind.set_value(Value::Int(24)), Some(false));
        assert_eq!(kind.set_value(Value::Int(12)), None);
    }

    #[test]
    fn only_text_kinds_decode() {
        let text = KnobKind::nullable_text(None);
        assert_eq!(text.decode_text("Bob"), Some(Value::Text("Bob".into())));
        for kind in [
            KnobKind::boolean(true),
            KnobKind::nullable_boolean(None),
            KnobKind::number(1.0),
            KnobKind::slider(SliderParams::new()),
        ] {
            assert!(!kind.supports_text_decode());
            assert_eq!(kind.decode_text("1"), None);
        }
    }
}
