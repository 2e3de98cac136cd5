use knobs_core::{KnobKind, KnobOption, Preset, SliderParams, Value};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// YAML catalog file: extra examples described entirely by their knobs
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MocksConfig {
    #[serde(default)]
    pub examples: Vec<ExampleConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExampleConfig {
    pub id: String,
    pub title: Option<String>,
    #[serde(default)]
    pub knobs: Vec<KnobConfig>,
    #[serde(default)]
    pub presets: Vec<Preset>,
}

/// One knob of a configured example, tagged by `kind`
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum KnobConfig {
    Boolean {
        label: String,
        description: Option<String>,
        #[serde(default)]
        initial: bool,
    },
    NullableBoolean {
        label: String,
        description: Option<String>,
        initial: Option<bool>,
    },
    Text {
        label: String,
        description: Option<String>,
        #[serde(default)]
        initial: String,
    },
    NullableText {
        label: String,
        description: Option<String>,
        initial: Option<String>,
    },
    Number {
        label: String,
        description: Option<String>,
        #[serde(default)]
        initial: f64,
    },
    NullableNumber {
        label: String,
        description: Option<String>,
        initial: Option<f64>,
    },
    Slider {
        label: String,
        description: Option<String>,
        initial: Option<f64>,
        min: Option<f64>,
        max: Option<f64>,
        divisions: Option<u32>,
    },
    NullableSlider {
        label: String,
        description: Option<String>,
        initial: Option<f64>,
        min: Option<f64>,
        max: Option<f64>,
        divisions: Option<u32>,
    },
    Options {
        label: String,
        description: Option<String>,
        /// `[label, value]` pairs
        options: Vec<(String, Value)>,
    },
}

impl KnobConfig {
    pub fn label(&self) -> &str {
        match self {
            KnobConfig::Boolean { label, .. }
            | KnobConfig::NullableBoolean { label, .. }
            | KnobConfig::Text { label, .. }
            | KnobConfig::NullableText { label, .. }
            | KnobConfig::Number { label, .. }
            | KnobConfig::NullableNumber { label, .. }
            | KnobConfig::Slider { label, .. }
            | KnobConfig::NullableSlider { label, .. }
            | KnobConfig::Options { label, .. } => label,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            KnobConfig::Boolean { description, .. }
            | KnobConfig::NullableBoolean { description, .. }
            | KnobConfig::Text { description, .. }
            | KnobConfig::NullableText { description, .. }
            | KnobConfig::Number { description, .. }
            | KnobConfig::NullableNumber { description, .. }
            | KnobConfig::Slider { description, .. }
            | KnobConfig::NullableSlider { description, .. }
            | KnobConfig::Options { description, .. } => description.as_deref(),
        }
    }

    /// The knob kind this entry registers
    pub fn to_kind(&self) -> Result<KnobKind, ConfigError> {
        let kind = match self {
            KnobConfig::Boolean { initial, .. } => KnobKind::boolean(*initial),
            KnobConfig::NullableBoolean { initial, .. } => KnobKind::nullable_boolean(*initial),
            KnobConfig::Text { initial, .. } => KnobKind::text(initial.clone()),
            KnobConfig::NullableText { initial, .. } => KnobKind::nullable_text(initial.clone()),
            KnobConfig::Number { initial, .. } => KnobKind::number(*initial),
            KnobConfig::NullableNumber { initial, .. } => KnobKind::nullable_number(*initial),
            KnobConfig::Slider {
                initial,
                min,
                max,
                divisions,
                ..
            } => KnobKind::slider(slider_params(*initial, *min, *max, *divisions)),
            KnobConfig::NullableSlider {
                initial,
                min,
                max,
                divisions,
                ..
            } => KnobKind::nullable_slider(slider_params(*initial, *min, *max, *divisions)),
            KnobConfig::Options { label, options, .. } => {
                let options = options
                    .iter()
                    .map(|(option_label, value)| KnobOption::new(option_label, value.clone()))
                    .collect();
                KnobKind::options(options)
                    .map_err(|e| ConfigError::Config(format!("knob '{label}': {e}")))?
            }
        };
        Ok(kind)
    }
}

fn slider_params(
    initial: Option<f64>,
    min: Option<f64>,
    max: Option<f64>,
    divisions: Option<u32>,
) -> SliderParams {
    SliderParams {
        initial,
        min,
        max,
        divisions,
    }
}

impl MocksConfig {
    /// Load and validate a YAML catalog file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&yaml)?;
        info!(
            "Loaded {} examples from {}",
            config.examples.len(),
            path.display()
        );
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: MocksConfig =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut ids = HashSet::new();
        for example in &self.examples {
            if !ids.insert(example.id.as_str()) {
                return Err(ConfigError::Config(format!(
                    "duplicate example id '{}'",
                    example.id
                )));
            }
            let mut labels = HashSet::new();
            for knob in &example.knobs {
                if !labels.insert(knob.label()) {
                    return Err(ConfigError::Config(format!(
                        "example '{}' declares knob '{}' twice",
                        example.id,
                        knob.label()
                    )));
                }
                knob.to_kind()
                    .map_err(|e| ConfigError::Config(format!("example '{}': {e}", example.id)))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREETING: &str = r#"
examples:
  - id: greeting
    title: Greeting card
    knobs:
      - { kind: text, label: name, initial: World }
      - { kind: boolean, label: shout, initial: false, description: Uppercase }
      - { kind: slider, label: size, min: 8, max: 32 }
      - { kind: nullable_number, label: limit }
      - { kind: options, label: tone, options: [[Warm, warm], [Cool, cool]] }
    presets:
      - { name: Loud, values: { shout: true } }
"#;

    #[test]
    fn parses_greeting_catalog() {
        let config = MocksConfig::from_yaml(GREETING).unwrap();
        let example = &config.examples[0];
        assert_eq!(example.id, "greeting");
        assert_eq!(example.knobs.len(), 5);
        assert_eq!(example.knobs[1].description(), Some("Uppercase"));
        assert_eq!(example.presets[0].values["shout"], Value::Bool(true));

        let slider = example.knobs[2].to_kind().unwrap();
        assert_eq!(slider.value(), Value::Number(8.0));
        let tone = example.knobs[4].to_kind().unwrap();
        assert_eq!(tone.value(), Value::Text("warm".into()));
        assert_eq!(example.knobs[3].to_kind().unwrap().value(), Value::Null);
    }

    #[test]
    fn rejects_empty_options() {
        let yaml = r#"
examples:
  - id: bad
    knobs:
      - { kind: options, label: pick, options: [] }
"#;
        assert!(matches!(
            MocksConfig::from_yaml(yaml),
            Err(ConfigError::Config(_))
        ));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let yaml = "examples:\n  - { id: a }\n  - { id: a }\n";
        assert!(matches!(
            MocksConfig::from_yaml(yaml),
            Err(ConfigError::Config(_))
        ));
    }

    #[test]
    fn rejects_unknown_kind() {
        let yaml = "examples:\n  - { id: a, knobs: [{ kind: color, label: c }] }\n";
        assert!(matches!(
            MocksConfig::from_yaml(yaml),
            Err(ConfigError::Serialization(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            MocksConfig::load(Path::new("/nonexistent/knobs.yaml")),
            Err(ConfigError::Io(_))
        ));
    }
}
