//! Catalog of examples the mock shell can show

use crate::config::{ConfigError, KnobConfig, MocksConfig};
use crate::mocks;
use knobs_core::{ExampleId, KnobRegistry, Preset};

/// Setup code of a built-in example: reads its knobs, renders a preview
pub type SetupFn = fn(&KnobRegistry) -> String;

enum ExampleSetup {
    Builtin(SetupFn),
    Configured(Vec<KnobConfig>),
}

pub struct MockExample {
    pub id: ExampleId,
    pub title: String,
    pub presets: Vec<Preset>,
    setup: ExampleSetup,
}

impl MockExample {
    pub fn builtin(id: &str, title: &str, setup: SetupFn, presets: Vec<Preset>) -> Self {
        Self {
            id: ExampleId::from(id),
            title: title.to_string(),
            presets,
            setup: ExampleSetup::Builtin(setup),
        }
    }

    /// Run the example's setup against the registry and return its preview.
    pub fn render(&self, knobs: &KnobRegistry) -> String {
        match &self.setup {
            ExampleSetup::Builtin(setup) => setup(knobs),
            ExampleSetup::Configured(configs) => configs
                .iter()
                .filter_map(|config| {
                    // Kinds were validated when the config loaded.
                    let kind = config.to_kind().ok()?;
                    let value = knobs.request_value(config.label(), config.description(), kind);
                    Some(format!("{}={value}", config.label()))
                })
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    pub fn preset(&self, name: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.name == name)
    }
}

pub struct Catalog {
    examples: Vec<MockExample>,
}

impl Catalog {
    /// The built-in component mocks
    pub fn builtin() -> Self {
        Self {
            examples: vec![
                MockExample::builtin(
                    "button",
                    "Button",
                    mocks::button_mock,
                    mocks::button_presets(),
                ),
                MockExample::builtin(
                    "text-input",
                    "TextInput",
                    mocks::text_input_mock,
                    mocks::text_input_presets(),
                ),
                MockExample::builtin("pill", "Pill", mocks::pill_mock, mocks::pill_presets()),
                MockExample::builtin(
                    "error-banner",
                    "ErrorBanner",
                    mocks::error_banner_mock,
                    mocks::error_banner_presets(),
                ),
            ],
        }
    }

    /// Built-in mocks followed by the configured examples
    pub fn with_config(config: MocksConfig) -> Result<Self, ConfigError> {
        let mut catalog = Self::builtin();
        for example in config.examples {
            let id = ExampleId::from(example.id.as_str());
            if catalog.get(&id).is_some() {
                return Err(ConfigError::Config(format!(
                    "example id '{id}' is already used by a built-in mock"
                )));
            }
            catalog.examples.push(MockExample {
                title: example.title.unwrap_or_else(|| example.id.clone()),
                id,
                presets: example.presets,
                setup: ExampleSetup::Configured(example.knobs),
            });
        }
        Ok(catalog)
    }

    pub fn examples(&self) -> &[MockExample] {
        &self.examples
    }

    pub fn get(&self, id: &ExampleId) -> Option<&MockExample> {
        self.examples.iter().find(|e| e.id == *id)
    }
}
