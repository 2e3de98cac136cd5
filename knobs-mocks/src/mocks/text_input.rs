//! TextInput mock

use knobs_core::{KnobRegistry, Preset, SliderParams};

const MIN_WIDTH: f64 = 8.0;
const MAX_WIDTH: f64 = 48.0;

pub fn text_input_mock(knobs: &KnobRegistry) -> String {
    let value = knobs.text("value", None, "The Midnight Signal");
    let placeholder = knobs.nullable_text("placeholder", None, Some("Enter text..."));
    let disabled = knobs.boolean("disabled", None, false);
    let width = knobs.slider(
        "width",
        Some("Field width in characters"),
        SliderParams::new()
            .initial(24.0)
            .min(MIN_WIDTH)
            .max(MAX_WIDTH)
            .divisions(10),
    );
    let max_length = knobs.nullable_number("max_length", Some("Truncate input"), None);

    let width = width.round().clamp(MIN_WIDTH, MAX_WIDTH) as usize;
    let mut shown = if value.is_empty() {
        placeholder.unwrap_or_default()
    } else {
        value
    };
    if let Some(max) = max_length {
        shown = shown.chars().take(max.max(0.0) as usize).collect();
    }
    let shown: String = shown.chars().take(width).collect();
    let field = format!("|{shown:<width$}|");
    if disabled {
        format!("{field} (disabled)")
    } else {
        field
    }
}

pub fn text_input_presets() -> Vec<Preset> {
    vec![
        Preset::new("Default"),
        Preset::new("Empty").set_string("value", ""),
        Preset::new("Disabled").set_bool("disabled", true),
        Preset::new("No Placeholder")
            .set_string("value", "")
            .set("placeholder", None::<String>),
    ]
}
