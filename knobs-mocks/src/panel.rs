//! Auto-generated control panel, rendered as text

use knobs_core::{Knob, KnobKind, Preset, Value};
use std::fmt::Write;

const LABEL_WIDTH: usize = 14;

/// Render presets and one control row per knob
pub fn render_panel(title: &str, knobs: &[Knob], presets: &[Preset]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {title} ==");

    if !presets.is_empty() {
        let names: Vec<String> = presets
            .iter()
            .map(|preset| {
                if preset.matches(knobs) {
                    format!("*{}*", preset.name)
                } else {
                    preset.name.clone()
                }
            })
            .collect();
        let _ = writeln!(out, "Presets: {}", names.join(" | "));
    }

    for knob in knobs {
        let _ = write!(out, "  {:<LABEL_WIDTH$} {}", knob.label(), control(knob.kind()));
        if let Some(doc) = knob.description() {
            let _ = write!(out, "  ⓘ {doc}");
        }
        out.push('\n');
    }
    out
}

fn control(kind: &KnobKind) -> String {
    match kind {
        KnobKind::Boolean { value } => checkbox(Some(*value)),
        KnobKind::NullableBoolean { value } => checkbox(*value),
        KnobKind::Text { value } => format!("[{value}]"),
        KnobKind::NullableText { value } => match value {
            Some(value) => format!("[{value}]"),
            None => "[ ] (null)".to_string(),
        },
        KnobKind::Number { value } => format!("<{value}>"),
        KnobKind::NullableNumber { value } => match value {
            Some(value) => format!("<{value}>"),
            None => "< > (null)".to_string(),
        },
        KnobKind::Slider { value, bounds } => slider(Some(*value), bounds.min, bounds.max),
        KnobKind::NullableSlider { value, bounds } => slider(*value, bounds.min, bounds.max),
        KnobKind::Options(options) => options
            .options()
            .iter()
            .map(|option| {
                let mark = if option.value == *options.value() {
                    "(•)"
                } else {
                    "( )"
                };
                format!("{mark} {}", option.label)
            })
            .collect::<Vec<_>>()
            .join("  "),
    }
}

fn checkbox(value: Option<bool>) -> String {
    match value {
        Some(true) => "[x]".to_string(),
        Some(false) => "[ ]".to_string(),
        None => "[-] (null)".to_string(),
    }
}

fn slider(value: Option<f64>, min: f64, max: f64) -> String {
    const TRACK: usize = 10;
    let Some(value) = value else {
        return format!("{min} {} {max} (null)", "─".repeat(TRACK));
    };
    let span = max - min;
    let position = if span > 0.0 {
        (((value - min) / span).clamp(0.0, 1.0) * (TRACK - 1) as f64).round() as usize
    } else {
        0
    };
    let track: String = (0..TRACK)
        .map(|i| if i == position { '●' } else { '─' })
        .collect();
    format!("{min} {track} {max} ({})", Value::Number(value))
}
