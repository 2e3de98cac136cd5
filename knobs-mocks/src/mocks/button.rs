//! Button mock

use knobs_core::{KnobRegistry, Preset};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ButtonVariant {
    Primary,
    Secondary,
    Danger,
    Ghost,
}

pub fn button_mock(knobs: &KnobRegistry) -> String {
    let variant = knobs.options(
        "variant",
        None,
        vec![
            ("Primary", "primary".to_string()),
            ("Secondary", "secondary".to_string()),
            ("Danger", "danger".to_string()),
            ("Ghost", "ghost".to_string()),
        ],
    );
    let small = knobs.boolean("small", Some("Small size"), false);
    let disabled = knobs.boolean("disabled", None, false);
    let loading = knobs.boolean("loading", None, false);
    let custom_label = knobs.nullable_text("label", Some("Overrides the variant's label"), None);

    let variant = match variant.as_str() {
        "secondary" => ButtonVariant::Secondary,
        "danger" => ButtonVariant::Danger,
        "ghost" => ButtonVariant::Ghost,
        _ => ButtonVariant::Primary,
    };

    let label = if loading {
        "Loading...".to_string()
    } else {
        custom_label.unwrap_or_else(|| {
            match variant {
                ButtonVariant::Primary => "Save Changes",
                ButtonVariant::Secondary => "Cancel",
                ButtonVariant::Danger => "Delete",
                ButtonVariant::Ghost => "Learn More",
            }
            .to_string()
        })
    };

    let mut flags = Vec::new();
    if small {
        flags.push("small");
    }
    if disabled {
        flags.push("disabled");
    }
    format!("[ {label} ] {variant:?} {}", flags.join(" "))
        .trim_end()
        .to_string()
}

pub fn button_presets() -> Vec<Preset> {
    vec![
        Preset::new("Default"),
        Preset::new("Primary Small")
            .set_string("variant", "primary")
            .set_bool("small", true),
        Preset::new("Danger Disabled")
            .set_string("variant", "danger")
            .set_bool("disabled", true),
        Preset::new("Loading")
            .set_string("variant", "primary")
            .set_bool("loading", true),
    ]
}
