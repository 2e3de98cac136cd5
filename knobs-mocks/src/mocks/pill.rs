//! Pill mock

use knobs_core::{KnobRegistry, Preset};

const DISC_ID: &str = "XzPS7vW.HPHsYemQh0HBUGr8vuU-";

pub fn pill_mock(knobs: &KnobRegistry) -> String {
    let variant = knobs.options(
        "variant",
        None,
        vec![("Muted", "muted".to_string()), ("Link", "link".to_string())],
    );
    let monospace = knobs.boolean("monospace", None, false);
    let has_link = knobs.boolean("has_link", Some("Wrap the pill in a link"), false);

    let label = if monospace { DISC_ID } else { "Example Token" };
    let pill = format!("({label})");
    match (variant.as_str(), has_link) {
        ("link", true) => format!("{pill} -> https://musicbrainz.org/cdtoc/{DISC_ID}"),
        ("link", false) => format!("{pill} link"),
        _ => pill,
    }
}

pub fn pill_presets() -> Vec<Preset> {
    vec![
        Preset::new("Token (Muted)"),
        Preset::new("Link Pill")
            .set_string("variant", "link")
            .set_bool("has_link", true),
        Preset::new("Disc ID")
            .set_string("variant", "link")
            .set_bool("monospace", true)
            .set_bool("has_link", true),
    ]
}
