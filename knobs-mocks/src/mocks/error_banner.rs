//! ErrorBanner mock

use knobs_core::{KnobRegistry, Preset};

pub fn error_banner_mock(knobs: &KnobRegistry) -> String {
    let heading = knobs.text("heading", None, "Import failed");
    let detail = knobs.text("detail", None, "Connection timed out after 30s");
    let button_label = knobs.text("button_label", Some("Retry button caption"), "Retry Import");

    format!("! {heading}: {detail} [ {button_label} ]")
}

pub fn error_banner_presets() -> Vec<Preset> {
    vec![
        Preset::new("Import Failed"),
        Preset::new("Lookup Failed")
            .set_string("heading", "Lookup failed")
            .set_string("detail", "MusicBrainz API returned 503 Service Unavailable")
            .set_string("button_label", "Retry Lookup"),
        Preset::new("Long Error")
            .set_string("heading", "Import failed")
            .set_string(
                "detail",
                "Failed to write file: Permission denied (os error 13) while writing to /Volumes/Music/Library/Artist/Album/01 - Track.flac",
            )
            .set_string("button_label", "Retry Import"),
    ]
}
