use knobs_common::ExampleId;
use knobs_mocks::{Catalog, ConfigError, MockSession, MocksConfig};
use std::io::Write;
use tempfile::NamedTempFile;

const GREETING: &str = r#"
examples:
  - id: greeting
    title: Greeting card
    knobs:
      - { kind: text, label: name, initial: World }
      - { kind: boolean, label: shout, initial: false, description: Uppercase }
      - { kind: slider, label: size, min: 8, max: 32 }
      - { kind: options, label: tone, options: [[Warm, warm], [Cool, cool]] }
    presets:
      - { name: Loud, values: { shout: true } }
"#;

fn write_config(yaml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();
    file
}

fn greeting_session() -> MockSession {
    let file = write_config(GREETING);
    let config = MocksConfig::load(file.path()).unwrap();
    let catalog = Catalog::with_config(config).unwrap();
    MockSession::new(catalog)
}

#[test]
fn configured_example_renders_its_knobs() {
    let mut session = greeting_session();
    session.show(&ExampleId::from("greeting")).unwrap();

    assert_eq!(session.preview(), "name=World shout=false size=8 tone=warm");
    let panel = session.panel().unwrap();
    assert!(panel.starts_with("== Greeting card =="));
    assert!(panel.contains("ⓘ Uppercase"));
}

#[test]
fn shared_link_then_edits() {
    let mut session = greeting_session();
    session.registry().apply_url_args("name:Ada;");
    session.show(&ExampleId::from("greeting")).unwrap();
    assert_eq!(session.preview(), "name=Ada shout=false size=8 tone=warm");

    session.set("tone", "Cool").unwrap();
    session.set("size", "20").unwrap();
    assert_eq!(session.preview(), "name=Ada shout=false size=20 tone=cool");
    assert_eq!(session.registry().build_url_args(), "name:Ada;");
}

#[test]
fn preset_is_marked_when_active() {
    let mut session = greeting_session();
    session.show(&ExampleId::from("greeting")).unwrap();
    session.set("name", "Grace").unwrap();

    session.apply_preset("Loud").unwrap();
    assert_eq!(session.preview(), "name=World shout=true size=8 tone=warm");
    assert!(session.panel().unwrap().contains("*Loud*"));
}

#[test]
fn snapshot_serializes_knobs() {
    let mut session = greeting_session();
    session.show(&ExampleId::from("greeting")).unwrap();

    let json = serde_json::to_value(session.snapshot().unwrap()).unwrap();
    assert_eq!(json["example"], "greeting");
    assert_eq!(json["knobs"].as_array().unwrap().len(), 4);
    assert_eq!(json["knobs"][0]["label"], "name");
    assert_eq!(json["knobs"][0]["kind"], "text");
}

#[test]
fn invalid_yaml_is_a_serialization_error() {
    let file = write_config("examples: [ { id: ");
    assert!(matches!(
        MocksConfig::load(file.path()),
        Err(ConfigError::Serialization(_))
    ));
}
