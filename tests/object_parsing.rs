use std::fs;

use formpipe::parsing::{Format, object};
use formpipe::value::Value;

#[test]
fn parse_preserves_types_and_key_order() {
    let value = Format::ObjectNotation
        .parse("tests/fixtures/config.json")
        .unwrap();

    let map = value.as_mapping().unwrap();
    assert_eq!(
        map.keys().collect::<Vec<_>>(),
        vec!["service", "port", "debug", "limits"]
    );
    assert_eq!(map.get("service"), Some(&Value::text("ingest")));
    assert_eq!(map.get("port"), Some(&Value::Number(8080.0)));
    assert_eq!(map.get("debug"), Some(&Value::Bool(true)));

    let limits = map.get("limits").unwrap().as_mapping().unwrap();
    assert_eq!(limits.get("rows"), Some(&Value::Number(100.0)));
    assert!(limits.get("note").unwrap().is_null());
}

#[test]
fn parse_malformed_input_names_the_cause() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{\"a\": ").unwrap();

    let err = Format::ObjectNotation.parse(&path).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("parse failure"));
    assert!(msg.contains("invalid json"));
}

#[test]
fn validate_null_top_level() {
    let verdict = object::validate(&Value::Null);
    assert!(!verdict.ok);
    assert_eq!(verdict.errors, vec!["Data is null"]);
}

#[test]
fn validate_flags_empty_keys_with_dotted_prefixes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keys.json");
    fs::write(&path, r#"{"": "x", "outer": {"": "y"}}"#).unwrap();

    let value = Format::ObjectNotation.parse(&path).unwrap();
    let verdict = Format::ObjectNotation.validate(&value);
    assert!(!verdict.ok);
    assert_eq!(
        verdict.errors,
        vec!["Empty key found", "outer.Empty key found"]
    );
}

#[test]
fn validate_prefixes_top_level_sequence_items() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("items.json");
    fs::write(&path, r#"[{"": 1}, "plain", {"ok": {"": 2}}]"#).unwrap();

    let value = Format::ObjectNotation.parse(&path).unwrap();
    let verdict = Format::ObjectNotation.validate(&value);
    assert_eq!(
        verdict.errors,
        vec!["Item 0: Empty key found", "Item 2: ok.Empty key found"]
    );
}

#[test]
fn validate_scalar_values_are_ok() {
    let verdict = object::validate(&Value::Number(3.0));
    assert!(verdict.ok);
}

#[test]
fn round_trip_through_object_notation_target() {
    let value = Format::ObjectNotation
        .parse("tests/fixtures/config.json")
        .unwrap();

    let encoded = formpipe::transform::Target::ObjectNotation
        .transform(&value)
        .unwrap();
    let decoded: Value = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, value);
}
