use std::fs;

use formpipe::parsing::{Format, markup};
use formpipe::transform::Target;
use formpipe::value::{Mapping, Value};

fn mapping(entries: Vec<(&str, Value)>) -> Value {
    let mut map = Mapping::new();
    for (key, value) in entries {
        map.insert(key, value);
    }
    Value::Mapping(map)
}

#[test]
fn parse_collects_attributes_children_and_repeats() {
    let value = Format::Markup.parse("tests/fixtures/catalog.xml").unwrap();

    let expected = mapping(vec![
        (
            "@attributes",
            mapping(vec![("version", Value::text("1.2"))]),
        ),
        (
            "book",
            Value::Sequence(vec![
                mapping(vec![
                    ("@attributes", mapping(vec![("id", Value::text("b1"))])),
                    ("title", Value::text("Systems")),
                    ("price", Value::text("12.5")),
                ]),
                mapping(vec![
                    ("@attributes", mapping(vec![("id", Value::text("b2"))])),
                    ("title", Value::text("Networks")),
                    ("price", Value::text("9.0")),
                ]),
            ]),
        ),
        ("updated", Value::text("2024-01-01")),
    ]);
    assert_eq!(value, expected);
}

#[test]
fn parse_text_only_root_becomes_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("note.xml");
    fs::write(&path, "<note>  hello  </note>").unwrap();

    let value = Format::Markup.parse(&path).unwrap();
    assert_eq!(value, Value::text("hello"));
}

#[test]
fn parse_mixed_text_lands_under_text_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mixed.xml");
    fs::write(&path, r#"<note id="1">hello<sub>x</sub></note>"#).unwrap();

    let value = Format::Markup.parse(&path).unwrap();
    let expected = mapping(vec![
        ("@attributes", mapping(vec![("id", Value::text("1"))])),
        ("sub", Value::text("x")),
        ("#text", Value::text("hello")),
    ]);
    assert_eq!(value, expected);
}

#[test]
fn parse_empty_element_is_an_empty_mapping() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.xml");
    fs::write(&path, "<nothing/>").unwrap();

    let value = Format::Markup.parse(&path).unwrap();
    assert_eq!(value, Value::Mapping(Mapping::new()));
}

#[test]
fn parse_malformed_markup_names_the_cause() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.xml");
    fs::write(&path, "<open><unclosed></open>").unwrap();

    let err = Format::Markup.parse(&path).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("parse failure"));
    assert!(msg.contains("invalid xml"));
}

#[test]
fn validate_flags_empty_tags() {
    let value = mapping(vec![
        ("", Value::text("x")),
        ("outer", mapping(vec![("", Value::text("y"))])),
    ]);
    let verdict = markup::validate(&value);
    assert!(!verdict.ok);
    assert_eq!(
        verdict.errors,
        vec!["Empty tag found", "outer.Empty tag found"]
    );
}

#[test]
fn validate_null_top_level() {
    let verdict = markup::validate(&Value::Null);
    assert_eq!(verdict.errors, vec!["Data is null"]);
}

#[test]
fn round_trip_without_attributes_or_mixed_text() {
    let original = mapping(vec![
        ("title", Value::text("Systems")),
        (
            "tags",
            Value::Sequence(vec![Value::text("parsing"), Value::text("markup")]),
        ),
        ("meta", mapping(vec![("lang", Value::text("en"))])),
    ]);

    let serialized = Target::Markup.transform(&original).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("round.xml");
    fs::write(&path, &serialized).unwrap();

    let reparsed = Format::Markup.parse(&path).unwrap();
    assert_eq!(reparsed, original);
}
