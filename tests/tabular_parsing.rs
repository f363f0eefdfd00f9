use std::fs;

use formpipe::parsing::{Format, tabular};
use formpipe::value::{Mapping, Value};

fn record(entries: &[(&str, &str)]) -> Value {
    let mut map = Mapping::new();
    for (key, value) in entries {
        map.insert(*key, Value::text(*value));
    }
    Value::Mapping(map)
}

#[test]
fn parse_happy_path() {
    let value = Format::Tabular.parse("tests/fixtures/people.csv").unwrap();

    let rows = value.as_sequence().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[0],
        record(&[("id", "1"), ("name", "Ada"), ("city", "London")])
    );
    assert_eq!(
        rows[1],
        record(&[("id", "2"), ("name", "Grace"), ("city", "Washington")])
    );
}

#[test]
fn parse_keeps_cells_as_raw_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("typed.csv");
    fs::write(&path, "id,active\n1,true\n").unwrap();

    let value = Format::Tabular.parse(&path).unwrap();
    let rows = value.as_sequence().unwrap();
    let row = rows[0].as_mapping().unwrap();
    assert_eq!(row.get("id"), Some(&Value::text("1")));
    assert_eq!(row.get("active"), Some(&Value::text("true")));
}

#[test]
fn parse_header_only_file_yields_empty_sequence() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    fs::write(&path, "id,name\n").unwrap();

    let value = Format::Tabular.parse(&path).unwrap();
    assert_eq!(value, Value::Sequence(Vec::new()));

    let verdict = Format::Tabular.validate(&value);
    assert!(verdict.ok);
    assert!(verdict.errors.is_empty());
}

#[test]
fn parse_missing_file_is_a_parse_failure() {
    let err = Format::Tabular.parse("tests/fixtures/nope.csv").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("parse failure"));
    assert!(msg.contains("nope.csv"));
}

#[test]
fn validate_well_formed_input_is_ok() {
    let value = Format::Tabular.parse("tests/fixtures/people.csv").unwrap();
    let verdict = Format::Tabular.validate(&value);
    assert!(verdict.ok);
    assert!(verdict.errors.is_empty());
}

#[test]
fn validate_flags_empty_cells() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gaps.csv");
    fs::write(&path, "id,name\n1,\n2,Grace\n").unwrap();

    let value = Format::Tabular.parse(&path).unwrap();
    let verdict = Format::Tabular.validate(&value);
    assert!(!verdict.ok);
    assert_eq!(verdict.errors, vec!["Empty value in row 1, field 'name'"]);
}

#[test]
fn validate_flags_rows_with_different_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ragged.csv");
    fs::write(&path, "id,name\n1,Ada\n2\n").unwrap();

    let value = Format::Tabular.parse(&path).unwrap();
    let verdict = Format::Tabular.validate(&value);
    assert!(!verdict.ok);
    assert_eq!(
        verdict.errors,
        vec!["Row 2 has different fields than the header"]
    );
}

#[test]
fn validate_rejects_non_record_shapes() {
    let verdict = tabular::validate(&Value::text("not a table"));
    assert!(!verdict.ok);
    assert_eq!(verdict.errors, vec!["Data is not a list of records"]);

    let verdict = tabular::validate(&Value::Sequence(vec![Value::text("bare")]));
    assert_eq!(verdict.errors, vec!["Data is not a list of records"]);
}

#[test]
fn validate_reports_field_mismatches_before_empty_values() {
    let rows = Value::Sequence(vec![
        record(&[("id", "1"), ("name", "")]),
        record(&[("id", "2")]),
    ]);
    let verdict = tabular::validate(&rows);
    assert_eq!(
        verdict.errors,
        vec![
            "Row 2 has different fields than the header",
            "Empty value in row 1, field 'name'",
        ]
    );
}
