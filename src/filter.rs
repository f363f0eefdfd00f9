//! The query evaluator: regex filtering over parsed values.
//!
//! Filtering never mutates its input — it builds a reduced copy, so a caller
//! can keep the pre-filter value for comparison. One default strategy covers
//! every format except plain text, which always works on raw lines.

use regex::Regex;

use crate::error::{PipelineError, PipelineResult};
use crate::parsing::Format;
use crate::value::Value;

/// Apply `query` to `value`, producing a reduced value.
///
/// The query is an unanchored regular expression; an invalid pattern is a
/// [`PipelineError::FilterFailure`].
pub fn apply(format: Format, value: &Value, query: &str) -> PipelineResult<Value> {
    let pattern = Regex::new(query).map_err(|e| PipelineError::FilterFailure {
        message: format!("invalid query pattern '{query}': {e}"),
    })?;

    match format {
        Format::PlainText => Ok(filter_raw_lines(value, &pattern)),
        _ => Ok(filter_default(value, &pattern)),
    }
}

/// Default strategy: a `Sequence` keeps matching elements, a `Mapping` keeps
/// pairs whose value matches, a `Text` keeps matching lines; scalars pass
/// through unchanged.
fn filter_default(value: &Value, pattern: &Regex) -> Value {
    match value {
        Value::Sequence(items) => Value::Sequence(
            items
                .iter()
                .filter(|item| matches(item, pattern))
                .cloned()
                .collect(),
        ),
        Value::Mapping(map) => Value::Mapping(
            map.iter()
                .filter(|(_, v)| pattern.is_match(&v.to_string()))
                .map(|(k, v)| (k.to_owned(), v.clone()))
                .collect(),
        ),
        Value::Text(text) => Value::Text(filter_lines(text, pattern)),
        other => other.clone(),
    }
}

/// Plain-text override: filter the raw lines of a `Text`; anything else
/// passes through unchanged.
fn filter_raw_lines(value: &Value, pattern: &Regex) -> Value {
    match value {
        Value::Text(text) => Value::Text(filter_lines(text, pattern)),
        other => other.clone(),
    }
}

/// Whether an item matches: a `Mapping` matches when the pattern searches
/// successfully against the string form of any of its values, a `Sequence`
/// against any element, anything else against its own string form.
fn matches(item: &Value, pattern: &Regex) -> bool {
    match item {
        Value::Mapping(map) => map.values().any(|v| pattern.is_match(&v.to_string())),
        Value::Sequence(items) => items.iter().any(|v| pattern.is_match(&v.to_string())),
        other => pattern.is_match(&other.to_string()),
    }
}

fn filter_lines(text: &str, pattern: &Regex) -> String {
    text.split('\n')
        .filter(|line| pattern.is_match(line))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::apply;
    use crate::parsing::Format;
    use crate::value::{Mapping, Value};

    fn record(entries: &[(&str, &str)]) -> Value {
        let mut map = Mapping::new();
        for (key, value) in entries {
            map.insert(*key, Value::text(*value));
        }
        Value::Mapping(map)
    }

    fn sample_rows() -> Value {
        Value::Sequence(vec![
            record(&[("name", "Ada"), ("city", "London")]),
            record(&[("name", "Grace"), ("city", "Washington")]),
            record(&[("name", "Edsger"), ("city", "Austin")]),
        ])
    }

    #[test]
    fn sequence_keeps_elements_with_any_matching_value() {
        let out = apply(Format::Tabular, &sample_rows(), "London").unwrap();
        assert_eq!(
            out,
            Value::Sequence(vec![record(&[("name", "Ada"), ("city", "London")])])
        );
        // Original untouched.
        assert_eq!(sample_rows().as_sequence().unwrap().len(), 3);
    }

    #[test]
    fn mapping_keeps_pairs_with_matching_values() {
        let config = record(&[("host", "localhost"), ("mode", "verbose")]);
        let out = apply(Format::ObjectNotation, &config, "^local").unwrap();
        assert_eq!(out, record(&[("host", "localhost")]));
    }

    #[test]
    fn text_keeps_matching_lines() {
        let text = Value::text("alpha\nbeta\ngamma");
        let out = apply(Format::Log, &text, "a$").unwrap();
        assert_eq!(out, Value::text("alpha\nbeta\ngamma"));

        let out = apply(Format::Log, &text, "^b").unwrap();
        assert_eq!(out, Value::text("beta"));
    }

    #[test]
    fn plain_text_override_only_touches_text() {
        let rows = sample_rows();
        let out = apply(Format::PlainText, &rows, "London").unwrap();
        assert_eq!(out, rows);

        let text = Value::text("keep this\ndrop that");
        let out = apply(Format::PlainText, &text, "keep").unwrap();
        assert_eq!(out, Value::text("keep this"));
    }

    #[test]
    fn filtering_is_idempotent() {
        let once = apply(Format::Tabular, &sample_rows(), "o").unwrap();
        let twice = apply(Format::Tabular, &once, "o").unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn invalid_pattern_is_a_filter_failure() {
        let err = apply(Format::Tabular, &sample_rows(), "[unclosed").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("filter failure"));
        assert!(msg.contains("[unclosed"));
    }

    #[test]
    fn scalars_pass_through_unchanged() {
        let out = apply(Format::ObjectNotation, &Value::Number(42.0), "anything").unwrap();
        assert_eq!(out, Value::Number(42.0));
    }
}
