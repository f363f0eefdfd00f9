//! Plain text serialization. Never fails.

use crate::value::Value;

/// Render a value as plain text.
///
/// `Text` passes through unchanged; a `Sequence` renders one element's string
/// form per line; a `Mapping` renders as pretty object notation when it
/// encodes, falling back to its string form; scalars use their string form.
pub fn transform(value: &Value) -> String {
    match value {
        Value::Text(text) => text.clone(),
        Value::Sequence(items) => items
            .iter()
            .map(Value::to_string)
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Mapping(_) => serde_json::to_string_pretty(value)
            .unwrap_or_else(|_| value.to_string()),
        other => other.to_string(),
    }
}
