//! Object-notation serialization.

use crate::error::{PipelineError, PipelineResult};
use crate::value::Value;

/// Serialize a value as pretty-printed object notation (2-space indent).
///
/// `Text` is decoded first when possible, so content that is already object
/// notation is re-encoded instead of double-quoted; text that does not decode
/// becomes a sequence of its lines. Everything else encodes directly.
pub fn transform(value: &Value) -> PipelineResult<String> {
    match value {
        Value::Text(text) => match serde_json::from_str::<Value>(text) {
            Ok(decoded) => encode(&decoded),
            Err(_) => {
                let lines: Vec<Value> = text.trim().split('\n').map(Value::text).collect();
                encode(&Value::Sequence(lines))
            }
        },
        other => encode(other),
    }
}

fn encode(value: &Value) -> PipelineResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| PipelineError::TransformFailure {
        message: format!("cannot convert to json: {e}"),
    })
}
