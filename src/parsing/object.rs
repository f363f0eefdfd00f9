//! Object-notation parsing and validation.

use std::fs;
use std::path::Path;

use crate::error::{PipelineError, PipelineResult};
use crate::parsing::{Validation, walk_empty_keys};
use crate::value::Value;

/// Decode an object-notation file directly into a [`Value`].
///
/// Numeric and boolean literals keep their native variants and mapping keys
/// keep document order, so a later re-encode round-trips without stringifying
/// anything.
pub fn parse(path: &Path) -> PipelineResult<Value> {
    let text = fs::read_to_string(path).map_err(|e| PipelineError::ParseFailure {
        message: format!("error reading json file {}: {e}", path.display()),
    })?;
    serde_json::from_str(&text).map_err(|e| PipelineError::ParseFailure {
        message: format!("invalid json in {}: {e}", path.display()),
    })
}

/// Walk the value and flag empty mapping keys.
///
/// A top-level `Null` is invalid outright. Mappings are walked recursively;
/// mappings sitting directly inside a top-level `Sequence` are walked with an
/// `Item {i}: ` prefix (0-indexed). Deeper sequences are not descended into.
pub fn validate(value: &Value) -> Validation {
    if value.is_null() {
        return Validation::from_errors(vec!["Data is null".to_owned()]);
    }

    let mut errors = Vec::new();
    match value {
        Value::Mapping(map) => walk_empty_keys(map, "", "Empty key found", &mut errors),
        Value::Sequence(items) => {
            for (i, item) in items.iter().enumerate() {
                if let Value::Mapping(map) = item {
                    walk_empty_keys(map, &format!("Item {i}: "), "Empty key found", &mut errors);
                }
            }
        }
        _ => {}
    }

    Validation::from_errors(errors)
}
