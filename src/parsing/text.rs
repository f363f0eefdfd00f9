//! Plain text parsing and validation.

use std::fs;
use std::path::Path;

use crate::error::{PipelineError, PipelineResult};
use crate::parsing::Validation;
use crate::value::Value;

/// Read the whole file as a single `Text`.
///
/// Invalid byte sequences are replaced rather than rejected; plain text
/// parsing never fails on encoding.
pub fn parse(path: &Path) -> PipelineResult<Value> {
    let bytes = fs::read(path).map_err(|e| PipelineError::ParseFailure {
        message: format!("error reading text file {}: {e}", path.display()),
    })?;
    Ok(Value::Text(String::from_utf8_lossy(&bytes).into_owned()))
}

/// Validate that the value is non-blank text.
pub fn validate(value: &Value) -> Validation {
    let Some(text) = value.as_text() else {
        return Validation::from_errors(vec!["Data is not a string".to_owned()]);
    };

    let mut errors = Vec::new();
    if text.trim().is_empty() {
        errors.push("File is empty".to_owned());
    }
    Validation::from_errors(errors)
}
