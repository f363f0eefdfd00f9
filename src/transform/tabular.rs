//! Tabular serialization.

use std::collections::BTreeSet;

use crate::error::{PipelineError, PipelineResult};
use crate::value::{Mapping, Value};

/// Serialize a value as delimited rows.
///
/// - A `Sequence` of `Mapping`s emits a header of the alphabetically sorted
///   union of all keys, then one row per record; a missing key is an empty
///   cell.
/// - A bare `Mapping` is treated as a one-record sequence.
/// - Any other `Sequence` emits a single column, one row per element.
/// - `Text` splits into lines and uses the single-column path.
/// - Scalars cannot be expressed as a table and fail.
pub fn transform(value: &Value) -> PipelineResult<String> {
    match value {
        Value::Sequence(items) if items.iter().all(|item| item.as_mapping().is_some()) => {
            let records: Vec<&Mapping> = items.iter().filter_map(Value::as_mapping).collect();
            records_to_csv(&records)
        }
        Value::Mapping(map) => records_to_csv(&[map]),
        Value::Sequence(items) => single_column(items.iter().map(Value::to_string)),
        Value::Text(text) => single_column(text.trim().split('\n')),
        other => Err(PipelineError::TransformFailure {
            message: format!("cannot convert {} to csv", other.kind()),
        }),
    }
}

fn records_to_csv(records: &[&Mapping]) -> PipelineResult<String> {
    if records.is_empty() {
        return Ok(String::new());
    }

    let mut fields = BTreeSet::new();
    for record in records {
        fields.extend(record.keys());
    }
    let fields: Vec<&str> = fields.into_iter().collect();

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&fields).map_err(write_failure)?;
    for record in records {
        let row: Vec<String> = fields
            .iter()
            .map(|field| record.get(field).map(Value::to_string).unwrap_or_default())
            .collect();
        writer.write_record(&row).map_err(write_failure)?;
    }
    into_string(writer)
}

fn single_column<I>(cells: I) -> PipelineResult<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    for cell in cells {
        writer.write_record([cell.as_ref()]).map_err(write_failure)?;
    }
    into_string(writer)
}

fn into_string(writer: csv::Writer<Vec<u8>>) -> PipelineResult<String> {
    let bytes = writer.into_inner().map_err(|e| PipelineError::TransformFailure {
        message: format!("csv write error: {e}"),
    })?;
    String::from_utf8(bytes).map_err(|e| PipelineError::TransformFailure {
        message: format!("csv output is not valid utf-8: {e}"),
    })
}

fn write_failure(e: csv::Error) -> PipelineError {
    PipelineError::TransformFailure {
        message: format!("csv write error: {e}"),
    }
}
