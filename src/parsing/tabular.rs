//! Tabular (delimited-row) parsing and validation.

use std::collections::HashSet;
use std::path::Path;

use crate::error::{PipelineError, PipelineResult};
use crate::parsing::Validation;
use crate::value::{Mapping, Value};

/// Parse a delimited file into a `Sequence` of row `Mapping`s.
///
/// Rules:
///
/// - The first row is the header; every data row becomes a `Mapping` keyed by
///   the header cells, in header order.
/// - Every cell stays a raw `Text`, whatever it looks like.
/// - Rows shorter or longer than the header are kept (short rows produce
///   fewer keys, extra cells are dropped); validation reports the mismatch.
/// - A header with no data rows parses to an empty `Sequence`.
pub fn parse(path: &Path) -> PipelineResult<Value> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| parse_failure(path, &e))?;

    let headers = reader
        .headers()
        .map_err(|e| parse_failure(path, &e))?
        .clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| parse_failure(path, &e))?;
        let row: Mapping = headers
            .iter()
            .zip(record.iter())
            .map(|(header, cell)| (header.to_owned(), Value::text(cell)))
            .collect();
        rows.push(Value::Mapping(row));
    }

    Ok(Value::Sequence(rows))
}

fn parse_failure(path: &Path, cause: &dyn std::fmt::Display) -> PipelineError {
    PipelineError::ParseFailure {
        message: format!("error parsing csv file {}: {cause}", path.display()),
    }
}

/// Validate that the value is a uniform list of records.
///
/// Reports one finding per row whose key set differs from the first row's
/// (rows are 1-indexed counting from the header, so the first data row after
/// it is row 2), then one finding per empty cell.
pub fn validate(value: &Value) -> Validation {
    let not_records = || Validation::from_errors(vec!["Data is not a list of records".to_owned()]);

    let Some(rows) = value.as_sequence() else {
        return not_records();
    };
    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        match row.as_mapping() {
            Some(record) => records.push(record),
            None => return not_records(),
        }
    }

    let mut errors = Vec::new();
    if records.len() > 1 {
        let header: HashSet<&str> = records[0].keys().collect();
        for (i, record) in records.iter().enumerate().skip(1) {
            let fields: HashSet<&str> = record.keys().collect();
            if fields != header {
                errors.push(format!("Row {} has different fields than the header", i + 1));
            }
        }
    }
    for (i, record) in records.iter().enumerate() {
        for (field, cell) in record.iter() {
            if matches!(cell, Value::Text(t) if t.is_empty()) {
                errors.push(format!("Empty value in row {}, field '{field}'", i + 1));
            }
        }
    }

    Validation::from_errors(errors)
}
