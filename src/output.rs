//! Console and file rendering of parsed values.
//!
//! Rendering adapts to the source format: object-notation shapes pretty-print
//! as object notation, tabular record sequences render as an aligned table,
//! plain text prints raw, and everything else falls back to the generic
//! string form.

use std::collections::BTreeSet;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::error::PipelineResult;
use crate::parsing::Format;
use crate::value::{Mapping, Value};

/// Render a value to standard output.
pub fn print_to_console(value: &Value, format: Format) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    render_to_writer(&mut handle, value, format)
}

/// Render a value into any writer.
pub fn render_to_writer<W: Write>(writer: &mut W, value: &Value, format: Format) -> io::Result<()> {
    match value {
        Value::Text(text) => writeln!(writer, "{text}"),
        Value::Mapping(_) | Value::Sequence(_) if format == Format::ObjectNotation => {
            match serde_json::to_string_pretty(value) {
                Ok(pretty) => writeln!(writer, "{pretty}"),
                Err(_) => writeln!(writer, "{value}"),
            }
        }
        Value::Sequence(items)
            if format == Format::Tabular
                && items.first().is_some_and(|first| first.as_mapping().is_some()) =>
        {
            render_table(writer, items)
        }
        other => writeln!(writer, "{other}"),
    }
}

/// Aligned column table: headers are the sorted union of record keys, each
/// column as wide as its widest cell, a dash rule under the header row.
/// Missing keys render as blank cells.
fn render_table<W: Write>(writer: &mut W, rows: &[Value]) -> io::Result<()> {
    let records: Vec<&Mapping> = rows.iter().filter_map(Value::as_mapping).collect();

    let mut headers = BTreeSet::new();
    for record in &records {
        headers.extend(record.keys());
    }
    let headers: Vec<&str> = headers.into_iter().collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    let mut table: Vec<Vec<String>> = Vec::with_capacity(records.len());
    for record in &records {
        let cells: Vec<String> = headers
            .iter()
            .map(|header| record.get(header).map(Value::to_string).unwrap_or_default())
            .collect();
        for (width, cell) in widths.iter_mut().zip(&cells) {
            *width = (*width).max(cell.chars().count());
        }
        table.push(cells);
    }

    let header_row = headers
        .iter()
        .zip(widths.iter().copied())
        .map(|(header, width)| format!("{header:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ");
    writeln!(writer, "{header_row}")?;
    writeln!(writer, "{}", "-".repeat(header_row.chars().count()))?;

    for cells in &table {
        let line = cells
            .iter()
            .zip(widths.iter().copied())
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join(" | ");
        writeln!(writer, "{line}")?;
    }
    Ok(())
}

/// Write a value to a file: `Text` verbatim, object-notation shapes
/// pretty-printed, anything else via its string form.
pub fn write_to_file(value: &Value, path: impl AsRef<Path>, format: Format) -> PipelineResult<()> {
    let rendered = match value {
        Value::Text(text) => text.clone(),
        Value::Mapping(_) | Value::Sequence(_) if format == Format::ObjectNotation => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        other => other.to_string(),
    };
    fs::write(path, rendered)?;
    Ok(())
}
