//! Log parsing: heuristic line-pattern detection.
//!
//! A log file has no declared structure, so parsing samples the file against
//! a fixed, ordered list of candidate line patterns and commits to the first
//! one that matches enough of the sample. This is a heuristic classifier with
//! an arbitrary threshold, not a guaranteed format detector — a file whose
//! first lines are unrepresentative can be classified wrong.

use std::fs;
use std::path::Path;

use regex::Regex;

use crate::error::{PipelineError, PipelineResult};
use crate::parsing::Validation;
use crate::value::{Mapping, Value};

/// Candidate line patterns, tried in order: first the combined access-log
/// shape (client address, user, timestamp, request, status, size), then a
/// timestamp/level/message application-log shape.
const LINE_PATTERNS: [&str; 2] = [
    r#"(?P<ip>\d+\.\d+\.\d+\.\d+) - (?P<user>.*?) \[(?P<datetime>.*?)\] "(?P<request>.*?)" (?P<status>\d+) (?P<size>\d+)"#,
    r"(?P<datetime>\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}(,\d+)?)\s+(?P<level>\w+)\s+(?P<message>.*)",
];

/// A candidate is committed when it matches at least this fraction of the
/// sampled lines.
const MATCH_RATIO: f64 = 0.7;

/// At most this many lines are sampled from the top of the file.
const SAMPLE_LINES: usize = 10;

/// Parse a log file into a `Sequence` of per-line records.
///
/// With a committed pattern, every line becomes a `Mapping` — its named
/// captures on a match, `{"raw": line}` otherwise. When no candidate reaches
/// the ratio, the lines are returned as a `Sequence` of `Text` instead.
/// Invalid byte sequences are replaced rather than rejected.
pub fn parse(path: &Path) -> PipelineResult<Value> {
    let bytes = fs::read(path).map_err(|e| PipelineError::ParseFailure {
        message: format!("error reading log file {}: {e}", path.display()),
    })?;
    let content = String::from_utf8_lossy(&bytes);
    let lines: Vec<&str> = content.trim().split('\n').collect();

    for pattern in LINE_PATTERNS {
        let re = Regex::new(pattern).map_err(|e| PipelineError::ParseFailure {
            message: format!("invalid log line pattern: {e}"),
        })?;
        if let Some(records) = try_pattern(&lines, &re) {
            return Ok(Value::Sequence(records));
        }
    }

    Ok(Value::Sequence(lines.into_iter().map(Value::text).collect()))
}

/// Commit to `re` if it matches enough of the sample, then re-match every
/// line of the file with it.
fn try_pattern(lines: &[&str], re: &Regex) -> Option<Vec<Value>> {
    let sample = lines.len().min(SAMPLE_LINES);
    let hits = lines[..sample].iter().filter(|line| re.is_match(line)).count();
    if (hits as f64) < (sample as f64) * MATCH_RATIO {
        return None;
    }

    let names: Vec<&str> = re.capture_names().flatten().collect();
    let records = lines
        .iter()
        .map(|line| {
            let mut record = Mapping::new();
            match re.captures(line) {
                Some(captures) => {
                    for name in &names {
                        if let Some(group) = captures.name(name) {
                            record.insert(*name, Value::text(group.as_str()));
                        }
                    }
                }
                None => record.insert("raw", Value::text(*line)),
            }
            Value::Mapping(record)
        })
        .collect();
    Some(records)
}

/// Validate that the value is a non-empty list of entries.
///
/// An empty list is flagged but parse itself never produces an error for an
/// empty file; the caller decides how hard to treat the finding.
pub fn validate(value: &Value) -> Validation {
    let Some(entries) = value.as_sequence() else {
        return Validation::from_errors(vec!["Data is not a list of log entries".to_owned()]);
    };

    let mut errors = Vec::new();
    if entries.is_empty() {
        errors.push("No log entries found".to_owned());
    }
    Validation::from_errors(errors)
}
