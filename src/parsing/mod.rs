//! Format registry and the per-format parsers.
//!
//! [`Format`] is the closed set of supported source formats. Resolve one from
//! a name with [`Format::from_name`] (or a file extension with
//! [`Format::from_extension`]), then drive the pipeline through its methods:
//!
//! - [`Format::parse`]: file bytes → [`crate::value::Value`]
//! - [`Format::validate`]: structural verdict, never fails
//! - [`Format::filter`]: query evaluation via [`crate::filter`]
//!
//! Formats are stateless and `Copy`; a single value is safe to share across
//! calls and threads.

pub mod log;
pub mod markup;
pub mod object;
pub mod tabular;
pub mod text;

use std::path::Path;

use crate::error::{PipelineError, PipelineResult};
use crate::filter;
use crate::value::{Mapping, Value};

/// Verdict returned by structural validation.
///
/// `ok` is true exactly when `errors` is empty. Validation never fails with
/// an error; the caller decides whether a non-empty error list is terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    /// Whether the value passed all checks.
    pub ok: bool,
    /// Human-readable findings, in document order.
    pub errors: Vec<String>,
}

impl Validation {
    /// Build a verdict from a list of findings.
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            ok: errors.is_empty(),
            errors,
        }
    }
}

/// Supported source formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Delimited-row tables (`csv`).
    Tabular,
    /// Structured object notation (`json`).
    ObjectNotation,
    /// Attribute-bearing element trees (`xml`).
    Markup,
    /// Unstructured text (`txt`).
    PlainText,
    /// Heuristically-parsed log lines (`log`).
    Log,
}

impl Format {
    /// Resolve a format from its name, case-insensitively.
    ///
    /// Accepted names are `csv`, `json`, `xml`, `txt` and `log`; anything
    /// else is [`PipelineError::UnsupportedFormat`].
    pub fn from_name(name: &str) -> PipelineResult<Self> {
        match name.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Tabular),
            "json" => Ok(Self::ObjectNotation),
            "xml" => Ok(Self::Markup),
            "txt" => Ok(Self::PlainText),
            "log" => Ok(Self::Log),
            _ => Err(PipelineError::UnsupportedFormat {
                name: name.to_owned(),
            }),
        }
    }

    /// Resolve a format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::from_name(ext).ok()
    }

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Tabular => "csv",
            Self::ObjectNotation => "json",
            Self::Markup => "xml",
            Self::PlainText => "txt",
            Self::Log => "log",
        }
    }

    /// Parse the file at `path` into a [`Value`].
    pub fn parse(self, path: impl AsRef<Path>) -> PipelineResult<Value> {
        let path = path.as_ref();
        match self {
            Self::Tabular => tabular::parse(path),
            Self::ObjectNotation => object::parse(path),
            Self::Markup => markup::parse(path),
            Self::PlainText => text::parse(path),
            Self::Log => log::parse(path),
        }
    }

    /// Structurally validate a parsed value.
    pub fn validate(self, value: &Value) -> Validation {
        match self {
            Self::Tabular => tabular::validate(value),
            Self::ObjectNotation => object::validate(value),
            Self::Markup => markup::validate(value),
            Self::PlainText => text::validate(value),
            Self::Log => log::validate(value),
        }
    }

    /// Filter a parsed value with a query pattern, producing a new value.
    pub fn filter(self, value: &Value, query: &str) -> PipelineResult<Value> {
        filter::apply(self, value, query)
    }
}

/// Recursive empty-key walk shared by the object-notation and markup
/// validators. `empty_message` differs per format ("Empty key found" vs.
/// "Empty tag found"); nested mappings extend the prefix with `{key}.`.
pub(crate) fn walk_empty_keys(
    map: &Mapping,
    prefix: &str,
    empty_message: &str,
    errors: &mut Vec<String>,
) {
    for (key, value) in map.iter() {
        if key.is_empty() {
            errors.push(format!("{prefix}{empty_message}"));
        }
        if let Value::Mapping(nested) = value {
            walk_empty_keys(nested, &format!("{prefix}{key}."), empty_message, errors);
        }
    }
}
