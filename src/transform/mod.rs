//! Target registry and the per-target transformers.
//!
//! [`Target`] is the closed set of serialization targets. Each transformer
//! takes an arbitrary [`crate::value::Value`] and either produces a string in
//! its format or rejects the shape with
//! [`crate::error::PipelineError::TransformFailure`].

pub mod markup;
pub mod object;
pub mod tabular;
pub mod text;

use crate::error::{PipelineError, PipelineResult};
use crate::parsing::Format;
use crate::value::Value;

/// Supported target formats. Log input can be transformed like any other
/// value, but log itself is not a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Delimited-row tables (`csv`).
    Tabular,
    /// Structured object notation (`json`).
    ObjectNotation,
    /// Attribute-bearing element trees (`xml`).
    Markup,
    /// Plain text (`txt`).
    PlainText,
}

impl Target {
    /// Resolve a target from its name, case-insensitively.
    ///
    /// Accepted names are `csv`, `json`, `xml` and `txt`; anything else
    /// (including `log`) is [`PipelineError::UnsupportedTarget`].
    pub fn from_name(name: &str) -> PipelineResult<Self> {
        match name.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Tabular),
            "json" => Ok(Self::ObjectNotation),
            "xml" => Ok(Self::Markup),
            "txt" => Ok(Self::PlainText),
            _ => Err(PipelineError::UnsupportedTarget {
                name: name.to_owned(),
            }),
        }
    }

    /// Resolve a transformer for a source/target pair.
    ///
    /// Only the target name selects the transformer today; the source format
    /// is accepted for future source-aware dispatch.
    pub fn resolve(source: Format, target: &str) -> PipelineResult<Self> {
        let _ = source;
        Self::from_name(target)
    }

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Tabular => "csv",
            Self::ObjectNotation => "json",
            Self::Markup => "xml",
            Self::PlainText => "txt",
        }
    }

    /// Serialize `value` into this target format.
    pub fn transform(self, value: &Value) -> PipelineResult<String> {
        match self {
            Self::Tabular => tabular::transform(value),
            Self::ObjectNotation => object::transform(value),
            Self::Markup => markup::transform(value),
            Self::PlainText => Ok(text::transform(value)),
        }
    }
}
