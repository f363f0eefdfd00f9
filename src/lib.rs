//! `formpipe` is a small library for parsing common textual file formats into
//! a single in-memory [`value::Value`] model, then validating, filtering and
//! re-serializing that value into another format.
//!
//! The primary entrypoint is [`pipeline::run_from_path`], which resolves the
//! source format (explicitly or from the file extension) and runs the full
//! parse → validate → filter → transform flow.
//!
//! ## Supported formats
//!
//! **Sources** (resolved by [`parsing::Format::from_name`]):
//!
//! - **Tabular**: `csv` — header-plus-rows, every cell a string
//! - **Object notation**: `json` — preserves numbers, booleans and key order
//! - **Markup**: `xml` — element trees with attributes, via a fixed
//!   attribute/child/text convention
//! - **Plain text**: `txt` — the whole file as one text value
//! - **Log**: `log` — heuristic line-pattern detection with named captures
//!
//! **Targets** (resolved by [`transform::Target::from_name`]): `csv`, `json`,
//! `xml`, `txt`. Log input can be transformed; log is not a target.
//!
//! ## Quick example: filter and re-serialize in memory
//!
//! ```rust
//! use formpipe::parsing::Format;
//! use formpipe::transform::Target;
//! use formpipe::value::{Mapping, Value};
//!
//! let rows = Value::Sequence(vec![
//!     Value::Mapping(
//!         [
//!             ("name".to_string(), Value::text("Ada")),
//!             ("city".to_string(), Value::text("London")),
//!         ]
//!         .into_iter()
//!         .collect::<Mapping>(),
//!     ),
//!     Value::Mapping(
//!         [
//!             ("name".to_string(), Value::text("Grace")),
//!             ("city".to_string(), Value::text("Washington")),
//!         ]
//!         .into_iter()
//!         .collect::<Mapping>(),
//!     ),
//! ]);
//!
//! // Keep rows where any field matches the query pattern.
//! let kept = Format::Tabular.filter(&rows, "London").unwrap();
//! assert_eq!(kept.as_sequence().unwrap().len(), 1);
//!
//! // Serialize the reduced value into another format.
//! let csv = Target::Tabular.transform(&kept).unwrap();
//! assert_eq!(csv, "city,name\nLondon,Ada\n");
//! ```
//!
//! ## Quick example: run the whole pipeline over a file
//!
//! ```no_run
//! use formpipe::pipeline::{PipelineOptions, run_from_path};
//!
//! # fn main() -> Result<(), formpipe::PipelineError> {
//! let options = PipelineOptions {
//!     validate: true,
//!     target: Some("json".to_string()),
//!     ..Default::default()
//! };
//! let outcome = run_from_path("data.csv", &options)?;
//! if let Some(validation) = &outcome.validation {
//!     for finding in &validation.errors {
//!         eprintln!("{finding}");
//!     }
//! }
//! println!("{}", outcome.rendered.unwrap_or_default());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`value`]: the shared semi-structured value model
//! - [`parsing`]: format registry, per-format parsers and validation
//! - [`filter`]: the query evaluator
//! - [`transform`]: target registry and per-target serializers
//! - [`output`]: console/file rendering of values
//! - [`pipeline`]: unified entrypoint wiring all of the above
//! - [`observability`]: observer hooks for logging and alerts
//! - [`error`]: error types used across the pipeline

pub mod error;
pub mod filter;
pub mod observability;
pub mod output;
pub mod parsing;
pub mod pipeline;
pub mod transform;
pub mod value;

pub use error::{PipelineError, PipelineResult};
