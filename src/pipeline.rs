//! Unified pipeline entrypoint.
//!
//! [`run_from_path`] wires the full flow a caller drives: resolve the format
//! (explicitly or from the file extension), parse, optionally validate,
//! optionally filter, optionally transform into a target format. Each run is
//! synchronous and sequential, holds no shared state, and builds fresh values
//! at every step — concurrent runs over independent files are safe.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{PipelineError, PipelineResult};
use crate::observability::{PipelineContext, PipelineObserver, PipelineStats, Severity};
use crate::parsing::{Format, Validation};
use crate::transform::Target;
use crate::value::Value;

/// Options controlling one pipeline run.
///
/// Use [`Default`] for a parse-only run.
#[derive(Clone)]
pub struct PipelineOptions {
    /// If `None`, infer the format from the file extension.
    pub format: Option<Format>,
    /// Optional filter query applied after parsing.
    pub query: Option<String>,
    /// Optional target format name; when set, the outcome carries the
    /// serialized output.
    pub target: Option<String>,
    /// Run structural validation and report the verdict in the outcome.
    /// Validation findings never abort the run.
    pub validate: bool,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn PipelineObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: Severity,
}

impl fmt::Debug for PipelineOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineOptions")
            .field("format", &self.format)
            .field("query", &self.query)
            .field("target", &self.target)
            .field("validate", &self.validate)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            format: None,
            query: None,
            target: None,
            validate: false,
            observer: None,
            alert_at_or_above: Severity::Critical,
        }
    }
}

/// Result of a successful pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// The resolved source format.
    pub format: Format,
    /// The parsed (and possibly filtered) value.
    pub value: Value,
    /// Validation verdict, when requested.
    pub validation: Option<Validation>,
    /// Serialized output, when a target was requested.
    pub rendered: Option<String>,
}

/// Run the pipeline over the file at `path`.
///
/// - If `options.format` is `None`, the format is inferred from the file
///   extension.
/// - With `options.query`, the parsed value is reduced by the filter
///   evaluator (the original parse is discarded; filter builds a new value).
/// - With `options.target`, the outcome carries the value serialized into
///   that format.
///
/// When an observer is configured, this function reports `on_success` with
/// record-count stats, `on_failure` with a computed severity, and `on_alert`
/// when that severity is >= `options.alert_at_or_above`.
///
/// # Examples
///
/// ```no_run
/// use formpipe::pipeline::{PipelineOptions, run_from_path};
///
/// # fn main() -> Result<(), formpipe::PipelineError> {
/// let options = PipelineOptions {
///     query: Some("London".to_string()),
///     target: Some("json".to_string()),
///     ..Default::default()
/// };
///
/// // Uses `.csv` to select tabular parsing.
/// let outcome = run_from_path("people.csv", &options)?;
/// println!("{}", outcome.rendered.unwrap_or_default());
/// # Ok(())
/// # }
/// ```
///
/// ## Observability (stderr logging + alert threshold)
///
/// ```no_run
/// use std::sync::Arc;
///
/// use formpipe::observability::{Severity, StdErrObserver};
/// use formpipe::pipeline::{PipelineOptions, run_from_path};
///
/// let options = PipelineOptions {
///     observer: Some(Arc::new(StdErrObserver)),
///     alert_at_or_above: Severity::Error,
///     ..Default::default()
/// };
///
/// // A missing file fails the parse step and triggers `on_alert` here.
/// let _err = run_from_path("does_not_exist.log", &options).unwrap_err();
/// ```
pub fn run_from_path(
    path: impl AsRef<Path>,
    options: &PipelineOptions,
) -> PipelineResult<PipelineOutcome> {
    let path = path.as_ref();
    let format = match options.format {
        Some(format) => format,
        None => infer_format_from_path(path)?,
    };

    let ctx = PipelineContext {
        path: path.to_path_buf(),
        format,
    };
    let result = run_steps(path, format, options);

    if let Some(observer) = options.observer.as_ref() {
        match &result {
            Ok(outcome) => observer.on_success(
                &ctx,
                PipelineStats {
                    records: record_count(&outcome.value),
                },
            ),
            Err(error) => {
                let severity = severity_for_error(error);
                observer.on_failure(&ctx, severity, error);
                if severity >= options.alert_at_or_above {
                    observer.on_alert(&ctx, severity, error);
                }
            }
        }
    }

    result
}

fn run_steps(
    path: &Path,
    format: Format,
    options: &PipelineOptions,
) -> PipelineResult<PipelineOutcome> {
    let parsed = format.parse(path)?;

    let validation = options.validate.then(|| format.validate(&parsed));

    let value = match options.query.as_deref() {
        Some(query) => format.filter(&parsed, query)?,
        None => parsed,
    };

    let rendered = match options.target.as_deref() {
        Some(target) => Some(Target::resolve(format, target)?.transform(&value)?),
        None => None,
    };

    Ok(PipelineOutcome {
        format,
        value,
        validation,
        rendered,
    })
}

fn record_count(value: &Value) -> usize {
    match value {
        Value::Sequence(items) => items.len(),
        _ => 1,
    }
}

fn severity_for_error(error: &PipelineError) -> Severity {
    match error {
        PipelineError::Io(_) => Severity::Critical,
        PipelineError::UnsupportedFormat { .. }
        | PipelineError::UnsupportedTarget { .. }
        | PipelineError::ParseFailure { .. }
        | PipelineError::FilterFailure { .. }
        | PipelineError::TransformFailure { .. } => Severity::Error,
    }
}

fn infer_format_from_path(path: &Path) -> PipelineResult<Format> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| PipelineError::UnsupportedFormat {
            name: path.display().to_string(),
        })?;
    Format::from_extension(ext).ok_or_else(|| PipelineError::UnsupportedFormat {
        name: ext.to_owned(),
    })
}

/// Convenience helper for callers that want an owned request object, e.g. to
/// enqueue runs in a job system.
#[derive(Clone)]
pub struct PipelineRequest {
    /// Path to the input file.
    pub path: PathBuf,
    /// Options controlling the run.
    pub options: PipelineOptions,
}

impl fmt::Debug for PipelineRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineRequest")
            .field("path", &self.path)
            .field("options", &self.options)
            .finish()
    }
}

impl PipelineRequest {
    /// Execute the request by calling [`run_from_path`].
    pub fn run(&self) -> PipelineResult<PipelineOutcome> {
        run_from_path(&self.path, &self.options)
    }
}
