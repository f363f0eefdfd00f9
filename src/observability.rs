//! Pipeline observability: success/failure callbacks and alerting.
//!
//! The pipeline itself stays quiet; callers that want logging or alerts hook
//! a [`PipelineObserver`] into [`crate::pipeline::PipelineOptions`].

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::PipelineError;
use crate::parsing::Format;

/// Severity classification used for observer callbacks and alert thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (the run failed).
    Error,
    /// Critical error (typically I/O or other infrastructure failures).
    Critical,
}

/// Context about one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineContext {
    /// Input path for the run.
    pub path: PathBuf,
    /// Resolved source format.
    pub format: Format,
}

/// Minimal stats reported on success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineStats {
    /// Top-level record count of the resulting value (sequence length, or 1).
    pub records: usize,
}

/// Observer interface for pipeline outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait PipelineObserver: Send + Sync {
    /// Called when a run succeeds.
    fn on_success(&self, _ctx: &PipelineContext, _stats: PipelineStats) {}

    /// Called when a run fails.
    fn on_failure(&self, _ctx: &PipelineContext, _severity: Severity, _error: &PipelineError) {}

    /// Called when a failure meets an alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &PipelineContext, severity: Severity, error: &PipelineError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn PipelineObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn PipelineObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl PipelineObserver for CompositeObserver {
    fn on_success(&self, ctx: &PipelineContext, stats: PipelineStats) {
        for observer in &self.observers {
            observer.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &PipelineContext, severity: Severity, error: &PipelineError) {
        for observer in &self.observers {
            observer.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &PipelineContext, severity: Severity, error: &PipelineError) {
        for observer in &self.observers {
            observer.on_alert(ctx, severity, error);
        }
    }
}

/// Logs pipeline events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl PipelineObserver for StdErrObserver {
    fn on_success(&self, ctx: &PipelineContext, stats: PipelineStats) {
        eprintln!(
            "[pipeline][ok] format={} path={} records={}",
            ctx.format.name(),
            ctx.path.display(),
            stats.records
        );
    }

    fn on_failure(&self, ctx: &PipelineContext, severity: Severity, error: &PipelineError) {
        eprintln!(
            "[pipeline][{severity:?}] format={} path={} err={error}",
            ctx.format.name(),
            ctx.path.display(),
        );
    }

    fn on_alert(&self, ctx: &PipelineContext, severity: Severity, error: &PipelineError) {
        eprintln!(
            "[ALERT][pipeline][{severity:?}] format={} path={} err={error}",
            ctx.format.name(),
            ctx.path.display(),
        );
    }
}

/// Appends pipeline events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are
    /// ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl PipelineObserver for FileObserver {
    fn on_success(&self, ctx: &PipelineContext, stats: PipelineStats) {
        self.append_line(&format!(
            "{} ok format={} path={} records={}",
            unix_ts(),
            ctx.format.name(),
            ctx.path.display(),
            stats.records
        ));
    }

    fn on_failure(&self, ctx: &PipelineContext, severity: Severity, error: &PipelineError) {
        self.append_line(&format!(
            "{} fail severity={:?} format={} path={} err={}",
            unix_ts(),
            severity,
            ctx.format.name(),
            ctx.path.display(),
            error
        ));
    }

    fn on_alert(&self, ctx: &PipelineContext, severity: Severity, error: &PipelineError) {
        self.append_line(&format!(
            "{} ALERT severity={:?} format={} path={} err={}",
            unix_ts(),
            severity,
            ctx.format.name(),
            ctx.path.display(),
            error
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
