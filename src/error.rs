use thiserror::Error;

/// Convenience result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Error type shared across format resolution, parsing, filtering,
/// transformation and output.
///
/// Validation is deliberately not represented here: it returns a
/// [`crate::parsing::Validation`] verdict instead of failing.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The source format name is not one of the supported formats.
    #[error("unsupported file format: {name}")]
    UnsupportedFormat { name: String },

    /// The target format name is not one of the transformable targets.
    #[error("unsupported target format: {name}")]
    UnsupportedTarget { name: String },

    /// Malformed input or an unreadable file. The message carries the
    /// underlying cause (I/O, decoder or syntax error).
    #[error("parse failure: {message}")]
    ParseFailure { message: String },

    /// The filter query is not a valid pattern.
    #[error("filter failure: {message}")]
    FilterFailure { message: String },

    /// The value's shape cannot be expressed in the target format.
    #[error("transform failure: {message}")]
    TransformFailure { message: String },

    /// Underlying I/O error while writing output (e.g. destination not
    /// writable).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
