//! Error types for sample sources, configuration and the command line.

use statemat_core::CoreError;
use statemat_prob::ProbError;
use thiserror::Error;

/// Errors raised while obtaining samples or presenting results.
#[derive(Debug, Clone, Error)]
pub enum IoError {
    /// A cell or character that is not a bit.
    #[error("Line {line}, column {column}: expected 0 or 1, found '{found}'")]
    InvalidCell {
        line: usize,
        column: usize,
        found: String,
    },

    /// A line whose width differs from the expected sample width.
    #[error("Line {line}: expected {expected} bits, got {got}")]
    WidthMismatch {
        line: usize,
        expected: usize,
        got: usize,
    },

    /// No samples at all.
    #[error("No samples found")]
    EmptyInput,

    /// Reading a file or stream failed.
    #[error("Cannot read {path}: {message}")]
    Io { path: String, message: String },

    /// An environment setting that cannot be parsed.
    #[error("Invalid setting {name}={value}")]
    InvalidSetting { name: &'static str, value: String },

    /// Bad command-line usage.
    #[error("{message}\n\n{usage}")]
    Usage { message: String, usage: &'static str },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Prob(#[from] ProbError),
}
