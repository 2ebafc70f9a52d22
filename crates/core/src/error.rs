//! # Error Types
//!
//! Every rejection the builder can produce is a distinct variant carrying the
//! offending values. Variants fall into two classes, exposed through
//! [`CoreError::kind`]:
//!
//! - [`ErrorKind::InvalidArgument`]: the input is malformed (no samples, a
//!   sample of the wrong width, a value that is not a bit, ...).
//! - [`ErrorKind::DegenerateInput`]: the input is well-formed but the weight
//!   rule is undefined for it (a single sample).
//!
//! Session bookkeeping failures form a third class.

use thiserror::Error;

/// The class of a [`CoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input: rejected before any accumulation happens.
    InvalidArgument,
    /// Well-formed input for which the weight rule divides by zero.
    DegenerateInput,
    /// The session has nothing to hand out, or its worker failed.
    Session,
}

/// Errors produced while building transition matrices.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    /// `n == 0`: there is nothing to estimate from.
    #[error("Invalid argument: sample count must be positive")]
    EmptySampleSet,

    /// The declared sample count disagrees with the number of samples given.
    #[error("Invalid argument: declared {declared} samples, got {actual}")]
    SampleCountMismatch { declared: usize, actual: usize },

    /// `m` is zero or too large for dense `2^m × 2^m` storage.
    #[error("Invalid argument: channel count {channels} outside 1..={max}")]
    ChannelCountOutOfRange { channels: usize, max: usize },

    /// A sample does not have exactly `m` bits.
    #[error("Invalid argument: sample {index} has {got} bits, expected {expected}")]
    WidthMismatch {
        index: usize,
        expected: usize,
        got: usize,
    },

    /// A sample holds a value other than 0 or 1.
    #[error("Invalid argument: sample {index}, channel {channel} holds {value} (expected 0 or 1)")]
    InvalidBit {
        index: usize,
        channel: usize,
        value: u8,
    },

    /// `n == 1`: the last-sample weight `1/(n-1)` is undefined.
    #[error("Degenerate input: {n} sample(s) leave the last-sample weight 1/(n-1) undefined")]
    DegenerateInput { n: usize },

    /// A session was asked for results before anything was computed.
    #[error("No results: load or generate samples first")]
    NoResults,

    /// The background worker running the builder did not finish.
    #[error("Background computation failed: {reason}")]
    WorkerFailed { reason: String },
}

impl CoreError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::EmptySampleSet
            | CoreError::SampleCountMismatch { .. }
            | CoreError::ChannelCountOutOfRange { .. }
            | CoreError::WidthMismatch { .. }
            | CoreError::InvalidBit { .. } => ErrorKind::InvalidArgument,
            CoreError::DegenerateInput { .. } => ErrorKind::DegenerateInput,
            CoreError::NoResults | CoreError::WorkerFailed { .. } => ErrorKind::Session,
        }
    }

    /// Shorthand for `self.kind() == ErrorKind::InvalidArgument`.
    pub fn is_invalid_argument(&self) -> bool {
        self.kind() == ErrorKind::InvalidArgument
    }
}
