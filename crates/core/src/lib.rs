//! # Core - Transition Statistics over Binary Channels
//!
//! A sequence of observations of `m` binary channels is a walk over `2^m`
//! joint states. This crate turns such a walk into weighted transition-count
//! matrices:
//!
//! - **Samples**: bit vectors and their big-endian state indices
//! - **Matrices**: dense `2^m × 2^m` tables of accumulated weights
//! - **Builder**: the single pass producing the six matrices
//! - **Timing**: zero-cost, compile-time configurable tracing of computations
//! - **Session**: explicit ownership of the most recent result
//!
//! ## Example
//!
//! ```rust
//! use statemat_core::{build, MatrixKind};
//!
//! let samples = vec![vec![0, 1], vec![1, 1], vec![1, 0], vec![0, 1]];
//! let result = build(samples.len(), 2, &samples).unwrap();
//!
//! // 01 -> 11 happened once, weighted 1/4
//! assert!((result.get(MatrixKind::StatePast)[(1, 3)] - 0.25).abs() < 1e-12);
//! ```

pub mod builder;
pub mod error;
pub mod matrix;
pub mod sample;
pub mod session;
pub mod timing;

pub use builder::{build, weight, MatrixKind, TransitionMatrices, TransitionMatrixBuilder};
pub use error::{CoreError, ErrorKind};
pub use matrix::TransitionMatrix;
pub use sample::{SampleSet, MAX_CHANNELS};
pub use session::Session;
pub use timing::{Computation, ComputationExt, TraceNode, Traced};
