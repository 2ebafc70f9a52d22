//! # Prob - From Transition Counts to Markov Kernels
//!
//! The core builder produces *unnormalised* weighted counts. This crate turns
//! them into probabilistic objects:
//!
//! - **Distributions** over joint states (`Dist`)
//! - **Markov kernels** as row-stochastic matrices (`Kernel`), estimated from
//!   count tables with an explicit policy for unobserved rows
//! - **Marginals** of a count matrix onto chosen channels
//! - **Empirical chains**: the kernel of the observed predecessor → successor
//!   relation, multi-step prediction and state occupancy
//!
//! ## Example
//!
//! ```rust
//! use statemat_core::build;
//! use statemat_prob::{empirical_chain, EmptyRowPolicy};
//!
//! let samples = vec![vec![0], vec![1], vec![1], vec![0], vec![1]];
//! let result = build(samples.len(), 1, &samples).unwrap();
//!
//! let chain = empirical_chain(&result, EmptyRowPolicy::Reject).unwrap();
//! // From state 0 the walk always moved to 1
//! assert!((chain.k[0][1] - 1.0).abs() < 1e-12);
//! ```

pub mod chain;
mod dist;
mod error;
mod kernel;
pub mod marginal;

pub use chain::{empirical_chain, occupancy, predict};
pub use dist::Dist;
pub use error::ProbError;
pub use kernel::{EmptyRowPolicy, Kernel};
pub use marginal::{marginalize, normalize_rows, normalize_table};

/// Tolerance for probability comparisons.
pub const PROB_TOLERANCE: f64 = 1e-9;
