//! # IO - Getting Samples In and Tables Out
//!
//! Everything around the builder that touches the outside world:
//!
//! - **Sources**: bit strings typed in by hand, comma-separated files and
//!   uniformly random samples (seedable)
//! - **Rendering**: boxed plain-text tables for the six matrices, Markov
//!   kernels and the sample data
//! - **Configuration** from `STATEMAT_*` environment variables
//! - **Command line** parsing and dispatch for the `statemat` binary
//!
//! ## Example
//!
//! ```rust
//! use statemat_core::build;
//! use statemat_io::{parse_manual, render_all, RenderOptions};
//!
//! let set = parse_manual(["01", "11", "10"], 2).unwrap();
//! let result = build(set.n(), set.m(), set.samples()).unwrap();
//! let text = render_all(&result, &[], &RenderOptions::default());
//! assert!(text.contains("StatePast"));
//! ```

pub mod cli;
pub mod config;
mod error;
pub mod random;
pub mod render;
pub mod source;

pub use cli::{parse_args, run, Invocation, Source};
pub use config::Config;
pub use error::IoError;
pub use random::{random_samples, random_samples_from_entropy, random_samples_seeded};
pub use render::{render_all, render_kernel, render_matrix, render_samples, RenderOptions};
pub use source::{load_csv, parse_bits, parse_manual, read_csv};
