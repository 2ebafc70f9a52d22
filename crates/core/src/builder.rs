//! # Transition Matrix Builder
//!
//! Converts an ordered sequence of `n` binary samples of width `m` into six
//! `2^m × 2^m` weighted-count matrices in a single pass.
//!
//! ## Weights
//!
//! Sample `i` contributes `weight(i) = 1/n`, except the last sample, which
//! contributes `1/(n-1)` to make up for having no successor.
//!
//! ## Relations
//!
//! For sample `i` with state index `idx`:
//!
//! | matrix | cell | added |
//! |---|---|---|
//! | `channel_fwd` | `(idx, idx)` | `m · weight(i)` |
//! | `state_fwd` | `(idx, suffix(j))` for `j < m-1` | `weight(i)` each |
//! | `channel_fwd_aux` | `(idx, idx)` if `i > 0` | `1/n` |
//! | `state_fwd_aux` | `(idx, idx)` if `i > 0` | `1/n` |
//! | `channel_past` | `(idx with bit j flipped, idx)` for every `j` | `weight(i)` each |
//! | `state_past` | `(prev idx, idx)` if `i > 0` | `weight(i)` |
//!
//! ## Example
//!
//! ```rust
//! use statemat_core::build;
//!
//! let samples = vec![vec![0], vec![1]];
//! let result = build(2, 1, &samples).unwrap();
//!
//! // weight(0) = 1/2, weight(1) = 1/(2-1)
//! assert!((result.channel_fwd.sum() - 1.5).abs() < 1e-12);
//! ```

use std::fmt;
use std::time::Instant;

use tracing::debug;

use crate::error::CoreError;
use crate::matrix::TransitionMatrix;
use crate::sample::{encode, state_count, suffix_index, validate, SampleSet};
use crate::timing::{Computation, TraceNode};

/// Weight of sample `i` in a sequence of `n` samples.
///
/// Requires `n >= 2`; [`build`] rejects smaller sequences before weights are
/// ever computed.
pub fn weight(i: usize, n: usize) -> f64 {
    debug_assert!(n >= 2, "weight undefined for n = {}", n);
    if i + 1 == n {
        1.0 / (n - 1) as f64
    } else {
        1.0 / n as f64
    }
}

/// Identifies one of the six matrices in a [`TransitionMatrices`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatrixKind {
    ChannelFwd,
    StateFwd,
    ChannelPast,
    StatePast,
    ChannelFwdAux,
    StateFwdAux,
}

impl MatrixKind {
    /// All kinds, in the order the builder returns them.
    pub const ALL: [MatrixKind; 6] = [
        MatrixKind::ChannelFwd,
        MatrixKind::StateFwd,
        MatrixKind::ChannelPast,
        MatrixKind::StatePast,
        MatrixKind::ChannelFwdAux,
        MatrixKind::StateFwdAux,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MatrixKind::ChannelFwd => "ChannelFwd",
            MatrixKind::StateFwd => "StateFwd",
            MatrixKind::ChannelPast => "ChannelPast",
            MatrixKind::StatePast => "StatePast",
            MatrixKind::ChannelFwdAux => "ChannelFwdAux",
            MatrixKind::StateFwdAux => "StateFwdAux",
        }
    }

    /// Parse a label case-insensitively (`"statepast"`, `"StatePast"`, ...).
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.label().eq_ignore_ascii_case(label.trim()))
    }
}

impl fmt::Display for MatrixKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The six matrices produced by one [`build`] call, plus a value copy of the
/// samples they were built from.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionMatrices {
    /// State → itself, `m · weight(i)` per sample.
    pub channel_fwd: TransitionMatrix,
    /// State → suffix of itself.
    pub state_fwd: TransitionMatrix,
    /// One-bit perturbation of the state → state.
    pub channel_past: TransitionMatrix,
    /// Predecessor state → state.
    pub state_past: TransitionMatrix,
    /// Self-transition mass `1/n` for every sample but the first.
    pub channel_fwd_aux: TransitionMatrix,
    /// Same accumulation as `channel_fwd_aux`.
    pub state_fwd_aux: TransitionMatrix,
    /// Copy of the input taken before accumulation.
    pub samples: Vec<Vec<u8>>,
    pub n: usize,
    pub m: usize,
}

impl TransitionMatrices {
    pub fn get(&self, kind: MatrixKind) -> &TransitionMatrix {
        match kind {
            MatrixKind::ChannelFwd => &self.channel_fwd,
            MatrixKind::StateFwd => &self.state_fwd,
            MatrixKind::ChannelPast => &self.channel_past,
            MatrixKind::StatePast => &self.state_past,
            MatrixKind::ChannelFwdAux => &self.channel_fwd_aux,
            MatrixKind::StateFwdAux => &self.state_fwd_aux,
        }
    }

    /// `(kind, matrix)` pairs in builder order.
    pub fn iter(&self) -> impl Iterator<Item = (MatrixKind, &TransitionMatrix)> {
        MatrixKind::ALL.into_iter().map(move |k| (k, self.get(k)))
    }

    /// Number of states (`2^m`).
    pub fn dim(&self) -> usize {
        self.channel_fwd.dim()
    }
}

/// Build the six transition matrices from `n` samples of width `m`.
///
/// # Errors
///
/// - `InvalidArgument`-class errors for `n == 0`, `samples.len() != n`,
///   `m` outside `1..=MAX_CHANNELS`, a sample of the wrong width, or a value
///   other than 0/1.
/// - [`CoreError::DegenerateInput`] for `n == 1`.
pub fn build(n: usize, m: usize, samples: &[Vec<u8>]) -> Result<TransitionMatrices, CoreError> {
    let _span = tracing::debug_span!("build", n, m).entered();
    validate(n, m, samples)?;
    Ok(accumulate(n, m, samples))
}

/// The accumulation pass. Input must already be validated.
fn accumulate(n: usize, m: usize, samples: &[Vec<u8>]) -> TransitionMatrices {
    let dim = state_count(m);
    let retained = samples.to_vec();

    let mut channel_fwd = TransitionMatrix::zeros(dim);
    let mut state_fwd = TransitionMatrix::zeros(dim);
    let mut channel_past = TransitionMatrix::zeros(dim);
    let mut state_past = TransitionMatrix::zeros(dim);
    let mut channel_fwd_aux = TransitionMatrix::zeros(dim);
    let mut state_fwd_aux = TransitionMatrix::zeros(dim);

    let inv_n = 1.0 / n as f64;
    let mut prev_idx: Option<usize> = None;

    for (i, sample) in samples.iter().enumerate() {
        let w = weight(i, n);
        let idx = encode(sample);

        channel_fwd.add(idx, idx, m as f64 * w);

        for j in 0..m - 1 {
            state_fwd.add(idx, suffix_index(sample, j), w);
        }

        // Flipping channel j of the sample flips bit (m-1-j) of its index.
        for j in 0..m {
            channel_past.add(idx ^ (1 << (m - 1 - j)), idx, w);
        }

        if let Some(prev) = prev_idx {
            channel_fwd_aux.add(idx, idx, inv_n);
            state_fwd_aux.add(idx, idx, inv_n);
            state_past.add(prev, idx, w);
        }

        prev_idx = Some(idx);
    }

    debug!(
        states = dim,
        channel_fwd_mass = channel_fwd.sum(),
        state_past_mass = state_past.sum(),
        "transition matrices built"
    );

    TransitionMatrices {
        channel_fwd,
        state_fwd,
        channel_past,
        state_past,
        channel_fwd_aux,
        state_fwd_aux,
        samples: retained,
        n,
        m,
    }
}

/// [`build`] as a [`Computation`], so it can be wrapped in
/// [`Traced`](crate::timing::Traced).
#[derive(Debug, Clone, Copy, Default)]
pub struct TransitionMatrixBuilder;

impl TransitionMatrixBuilder {
    pub fn new() -> Self {
        Self
    }
}

impl Computation for TransitionMatrixBuilder {
    type Input = SampleSet;
    type Output = TransitionMatrices;

    fn run(&self, input: SampleSet) -> Result<TransitionMatrices, CoreError> {
        build(input.n(), input.m(), input.samples())
    }

    fn run_recorded(
        &self,
        input: SampleSet,
        children: &mut Vec<TraceNode>,
    ) -> Result<TransitionMatrices, CoreError> {
        let (n, m) = (input.n(), input.m());

        let start = Instant::now();
        validate(n, m, input.samples())?;
        children.push(TraceNode::new("validate", start.elapsed()));

        let start = Instant::now();
        let result = accumulate(n, m, input.samples());
        children.push(TraceNode::new("accumulate", start.elapsed()));

        Ok(result)
    }

    fn name(&self) -> &'static str {
        "TransitionMatrixBuilder"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::{decode, flip};
    use crate::timing::{ComputationExt, Traced};

    const EPS: f64 = 1e-12;

    fn total_weight(n: usize) -> f64 {
        (n as f64 - 1.0) / n as f64 + 1.0 / (n as f64 - 1.0)
    }

    #[test]
    fn test_weight_rule() {
        assert!((weight(0, 4) - 0.25).abs() < EPS);
        assert!((weight(2, 4) - 0.25).abs() < EPS);
        assert!((weight(3, 4) - 1.0 / 3.0).abs() < EPS);
        assert!((weight(0, 2) - 0.5).abs() < EPS);
        assert!((weight(1, 2) - 1.0).abs() < EPS);

        let sum: f64 = (0..5).map(|i| weight(i, 5)).sum();
        assert!((sum - total_weight(5)).abs() < EPS);
    }

    #[test]
    fn test_two_samples_one_channel() {
        let r = build(2, 1, &[vec![0], vec![1]]).unwrap();

        assert!((r.channel_fwd[(0, 0)] - 0.5).abs() < EPS);
        assert!((r.channel_fwd[(1, 1)] - 1.0).abs() < EPS);
        assert!((r.channel_fwd.sum() - 1.5).abs() < EPS);

        // m = 1: no suffix offsets
        assert_eq!(r.state_fwd.sum(), 0.0);

        // 0 -> 1 transition, weighted by the last sample
        assert!((r.state_past[(0, 1)] - 1.0).abs() < EPS);
        assert_eq!(r.state_past.nonzero().count(), 1);

        assert!((r.channel_fwd_aux[(1, 1)] - 0.5).abs() < EPS);
        assert_eq!(r.channel_fwd_aux, r.state_fwd_aux);
    }

    #[test]
    fn test_shapes_and_non_negative() {
        let samples = vec![vec![1, 0, 1], vec![0, 0, 1], vec![1, 1, 1], vec![0, 1, 0]];
        let r = build(4, 3, &samples).unwrap();
        assert_eq!(r.dim(), 8);
        for (_, matrix) in r.iter() {
            assert_eq!(matrix.dim(), 8);
            assert!(matrix.min() >= 0.0);
        }
    }

    #[test]
    fn test_channel_fwd_mass() {
        let samples = vec![vec![1, 0, 1], vec![0, 0, 1], vec![1, 1, 1], vec![0, 1, 0]];
        let r = build(4, 3, &samples).unwrap();
        let expected = 3.0 * total_weight(4);
        assert!((r.channel_fwd.sum() - expected).abs() < EPS);
        // All of it on the diagonal
        assert!((r.channel_fwd.trace() - expected).abs() < EPS);
    }

    #[test]
    fn test_state_fwd_uses_suffixes() {
        // Single repeated state 0b110: suffixes are "10" (=2) and "0" (=0).
        let samples = vec![vec![1, 1, 0], vec![1, 1, 0]];
        let r = build(2, 3, &samples).unwrap();
        let total = total_weight(2);
        assert!((r.state_fwd[(6, 2)] - total).abs() < EPS);
        assert!((r.state_fwd[(6, 0)] - total).abs() < EPS);
        assert_eq!(r.state_fwd.nonzero().count(), 2);
        // m - 1 offsets per sample
        assert!((r.state_fwd.sum() - 2.0 * total).abs() < EPS);
    }

    #[test]
    fn test_constant_sequence_state_past() {
        let samples = vec![vec![0, 1]; 5];
        let r = build(5, 2, &samples).unwrap();
        let nonzero: Vec<_> = r.state_past.nonzero().collect();
        assert_eq!(nonzero.len(), 1);
        assert_eq!((nonzero[0].0, nonzero[0].1), (1, 1));
    }

    #[test]
    fn test_channel_past_single_channel() {
        let samples = vec![vec![0], vec![1], vec![0]];
        let r = build(3, 1, &samples).unwrap();
        let cells: Vec<(usize, usize)> = r.channel_past.nonzero().map(|(a, b, _)| (a, b)).collect();
        assert_eq!(cells, vec![(0, 1), (1, 0)]);
        // [0] at i=0 (1/3) and i=2 (1/2)
        assert!((r.channel_past[(1, 0)] - (1.0 / 3.0 + 0.5)).abs() < EPS);
        assert!((r.channel_past[(0, 1)] - 1.0 / 3.0).abs() < EPS);
    }

    #[test]
    fn test_channel_past_matches_flipped_encoding() {
        let samples = vec![vec![1, 0, 1, 1], vec![0, 0, 1, 0], vec![1, 1, 0, 0]];
        let r = build(3, 4, &samples).unwrap();
        for (i, sample) in samples.iter().enumerate() {
            let idx = encode(sample);
            for j in 0..4 {
                let row = encode(&flip(sample, j));
                assert!(r.channel_past[(row, idx)] >= weight(i, 3) - EPS);
            }
        }
        assert!((r.channel_past.sum() - 4.0 * total_weight(3)).abs() < EPS);
        // Never on the diagonal: a flip always changes the state
        assert_eq!(r.channel_past.trace(), 0.0);
    }

    #[test]
    fn test_aux_accumulates_n_minus_one_times() {
        let samples: Vec<Vec<u8>> = (0..6).map(|k| decode(k % 4, 2)).collect();
        let r = build(6, 2, &samples).unwrap();
        assert!((r.channel_fwd_aux.sum() - 5.0 / 6.0).abs() < EPS);
        assert!((r.state_fwd_aux.sum() - 5.0 / 6.0).abs() < EPS);
        // The first sample (state 0) appears again at i = 4
        assert!((r.channel_fwd_aux[(0, 0)] - 1.0 / 6.0).abs() < EPS);
        assert!((r.channel_fwd_aux[(1, 1)] - 2.0 / 6.0).abs() < EPS);
    }

    #[test]
    fn test_returned_samples_are_a_copy() {
        let mut samples = vec![vec![0, 1], vec![1, 1], vec![1, 0]];
        let r = build(3, 2, &samples).unwrap();
        samples[0][0] = 1;
        samples.push(vec![0, 0]);
        assert_eq!(r.samples, vec![vec![0, 1], vec![1, 1], vec![1, 0]]);
    }

    #[test]
    fn test_fresh_allocation_per_call() {
        let a = build(2, 1, &[vec![0], vec![0]]).unwrap();
        let b = build(2, 1, &[vec![0], vec![0]]).unwrap();
        assert_eq!(a, b);
        assert_ne!(
            a.channel_fwd.as_slice().as_ptr(),
            b.channel_fwd.as_slice().as_ptr()
        );
    }

    #[test]
    fn test_errors() {
        assert_eq!(build(0, 1, &[]), Err(CoreError::EmptySampleSet));
        assert_eq!(
            build(1, 2, &[vec![1, 0]]),
            Err(CoreError::DegenerateInput { n: 1 })
        );
        assert!(build(2, 2, &[vec![1, 0], vec![1]])
            .unwrap_err()
            .is_invalid_argument());
        assert!(build(2, 1, &[vec![1], vec![3]])
            .unwrap_err()
            .is_invalid_argument());
    }

    #[test]
    fn test_matrix_kind_labels() {
        assert_eq!(MatrixKind::from_label("statepast"), Some(MatrixKind::StatePast));
        assert_eq!(MatrixKind::from_label(" ChannelFwdAux "), Some(MatrixKind::ChannelFwdAux));
        assert_eq!(MatrixKind::from_label("nope"), None);
        assert_eq!(MatrixKind::StateFwd.to_string(), "StateFwd");
    }

    #[test]
    fn test_builder_computation() {
        let set = SampleSet::new(vec![vec![0, 1], vec![1, 1], vec![0, 1]]).unwrap();
        let direct = build(3, 2, set.samples()).unwrap();

        let untraced = TransitionMatrixBuilder.untraced().run(set.clone()).unwrap();
        assert_eq!(untraced, direct);

        let traced: Traced<TransitionMatrixBuilder, true> = Traced::new(TransitionMatrixBuilder);
        let (result, trace) = traced.run(set).unwrap();
        assert_eq!(result, direct);
        assert_eq!(trace.name, "TransitionMatrixBuilder");
        let names: Vec<&str> = trace.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["validate", "accumulate"]);
    }
}
