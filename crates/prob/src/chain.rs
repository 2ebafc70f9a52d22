//! Empirical Markov chains estimated from built transition matrices.
//!
//! `StatePast[a][b]` holds the weighted number of times state `a` was directly
//! followed by state `b`. Normalising its rows gives the maximum-likelihood
//! estimate of the chain's transition kernel.

use statemat_core::TransitionMatrices;
use tracing::debug;

use crate::dist::Dist;
use crate::error::ProbError;
use crate::kernel::{EmptyRowPolicy, Kernel};

/// Transition kernel estimated from the predecessor → successor counts.
///
/// States never followed by anything (at least the last sample's state, if it
/// occurs nowhere else) have empty rows; `policy` decides what they become.
pub fn empirical_chain(
    result: &TransitionMatrices,
    policy: EmptyRowPolicy,
) -> Result<Kernel, ProbError> {
    let counts = result.state_past.to_rows();
    let empty_rows = counts
        .iter()
        .filter(|row| row.iter().all(|&c| c == 0.0))
        .count();
    debug!(states = counts.len(), empty_rows, ?policy, "estimating chain");
    Kernel::from_counts(&counts, policy)
}

/// Weighted occupancy of each state (the normalised `ChannelFwd` diagonal).
pub fn occupancy(result: &TransitionMatrices) -> Result<Dist, ProbError> {
    Dist::from_diagonal(&result.channel_fwd)
}

/// Distribution over states `steps` transitions after `state`.
pub fn predict(
    result: &TransitionMatrices,
    state: usize,
    steps: usize,
    policy: EmptyRowPolicy,
) -> Result<Dist, ProbError> {
    let dim = result.dim();
    if state >= dim {
        return Err(ProbError::IndexOutOfBounds {
            index: state,
            size: dim,
        });
    }
    let kernel = empirical_chain(result, policy)?;
    kernel.power(steps)?.apply_to_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use statemat_core::build;

    fn alternating() -> TransitionMatrices {
        // 0 -> 1 -> 0 -> 1 -> 0
        build(5, 1, &[vec![0], vec![1], vec![0], vec![1], vec![0]]).unwrap()
    }

    #[test]
    fn test_empirical_chain_alternating() {
        let k = empirical_chain(&alternating(), EmptyRowPolicy::Reject).unwrap();
        assert_eq!(k.k, vec![vec![0.0, 1.0], vec![1.0, 0.0]]);
        assert!(k.is_deterministic());
    }

    #[test]
    fn test_empty_rows_follow_policy() {
        // State 1 only appears last, so it has no successor
        let r = build(3, 1, &[vec![0], vec![0], vec![1]]).unwrap();
        assert!(matches!(
            empirical_chain(&r, EmptyRowPolicy::Reject),
            Err(ProbError::EmptyRow { row: 1 })
        ));
        let k = empirical_chain(&r, EmptyRowPolicy::SelfLoop).unwrap();
        assert_eq!(k.k[1], vec![0.0, 1.0]);
        // 0 -> 0 weighted 1/3, 0 -> 1 weighted 1/2
        assert!((k.k[0][1] - 0.5 / (0.5 + 1.0 / 3.0)).abs() < 1e-12);
    }

    #[test]
    fn test_occupancy() {
        let d = occupancy(&alternating()).unwrap();
        // State 0 at i = 0, 2 (1/5 each) and last (1/4); state 1 twice (1/5)
        let zero = 2.0 / 5.0 + 1.0 / 4.0;
        let one = 2.0 / 5.0;
        assert!((d.p[0] - zero / (zero + one)).abs() < 1e-12);
        assert_eq!(d.mode(), 0);
    }

    #[test]
    fn test_predict() {
        let r = alternating();
        let one = predict(&r, 0, 1, EmptyRowPolicy::Reject).unwrap();
        assert_eq!(one.p, vec![0.0, 1.0]);
        let two = predict(&r, 0, 2, EmptyRowPolicy::Reject).unwrap();
        assert_eq!(two.p, vec![1.0, 0.0]);
        assert!(matches!(
            predict(&r, 2, 1, EmptyRowPolicy::Reject),
            Err(ProbError::IndexOutOfBounds { index: 2, size: 2 })
        ));
    }
}
