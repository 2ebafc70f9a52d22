//! Property-based tests for the builder invariants.

use proptest::prelude::*;

use statemat_core::sample::encode;
use statemat_core::{build, weight, CoreError};

const EPS: f64 = 1e-9;

/// Strategy: a width m in 1..=5 and 2..40 samples of that width.
fn samples_strategy() -> impl Strategy<Value = (usize, Vec<Vec<u8>>)> {
    (1usize..=5).prop_flat_map(|m| {
        (
            Just(m),
            prop::collection::vec(prop::collection::vec(0u8..=1, m), 2..40),
        )
    })
}

fn total_weight(n: usize) -> f64 {
    (n as f64 - 1.0) / n as f64 + 1.0 / (n as f64 - 1.0)
}

proptest! {
    // 1. Every matrix is 2^m × 2^m and non-negative
    #[test]
    fn shapes_and_signs((m, samples) in samples_strategy()) {
        let r = build(samples.len(), m, &samples).unwrap();
        for (_, matrix) in r.iter() {
            prop_assert_eq!(matrix.dim(), 1 << m);
            prop_assert!(matrix.min() >= 0.0);
        }
    }

    // 2. ChannelFwd mass = m · Σ weight(i), all on the diagonal
    #[test]
    fn channel_fwd_mass((m, samples) in samples_strategy()) {
        let n = samples.len();
        let r = build(n, m, &samples).unwrap();
        let by_rule: f64 = (0..n).map(|i| weight(i, n)).sum();
        prop_assert!((by_rule - total_weight(n)).abs() < EPS);
        prop_assert!((r.channel_fwd.sum() - m as f64 * by_rule).abs() < EPS);
        prop_assert!((r.channel_fwd.trace() - r.channel_fwd.sum()).abs() < EPS);
    }

    // 3. StateFwd gets m-1 additions per sample, ChannelPast m
    #[test]
    fn per_sample_addition_counts((m, samples) in samples_strategy()) {
        let n = samples.len();
        let r = build(n, m, &samples).unwrap();
        let total = total_weight(n);
        prop_assert!((r.state_fwd.sum() - (m - 1) as f64 * total).abs() < EPS);
        prop_assert!((r.channel_past.sum() - m as f64 * total).abs() < EPS);
    }

    // 4. Aux matrices hold 1/n exactly n-1 times
    #[test]
    fn aux_mass((m, samples) in samples_strategy()) {
        let n = samples.len();
        let r = build(n, m, &samples).unwrap();
        let expected = (n - 1) as f64 / n as f64;
        prop_assert!((r.channel_fwd_aux.sum() - expected).abs() < EPS);
        prop_assert_eq!(&r.channel_fwd_aux, &r.state_fwd_aux);
    }

    // 5. StatePast only holds observed consecutive pairs
    #[test]
    fn state_past_support((m, samples) in samples_strategy()) {
        let r = build(samples.len(), m, &samples).unwrap();
        let pairs: Vec<(usize, usize)> = samples
            .windows(2)
            .map(|w| (encode(&w[0]), encode(&w[1])))
            .collect();
        for (a, b, _) in r.state_past.nonzero() {
            prop_assert!(pairs.contains(&(a, b)));
        }
        for &(a, b) in &pairs {
            prop_assert!(r.state_past[(a, b)] > 0.0);
        }
    }

    // 6. Returned samples equal the input
    #[test]
    fn samples_echoed((m, samples) in samples_strategy()) {
        let r = build(samples.len(), m, &samples).unwrap();
        prop_assert_eq!(r.samples, samples);
    }

    // 7. Any non-bit value is rejected
    #[test]
    fn non_bits_rejected((m, mut samples) in samples_strategy(), bad in 2u8..=255) {
        samples[0][m - 1] = bad;
        let err = build(samples.len(), m, &samples).unwrap_err();
        let is_invalid_bit = matches!(err, CoreError::InvalidBit { index: 0, .. });
        prop_assert!(is_invalid_bit);
    }
}
