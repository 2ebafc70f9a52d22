//! Row normalisation and channel marginals of count matrices.
//!
//! A `2^m × 2^m` count matrix indexes both axes by full joint states. To look
//! at a subset of channels, the matrix is summed onto the states of that
//! subset: with row channels `R` and column channels `C`, cell `(r, c)` lands
//! in `(project(r, R), project(c, C))` of a `2^|R| × 2^|C|` table.
//!
//! ```rust
//! use statemat_core::build;
//! use statemat_prob::marginal::{marginalize, normalize_table};
//!
//! let samples = vec![vec![0, 1], vec![1, 1], vec![1, 0], vec![0, 0]];
//! let r = build(4, 2, &samples).unwrap();
//!
//! // Predecessor's channel 0 against successor's channel 0
//! let table = marginalize(&r.state_past, 2, &[0], &[0]).unwrap();
//! let k = normalize_table(table);
//! assert_eq!(k.len(), 2);
//! ```

use std::collections::HashSet;

use statemat_core::TransitionMatrix;

use crate::error::ProbError;

/// Divide every row by its sum. All-zero rows stay zero.
pub fn normalize_rows(matrix: &TransitionMatrix) -> Vec<Vec<f64>> {
    normalize_table(matrix.to_rows())
}

/// [`normalize_rows`] for an arbitrary (possibly rectangular) count table.
pub fn normalize_table(mut table: Vec<Vec<f64>>) -> Vec<Vec<f64>> {
    for row in &mut table {
        let sum: f64 = row.iter().sum();
        if sum > 0.0 {
            row.iter_mut().for_each(|v| *v /= sum);
        }
    }
    table
}

/// Read the selected channels of a state index, in the given order, as a
/// big-endian number.
pub fn project(index: usize, m: usize, channels: &[usize]) -> usize {
    channels
        .iter()
        .fold(0usize, |acc, &c| (acc << 1) | ((index >> (m - 1 - c)) & 1))
}

/// Sum a `2^m × 2^m` count matrix onto the given row and column channels.
///
/// # Errors
///
/// - [`ProbError::ShapeMismatch`] if the matrix is not `2^m × 2^m`
/// - [`ProbError::EmptySelection`], [`ProbError::ChannelOutOfRange`] or
///   [`ProbError::DuplicateChannel`] for a bad channel list
pub fn marginalize(
    matrix: &TransitionMatrix,
    m: usize,
    row_channels: &[usize],
    col_channels: &[usize],
) -> Result<Vec<Vec<f64>>, ProbError> {
    let dim = u32::try_from(m)
        .ok()
        .and_then(|m| 1usize.checked_shl(m))
        .unwrap_or(0);
    if matrix.dim() != dim {
        return Err(ProbError::ShapeMismatch {
            expected: dim,
            got: matrix.dim(),
        });
    }
    check_selection(row_channels, m)?;
    check_selection(col_channels, m)?;

    let mut table = vec![vec![0.0; 1 << col_channels.len()]; 1 << row_channels.len()];
    for (r, c, v) in matrix.nonzero() {
        table[project(r, m, row_channels)][project(c, m, col_channels)] += v;
    }
    Ok(table)
}

fn check_selection(channels: &[usize], m: usize) -> Result<(), ProbError> {
    if channels.is_empty() {
        return Err(ProbError::EmptySelection);
    }
    let mut seen = HashSet::new();
    for &channel in channels {
        if channel >= m {
            return Err(ProbError::ChannelOutOfRange { channel, channels: m });
        }
        if !seen.insert(channel) {
            return Err(ProbError::DuplicateChannel { channel });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use statemat_core::build;

    #[test]
    fn test_project() {
        // 0b101 over 3 channels
        assert_eq!(project(5, 3, &[0]), 1);
        assert_eq!(project(5, 3, &[1]), 0);
        assert_eq!(project(5, 3, &[0, 2]), 0b11);
        assert_eq!(project(5, 3, &[2, 1]), 0b10);
        assert_eq!(project(5, 3, &[0, 1, 2]), 5);
    }

    #[test]
    fn test_normalize_rows_keeps_zero_rows() {
        let r = build(2, 1, &[vec![0], vec![1]]).unwrap();
        let rows = normalize_rows(&r.state_past);
        assert_eq!(rows[0], vec![0.0, 1.0]);
        assert_eq!(rows[1], vec![0.0, 0.0]);
    }

    #[test]
    fn test_marginalize_full_selection_is_identity() {
        let samples = vec![vec![0, 1], vec![1, 1], vec![1, 0], vec![0, 1]];
        let r = build(4, 2, &samples).unwrap();
        let table = marginalize(&r.state_past, 2, &[0, 1], &[0, 1]).unwrap();
        assert_eq!(table, r.state_past.to_rows());
    }

    #[test]
    fn test_marginalize_preserves_mass() {
        let samples = vec![vec![0, 1, 1], vec![1, 1, 0], vec![1, 0, 0], vec![0, 0, 1]];
        let r = build(4, 3, &samples).unwrap();
        let table = marginalize(&r.state_past, 3, &[2], &[0, 1]).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table[0].len(), 4);
        let mass: f64 = table.iter().flatten().sum();
        assert!((mass - r.state_past.sum()).abs() < 1e-12);
    }

    #[test]
    fn test_marginalize_single_channel() {
        // Channel 0 goes 0 -> 1 -> 1 -> 0
        let samples = vec![vec![0, 1], vec![1, 1], vec![1, 0], vec![0, 0]];
        let r = build(4, 2, &samples).unwrap();
        let table = marginalize(&r.state_past, 2, &[0], &[0]).unwrap();
        assert!((table[0][1] - 0.25).abs() < 1e-12);
        assert!((table[1][1] - 0.25).abs() < 1e-12);
        assert!((table[1][0] - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(table[0][0], 0.0);

        let k = normalize_table(table);
        assert!((k[1][0] - (1.0 / 3.0) / (0.25 + 1.0 / 3.0)).abs() < 1e-12);
    }

    #[test]
    fn test_marginalize_rejects_bad_selection() {
        let r = build(2, 2, &[vec![0, 1], vec![1, 1]]).unwrap();
        assert!(matches!(
            marginalize(&r.state_past, 2, &[], &[0]),
            Err(ProbError::EmptySelection)
        ));
        assert!(matches!(
            marginalize(&r.state_past, 2, &[0], &[2]),
            Err(ProbError::ChannelOutOfRange { channel: 2, .. })
        ));
        assert!(matches!(
            marginalize(&r.state_past, 2, &[1, 1], &[0]),
            Err(ProbError::DuplicateChannel { channel: 1 })
        ));
        assert!(matches!(
            marginalize(&r.state_past, 3, &[0], &[0]),
            Err(ProbError::ShapeMismatch { expected: 8, got: 4 })
        ));
    }
}
