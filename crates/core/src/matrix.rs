//! Dense square matrices of accumulated transition weights.

use std::fmt;
use std::ops::Index;

/// A dense `dim × dim` matrix of non-negative weights, stored row-major.
///
/// Rows index the current (or predecessor) state, columns the related (or
/// next) state. Values are accumulated weighted counts, not probabilities;
/// see `statemat_prob` for normalisation.
///
/// Only the builder writes into a matrix; callers get it read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionMatrix {
    data: Vec<f64>,
    dim: usize,
}

impl TransitionMatrix {
    /// A zero-filled `dim × dim` matrix.
    pub fn zeros(dim: usize) -> Self {
        Self {
            data: vec![0.0; dim * dim],
            dim,
        }
    }

    /// Side length (`2^m` for matrices produced by the builder).
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub(crate) fn add(&mut self, row: usize, col: usize, weight: f64) {
        self.data[row * self.dim + col] += weight;
    }

    /// Value at `(row, col)`, or `None` when out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.dim && col < self.dim {
            Some(self.data[row * self.dim + col])
        } else {
            None
        }
    }

    /// One row as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `row >= dim`.
    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.dim..(row + 1) * self.dim]
    }

    /// Iterate over rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact(0) panics; a 0×0 matrix has no rows anyway.
        self.data.chunks_exact(self.dim.max(1)).take(self.dim)
    }

    /// Sum of one row.
    pub fn row_sum(&self, row: usize) -> f64 {
        self.row(row).iter().sum()
    }

    /// Sum of one column.
    pub fn col_sum(&self, col: usize) -> f64 {
        (0..self.dim).map(|r| self.data[r * self.dim + col]).sum()
    }

    /// Total mass.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Sum of the diagonal.
    pub fn trace(&self) -> f64 {
        (0..self.dim).map(|i| self.data[i * self.dim + i]).sum()
    }

    /// Smallest entry (0.0 for an empty matrix).
    pub fn min(&self) -> f64 {
        self.data.iter().copied().reduce(f64::min).unwrap_or(0.0)
    }

    /// Non-zero cells as `(row, col, value)`, row-major.
    pub fn nonzero(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.data
            .iter()
            .enumerate()
            .filter(|(_, &v)| v != 0.0)
            .map(move |(k, &v)| (k / self.dim, k % self.dim, v))
    }

    /// Copy out as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(<[f64]>::to_vec).collect()
    }

    /// Flat row-major view.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

impl Index<(usize, usize)> for TransitionMatrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        assert!(
            row < self.dim && col < self.dim,
            "Index ({}, {}) out of bounds for {}×{} matrix",
            row,
            col,
            self.dim,
            self.dim
        );
        &self.data[row * self.dim + col]
    }
}

impl fmt::Display for TransitionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let cells: Vec<String> = row.iter().map(|v| format!("{:.4}", v)).collect();
            writeln!(f, "[{}]", cells.join(", "))?;
        }
        Ok(())
    }
}
