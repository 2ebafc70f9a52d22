//! Markov kernels (stochastic maps) between finite sets of states.

use crate::dist::Dist;
use crate::error::ProbError;
use crate::PROB_TOLERANCE;

/// What to do with a count row that has no mass when building a kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyRowPolicy {
    /// Fail with [`ProbError::EmptyRow`].
    #[default]
    Reject,
    /// Spread the row uniformly over all outputs.
    Uniform,
    /// Keep the state where it is (requires a square table).
    SelfLoop,
}

/// A Markov kernel from a finite set X to a finite set Y.
///
/// Represented as a row-stochastic matrix where:
/// - `k[i][j]` = P(output = j | input = i)
/// - Each row sums to 1
///
/// # Example
///
/// ```rust
/// use statemat_prob::{Dist, EmptyRowPolicy, Kernel};
///
/// // Counts of observed transitions between two states
/// let counts = vec![vec![3.0, 1.0], vec![2.0, 2.0]];
/// let k = Kernel::from_counts(&counts, EmptyRowPolicy::Reject).unwrap();
/// assert!((k.k[0][0] - 0.75).abs() < 1e-12);
///
/// let next = k.apply(&Dist::point(2, 0)).unwrap();
/// assert!((next.p[1] - 0.25).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    /// Row-stochastic matrix: `k[i][j]` = P(output=j | input=i)
    pub k: Vec<Vec<f64>>,
    /// Number of input states
    pub n_inputs: usize,
    /// Number of output states
    pub n_outputs: usize,
}

impl Kernel {
    /// Create a new kernel from a row-stochastic matrix.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The matrix is empty
    /// - Rows have different lengths
    /// - Any row doesn't sum to 1 (within tolerance)
    pub fn new(k: Vec<Vec<f64>>) -> Result<Self, ProbError> {
        let (n_inputs, n_outputs) = check_rectangular(&k)?;

        for (i, row) in k.iter().enumerate() {
            if row.iter().any(|&x| x < -PROB_TOLERANCE) {
                return Err(ProbError::NegativeProbability);
            }

            let sum: f64 = row.iter().sum();
            if (sum - 1.0).abs() > PROB_TOLERANCE {
                return Err(ProbError::RowNotNormalized { row: i, sum });
            }
        }

        Ok(Self {
            k,
            n_inputs,
            n_outputs,
        })
    }

    /// Estimate a kernel from a table of non-negative counts by normalising
    /// each row. Rows without mass are handled by `policy`.
    pub fn from_counts(counts: &[Vec<f64>], policy: EmptyRowPolicy) -> Result<Self, ProbError> {
        let (n_inputs, n_outputs) = check_rectangular(counts)?;

        let mut k = Vec::with_capacity(n_inputs);
        for (i, row) in counts.iter().enumerate() {
            if row.iter().any(|&x| x < 0.0) {
                return Err(ProbError::NegativeProbability);
            }
            let sum: f64 = row.iter().sum();
            if sum > 0.0 {
                k.push(row.iter().map(|c| c / sum).collect());
                continue;
            }
            match policy {
                EmptyRowPolicy::Reject => return Err(ProbError::EmptyRow { row: i }),
                EmptyRowPolicy::Uniform => k.push(vec![1.0 / n_outputs as f64; n_outputs]),
                EmptyRowPolicy::SelfLoop => {
                    if n_inputs != n_outputs {
                        return Err(ProbError::ShapeMismatch {
                            expected: n_inputs,
                            got: n_outputs,
                        });
                    }
                    let mut row = vec![0.0; n_outputs];
                    row[i] = 1.0;
                    k.push(row);
                }
            }
        }

        Ok(Self {
            k,
            n_inputs,
            n_outputs,
        })
    }

    /// Create the identity kernel: deterministically map i to i.
    pub fn identity(n: usize) -> Self {
        let k: Vec<Vec<f64>> = (0..n)
            .map(|i| {
                let mut row = vec![0.0; n];
                row[i] = 1.0;
                row
            })
            .collect();
        Self {
            k,
            n_inputs: n,
            n_outputs: n,
        }
    }

    /// Compose two kernels: self ; other.
    ///
    /// If self: n → m and other: m → p, then (self ; other): n → p.
    pub fn compose(&self, other: &Kernel) -> Result<Kernel, ProbError> {
        if self.n_outputs != other.n_inputs {
            return Err(ProbError::ShapeMismatch {
                expected: self.n_outputs,
                got: other.n_inputs,
            });
        }

        let mut result = vec![vec![0.0; other.n_outputs]; self.n_inputs];

        for (i, result_row) in result.iter_mut().enumerate() {
            for (j, &kij) in self.k[i].iter().enumerate() {
                if kij == 0.0 {
                    continue;
                }
                for (out, &ljk) in result_row.iter_mut().zip(other.k[j].iter()) {
                    *out += kij * ljk;
                }
            }
        }

        Ok(Kernel {
            k: result,
            n_inputs: self.n_inputs,
            n_outputs: other.n_outputs,
        })
    }

    /// `steps`-fold composition of a square kernel with itself.
    pub fn power(&self, steps: usize) -> Result<Kernel, ProbError> {
        if self.n_inputs != self.n_outputs {
            return Err(ProbError::ShapeMismatch {
                expected: self.n_inputs,
                got: self.n_outputs,
            });
        }
        let mut result = Kernel::identity(self.n_inputs);
        for _ in 0..steps {
            result = result.compose(self)?;
        }
        Ok(result)
    }

    /// Apply the kernel to a distribution: `K(p)[j] = Σᵢ p[i] · K[i,j]`.
    pub fn apply(&self, dist: &Dist) -> Result<Dist, ProbError> {
        if dist.p.len() != self.n_inputs {
            return Err(ProbError::ShapeMismatch {
                expected: self.n_inputs,
                got: dist.p.len(),
            });
        }

        let mut result = vec![0.0; self.n_outputs];
        for (pi, row) in dist.p.iter().zip(self.k.iter()) {
            for (out, &kij) in result.iter_mut().zip(row.iter()) {
                *out += pi * kij;
            }
        }

        Ok(Dist { p: result })
    }

    /// The i-th row as a distribution.
    pub fn apply_to_state(&self, i: usize) -> Result<Dist, ProbError> {
        self.k
            .get(i)
            .map(|row| Dist { p: row.clone() })
            .ok_or(ProbError::IndexOutOfBounds {
                index: i,
                size: self.n_inputs,
            })
    }

    /// P(output=j | input=i).
    pub fn conditional(&self, input: usize, output: usize) -> Result<f64, ProbError> {
        if input >= self.n_inputs {
            return Err(ProbError::IndexOutOfBounds {
                index: input,
                size: self.n_inputs,
            });
        }
        if output >= self.n_outputs {
            return Err(ProbError::IndexOutOfBounds {
                index: output,
                size: self.n_outputs,
            });
        }
        Ok(self.k[input][output])
    }

    /// Check if each row is a point mass.
    pub fn is_deterministic(&self) -> bool {
        self.k
            .iter()
            .all(|row| row.iter().filter(|&&x| x > PROB_TOLERANCE).count() == 1)
    }

    /// Stationary distribution by power iteration from uniform.
    ///
    /// Returns None if not converged within `max_iter` steps (periodic chains
    /// never converge).
    pub fn stationary(&self, max_iter: usize, tolerance: f64) -> Option<Dist> {
        if self.n_inputs != self.n_outputs {
            return None;
        }

        let mut dist = Dist::uniform(self.n_inputs);

        for _ in 0..max_iter {
            let next = self.apply(&dist).ok()?;

            let diff: f64 = dist
                .p
                .iter()
                .zip(next.p.iter())
                .map(|(a, b)| (a - b).abs())
                .sum();

            if diff < tolerance {
                return Some(next);
            }

            dist = next;
        }

        None
    }
}

fn check_rectangular(rows: &[Vec<f64>]) -> Result<(usize, usize), ProbError> {
    let n_outputs = rows.first().map(Vec::len).unwrap_or(0);
    if n_outputs == 0 {
        return Err(ProbError::EmptyKernel);
    }
    if rows.iter().any(|r| r.len() != n_outputs) {
        return Err(ProbError::RaggedMatrix);
    }
    Ok((rows.len(), n_outputs))
}
