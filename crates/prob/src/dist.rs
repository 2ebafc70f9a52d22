//! Probability distributions over finite sets of states.

use statemat_core::TransitionMatrix;

use crate::error::ProbError;
use crate::PROB_TOLERANCE;

/// A probability distribution over a finite set {0, 1, ..., n-1}.
///
/// Invariants:
/// - All probabilities are non-negative
/// - Probabilities sum to 1 (within tolerance)
///
/// # Example
///
/// ```rust
/// use statemat_prob::Dist;
///
/// let fair_bit = Dist::uniform(2);
/// assert!((fair_bit.p[0] - 0.5).abs() < 1e-12);
///
/// let certain = Dist::point(4, 3);
/// assert_eq!(certain.mode(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Dist {
    /// Probability vector (sums to 1).
    pub p: Vec<f64>,
}

impl Dist {
    /// Create a new distribution from a probability vector.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The vector is empty
    /// - Any probability is negative
    /// - The probabilities don't sum to 1 (within tolerance)
    pub fn new(p: Vec<f64>) -> Result<Self, ProbError> {
        if p.is_empty() {
            return Err(ProbError::EmptyDistribution);
        }

        if p.iter().any(|&x| x < -PROB_TOLERANCE) {
            return Err(ProbError::NegativeProbability);
        }

        let sum: f64 = p.iter().sum();
        if (sum - 1.0).abs() > PROB_TOLERANCE {
            return Err(ProbError::NotNormalized { sum });
        }

        Ok(Self { p })
    }

    /// Create a distribution from unnormalized weights.
    ///
    /// ```rust
    /// use statemat_prob::Dist;
    ///
    /// let d = Dist::from_weights(vec![1.0, 2.0, 3.0, 2.0]).unwrap();
    /// assert!((d.p[2] - 3.0 / 8.0).abs() < 1e-12);
    /// ```
    pub fn from_weights(weights: Vec<f64>) -> Result<Self, ProbError> {
        if weights.is_empty() {
            return Err(ProbError::EmptyDistribution);
        }

        if weights.iter().any(|&x| x < 0.0) {
            return Err(ProbError::NegativeProbability);
        }

        let sum: f64 = weights.iter().sum();
        if sum <= 0.0 {
            return Err(ProbError::ZeroWeights);
        }

        let p: Vec<f64> = weights.iter().map(|w| w / sum).collect();
        Ok(Self { p })
    }

    /// Distribution proportional to the diagonal of a count matrix.
    ///
    /// Applied to `ChannelFwd` this is the weighted occupancy of each state.
    pub fn from_diagonal(matrix: &TransitionMatrix) -> Result<Self, ProbError> {
        let weights = (0..matrix.dim()).map(|i| matrix[(i, i)]).collect();
        Self::from_weights(weights)
    }

    /// Create a uniform distribution over n elements.
    pub fn uniform(n: usize) -> Self {
        assert!(n > 0, "Cannot create uniform distribution over empty set");
        Self {
            p: vec![1.0 / n as f64; n],
        }
    }

    /// Create a point mass at index i.
    pub fn point(n: usize, i: usize) -> Self {
        assert!(i < n, "Index {} out of bounds for size {}", i, n);
        let mut p = vec![0.0; n];
        p[i] = 1.0;
        Self { p }
    }

    /// The support size (number of outcomes with non-zero probability).
    pub fn support_size(&self) -> usize {
        self.p.iter().filter(|&&x| x > PROB_TOLERANCE).count()
    }

    /// The support (indices with non-zero probability).
    pub fn support(&self) -> Vec<usize> {
        self.p
            .iter()
            .enumerate()
            .filter(|(_, &x)| x > PROB_TOLERANCE)
            .map(|(i, _)| i)
            .collect()
    }

    /// The number of outcomes in the sample space.
    pub fn len(&self) -> usize {
        self.p.len()
    }

    /// Always false for a valid Dist.
    pub fn is_empty(&self) -> bool {
        self.p.is_empty()
    }

    /// Get the probability of outcome i.
    pub fn prob(&self, i: usize) -> Result<f64, ProbError> {
        self.p.get(i).copied().ok_or(ProbError::IndexOutOfBounds {
            index: i,
            size: self.p.len(),
        })
    }

    /// Shannon entropy in nats. Zero-probability outcomes contribute 0.
    pub fn entropy(&self) -> f64 {
        self.p
            .iter()
            .filter(|&&x| x > PROB_TOLERANCE)
            .map(|&x| -x * x.ln())
            .sum()
    }

    /// Shannon entropy in bits.
    pub fn entropy_bits(&self) -> f64 {
        self.entropy() / std::f64::consts::LN_2
    }

    /// Most probable index; the first one on ties.
    pub fn mode(&self) -> usize {
        self.p
            .iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |(best, best_p), (i, &p)| {
                if p > best_p {
                    (i, p)
                } else {
                    (best, best_p)
                }
            })
            .0
    }

    /// Total variation distance: `0.5 * Σ |p[i] - q[i]|`.
    pub fn tv_distance(&self, other: &Dist) -> Result<f64, ProbError> {
        if self.p.len() != other.p.len() {
            return Err(ProbError::ShapeMismatch {
                expected: self.p.len(),
                got: other.p.len(),
            });
        }

        let sum: f64 = self
            .p
            .iter()
            .zip(other.p.iter())
            .map(|(a, b)| (a - b).abs())
            .sum();
        Ok(sum / 2.0)
    }

    /// KL divergence `D_KL(self || other)`.
    ///
    /// Infinite if self has support where other has none.
    pub fn kl_divergence(&self, other: &Dist) -> Result<f64, ProbError> {
        if self.p.len() != other.p.len() {
            return Err(ProbError::ShapeMismatch {
                expected: self.p.len(),
                got: other.p.len(),
            });
        }

        let mut kl = 0.0;
        for (p, q) in self.p.iter().zip(other.p.iter()) {
            if *p > PROB_TOLERANCE {
                if *q <= PROB_TOLERANCE {
                    return Ok(f64::INFINITY);
                }
                kl += p * (p / q).ln();
            }
        }
        Ok(kl)
    }
}
