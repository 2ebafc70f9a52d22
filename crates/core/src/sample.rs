//! # Samples and State Indices
//!
//! A sample is one observation of `m` binary channels, channel 0 being the most
//! significant bit. Reading a sample as a big-endian binary number gives its
//! *state index*, the row/column coordinate into every transition matrix.
//!
//! ```rust
//! use statemat_core::sample::{decode, encode, suffix_index};
//!
//! let s = [1, 0, 1];
//! assert_eq!(encode(&s), 5);
//! assert_eq!(suffix_index(&s, 0), 1); // bits 1..3 = "01"
//! assert_eq!(decode(5, 3), vec![1, 0, 1]);
//! ```

use crate::error::CoreError;

/// Widest sample accepted. Six dense `4^m` matrices of `f64` stay under
/// 800 MiB at this width.
pub const MAX_CHANNELS: usize = 12;

/// Number of states for `m` channels (`2^m`).
pub fn state_count(m: usize) -> usize {
    1usize << m
}

/// Big-endian binary-to-integer conversion of a full sample.
pub fn encode(bits: &[u8]) -> usize {
    bits.iter()
        .fold(0usize, |acc, &b| (acc << 1) | usize::from(b & 1))
}

/// Big-endian conversion of the bits *after* offset `j` (`j+1 .. m-1`).
///
/// The result lives in the low end of the state index space: fewer bits are
/// read, so for larger `j` the range shrinks to `0 .. 2^(m-1-j)`.
pub fn suffix_index(bits: &[u8], j: usize) -> usize {
    bits.get(j + 1..).map(encode).unwrap_or(0)
}

/// Inverse of [`encode`] for a given width.
pub fn decode(index: usize, m: usize) -> Vec<u8> {
    (0..m)
        .map(|c| ((index >> (m - 1 - c)) & 1) as u8)
        .collect()
}

/// Copy of `bits` with channel `j` inverted.
pub fn flip(bits: &[u8], j: usize) -> Vec<u8> {
    let mut flipped = bits.to_vec();
    flipped[j] ^= 1;
    flipped
}

/// Render a sample as a bit string, e.g. `[1, 0, 1]` -> `"101"`.
pub fn to_bit_string(bits: &[u8]) -> String {
    bits.iter().map(|&b| if b == 0 { '0' } else { '1' }).collect()
}

/// Check `(n, m, samples)` against the builder's input rules.
///
/// Malformed input is reported before degenerate input, so a single malformed
/// sample yields an `InvalidArgument`-class error rather than
/// [`CoreError::DegenerateInput`].
pub fn validate(n: usize, m: usize, samples: &[Vec<u8>]) -> Result<(), CoreError> {
    if n == 0 {
        return Err(CoreError::EmptySampleSet);
    }
    if samples.len() != n {
        return Err(CoreError::SampleCountMismatch {
            declared: n,
            actual: samples.len(),
        });
    }
    if m == 0 || m > MAX_CHANNELS {
        return Err(CoreError::ChannelCountOutOfRange {
            channels: m,
            max: MAX_CHANNELS,
        });
    }
    for (index, sample) in samples.iter().enumerate() {
        if sample.len() != m {
            return Err(CoreError::WidthMismatch {
                index,
                expected: m,
                got: sample.len(),
            });
        }
        if let Some((channel, &value)) = sample.iter().enumerate().find(|(_, &b)| b > 1) {
            return Err(CoreError::InvalidBit {
                index,
                channel,
                value,
            });
        }
    }
    if n == 1 {
        return Err(CoreError::DegenerateInput { n });
    }
    Ok(())
}

/// An owned, validated sequence of `n ≥ 2` samples of equal width `m`.
///
/// Sources (manual entry, files, random generation) produce a `SampleSet`;
/// the builder accepts one directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleSet {
    samples: Vec<Vec<u8>>,
    m: usize,
}

impl SampleSet {
    /// Validate and wrap a sample sequence. The width is taken from the first
    /// sample.
    ///
    /// # Errors
    ///
    /// Same rules as [`validate`]: empty input, ragged widths, non-bit values
    /// and single-sample input are rejected.
    pub fn new(samples: Vec<Vec<u8>>) -> Result<Self, CoreError> {
        let m = samples.first().map(Vec::len).unwrap_or(0);
        validate(samples.len(), m, &samples)?;
        Ok(Self { samples, m })
    }

    /// Number of samples.
    pub fn n(&self) -> usize {
        self.samples.len()
    }

    /// Number of channels per sample.
    pub fn m(&self) -> usize {
        self.m
    }

    pub fn samples(&self) -> &[Vec<u8>] {
        &self.samples
    }

    pub fn get(&self, i: usize) -> Option<&[u8]> {
        self.samples.get(i).map(Vec::as_slice)
    }

    /// State index of every sample, in order.
    pub fn state_indices(&self) -> Vec<usize> {
        self.samples.iter().map(|s| encode(s)).collect()
    }

    pub fn into_inner(self) -> Vec<Vec<u8>> {
        self.samples
    }
}
