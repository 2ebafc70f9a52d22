//! Uniformly random samples.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use statemat_core::SampleSet;
use tracing::debug;

use crate::error::IoError;

/// `n` samples of `m` independent fair bits drawn from `rng`.
pub fn random_samples<R: Rng>(n: usize, m: usize, rng: &mut R) -> Result<SampleSet, IoError> {
    let samples: Vec<Vec<u8>> = (0..n)
        .map(|_| (0..m).map(|_| u8::from(rng.random::<bool>())).collect())
        .collect();
    Ok(SampleSet::new(samples)?)
}

/// Reproducible [`random_samples`] from a seed.
pub fn random_samples_seeded(n: usize, m: usize, seed: u64) -> Result<SampleSet, IoError> {
    debug!(n, m, seed, "generating seeded samples");
    let mut rng = SmallRng::seed_from_u64(seed);
    random_samples(n, m, &mut rng)
}

/// [`random_samples`] seeded from the operating system.
pub fn random_samples_from_entropy(n: usize, m: usize) -> Result<SampleSet, IoError> {
    let mut rng = SmallRng::from_os_rng();
    random_samples(n, m, &mut rng)
}
