//! # Session
//!
//! An explicit owner for the most recent result. Interactive callers keep a
//! `Session` instead of process-wide fields: each recompute replaces the held
//! matrices wholesale, and nothing is merged across calls.

use std::sync::Arc;

use tracing::info;

use crate::builder::{MatrixKind, TransitionMatrices, TransitionMatrixBuilder};
use crate::error::CoreError;
use crate::matrix::TransitionMatrix;
use crate::sample::SampleSet;
use crate::timing::Computation;

/// Holds the latest [`TransitionMatrices`], if any.
#[derive(Debug, Clone, Default)]
pub struct Session {
    latest: Option<Arc<TransitionMatrices>>,
    generation: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `samples` on the current thread and replace the held result.
    ///
    /// On error the previous result is kept.
    pub fn recompute(&mut self, samples: SampleSet) -> Result<Arc<TransitionMatrices>, CoreError> {
        let result = TransitionMatrixBuilder.run(samples)?;
        Ok(self.replace(result))
    }

    /// Like [`recompute`](Self::recompute), but the build runs on tokio's
    /// blocking pool so an async caller's executor thread stays free.
    pub async fn recompute_blocking(
        &mut self,
        samples: SampleSet,
    ) -> Result<Arc<TransitionMatrices>, CoreError> {
        let result = tokio::task::spawn_blocking(move || TransitionMatrixBuilder.run(samples))
            .await
            .map_err(|e| CoreError::WorkerFailed {
                reason: e.to_string(),
            })??;
        Ok(self.replace(result))
    }

    fn replace(&mut self, result: TransitionMatrices) -> Arc<TransitionMatrices> {
        let result = Arc::new(result);
        self.generation += 1;
        info!(
            generation = self.generation,
            n = result.n,
            m = result.m,
            replaced = self.latest.is_some(),
            "session result updated"
        );
        self.latest = Some(Arc::clone(&result));
        result
    }

    /// The held result, if any.
    pub fn latest(&self) -> Option<&Arc<TransitionMatrices>> {
        self.latest.as_ref()
    }

    /// One matrix of the held result.
    ///
    /// # Errors
    ///
    /// [`CoreError::NoResults`] when nothing has been computed yet.
    pub fn matrix(&self, kind: MatrixKind) -> Result<&TransitionMatrix, CoreError> {
        self.latest
            .as_deref()
            .map(|r| r.get(kind))
            .ok_or(CoreError::NoResults)
    }

    /// The samples the held result was built from.
    pub fn samples(&self) -> Result<&[Vec<u8>], CoreError> {
        self.latest
            .as_deref()
            .map(|r| r.samples.as_slice())
            .ok_or(CoreError::NoResults)
    }

    /// How many results this session has held.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Drop the held result.
    pub fn clear(&mut self) {
        self.latest = None;
    }
}
