//! Computation errors surfaced from sampling and aggregation.

use super::error_code::{self, RiskErrorCode};

/// Unexpected failures while computing a result from validated input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ComputationError {
    #[error("Computation failed: no samples to aggregate")]
    EmptySample,

    #[error("Computation failed: {stage} produced a non-finite value")]
    NonFinite { stage: String },

    #[error("Computation failed: sampling worker panicked: {0}")]
    WorkerPanicked(String),
}

impl ComputationError {
    /// Check that every derived value of `stage` is finite.
    pub fn ensure_finite(stage: &str, values: &[f64]) -> Result<(), Self> {
        if values.iter().all(|v| v.is_finite()) {
            Ok(())
        } else {
            Err(Self::NonFinite {
                stage: stage.to_string(),
            })
        }
    }
}

impl RiskErrorCode for ComputationError {
    fn error_code(&self) -> &'static str {
        error_code::COMPUTATION_FAILED
    }
}
