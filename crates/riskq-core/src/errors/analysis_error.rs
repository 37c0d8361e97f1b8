//! Top-level analysis errors.

use super::error_code::{self, RiskErrorCode};
use super::{ComputationError, ConfigError, ParameterError, StorageError};

/// Errors that can end an analysis run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("{0}")]
    InvalidParameter(#[from] ParameterError),

    #[error("{0}")]
    ComputationFailed(#[from] ComputationError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Unknown methodology: {0}")]
    UnknownMethodology(String),

    #[error("Invalid risk reference: {0:?}")]
    InvalidRiskReference(String),

    #[error("An analysis is already running")]
    Busy,

    #[error("Analysis cancelled")]
    Cancelled,
}

impl RiskErrorCode for AnalysisError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidParameter(e) => e.error_code(),
            Self::ComputationFailed(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
            Self::UnknownMethodology(_) => error_code::UNKNOWN_METHODOLOGY,
            Self::InvalidRiskReference(_) => error_code::INVALID_RISK_REFERENCE,
            Self::Busy => error_code::ANALYSIS_BUSY,
            Self::Cancelled => error_code::CANCELLED,
        }
    }
}
