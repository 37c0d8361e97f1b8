//! Errors reported by analysis sinks (persistence collaborators).

use super::error_code::{self, RiskErrorCode};

/// Errors that can occur while handing a finished analysis to storage.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Analysis {id} already persisted")]
    DuplicateRecord { id: String },

    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Sink unavailable: {0}")]
    Unavailable(String),
}

impl RiskErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        error_code::STORAGE_ERROR
    }
}
