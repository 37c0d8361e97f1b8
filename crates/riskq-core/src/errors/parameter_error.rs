//! Parameter validation errors.
//!
//! Raised at the boundary, before any sampling or scoring starts.

use super::error_code::{self, RiskErrorCode};

/// Errors raised when analysis parameters fail validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParameterError {
    #[error("Invalid parameter iterations: must be greater than 0")]
    NonPositiveIterations,

    #[error("Invalid parameter {field}: min {min} exceeds max {max}")]
    InvertedRange { field: String, min: f64, max: f64 },

    #[error("Invalid parameter {field}: {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Invalid parameter {field}: value must be finite")]
    NotFinite { field: String },

    #[error("Invalid parameter {field} for {subject}: score {value} is outside 1..=10")]
    ScoreOutOfRange {
        subject: String,
        field: String,
        value: i64,
    },

    #[error("Invalid parameter {field}: must not be empty")]
    Empty { field: String },

    #[error("Invalid parameter {field}: duplicate entry {name}")]
    Duplicate { field: String, name: String },

    #[error("Invalid parameter {field}: unknown barrier reference {reference}")]
    UnknownBarrier { field: String, reference: String },

    #[error("Invalid parameter payload: {0}")]
    Malformed(String),

    #[error("Invalid parameter: methodology {methodology} does not accept {supplied} parameters")]
    MethodologyMismatch {
        methodology: String,
        supplied: String,
    },
}

impl ParameterError {
    /// Check that `value` is finite, naming `field` on failure.
    pub fn ensure_finite(field: &str, value: f64) -> Result<(), Self> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(Self::NotFinite {
                field: field.to_string(),
            })
        }
    }

    /// Check that `value` is finite and lies in `[min, max]`.
    pub fn ensure_within(field: &str, value: f64, min: f64, max: f64) -> Result<(), Self> {
        Self::ensure_finite(field, value)?;
        if (min..=max).contains(&value) {
            Ok(())
        } else {
            Err(Self::OutOfRange {
                field: field.to_string(),
                value,
                min,
                max,
            })
        }
    }
}

impl RiskErrorCode for ParameterError {
    fn error_code(&self) -> &'static str {
        error_code::INVALID_PARAMETER
    }
}
