//! RiskErrorCode trait for stable, machine-readable error codes.

/// Trait for mapping riskq errors to stable error code strings.
/// Every error enum implements this so collaborators (report renderers,
/// audit writers) can branch on the code instead of the message.
pub trait RiskErrorCode {
    /// Returns the error code string (e.g., "INVALID_PARAMETER").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted coded string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

// Error code constants.
pub const INVALID_PARAMETER: &str = "INVALID_PARAMETER";
pub const COMPUTATION_FAILED: &str = "COMPUTATION_FAILED";
pub const CANCELLED: &str = "CANCELLED";
pub const ANALYSIS_BUSY: &str = "ANALYSIS_BUSY";
pub const UNKNOWN_METHODOLOGY: &str = "UNKNOWN_METHODOLOGY";
pub const INVALID_RISK_REFERENCE: &str = "INVALID_RISK_REFERENCE";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
