//! Error handling for riskq.
//! One error enum per concern, `thiserror` only, zero `anyhow`.

pub mod analysis_error;
pub mod computation_error;
pub mod config_error;
pub mod error_code;
pub mod parameter_error;
pub mod storage_error;

pub use analysis_error::AnalysisError;
pub use computation_error::ComputationError;
pub use config_error::ConfigError;
pub use error_code::RiskErrorCode;
pub use parameter_error::ParameterError;
pub use storage_error::StorageError;
