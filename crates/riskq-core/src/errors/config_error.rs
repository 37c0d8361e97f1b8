//! Errors from loading, validating and writing `riskq.toml`.

use super::error_code::{self, RiskErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("riskq config not readable at {path}")]
    FileNotFound { path: String },

    /// `path` is `<string>` when parsing in-memory TOML.
    #[error("riskq config {path} is not valid TOML: {message}")]
    ParseError { path: String, message: String },

    /// Raised after layering, so `field` names the merged value.
    #[error("config value {field} rejected: {message}")]
    ValidationFailed { field: String, message: String },

    #[error("riskq config could not be serialized: {message}")]
    Serialize { message: String },
}

impl RiskErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        error_code::CONFIG_ERROR
    }
}
