//! Analysis record configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CONFIDENCE_LEVEL, DEFAULT_WEAK_REDUCTION_RATIO, DEFAULT_WIDE_UNCERTAINTY_RATIO,
};

/// Configuration for assembling analysis records.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Confidence level stamped on records. Default: 0.95.
    pub confidence_level: Option<f64>,
    /// Uncertainty range / mean above which commentary flags a wide band. Default: 1.0.
    pub wide_uncertainty_ratio: Option<f64>,
    /// Bow-Tie risk reduction below which barriers are called weak. Default: 0.5.
    pub weak_reduction_ratio: Option<f64>,
}

impl AnalysisConfig {
    pub fn effective_confidence_level(&self) -> f64 {
        self.confidence_level.unwrap_or(DEFAULT_CONFIDENCE_LEVEL)
    }

    pub fn effective_wide_uncertainty_ratio(&self) -> f64 {
        self.wide_uncertainty_ratio
            .unwrap_or(DEFAULT_WIDE_UNCERTAINTY_RATIO)
    }

    pub fn effective_weak_reduction_ratio(&self) -> f64 {
        self.weak_reduction_ratio
            .unwrap_or(DEFAULT_WEAK_REDUCTION_RATIO)
    }
}
