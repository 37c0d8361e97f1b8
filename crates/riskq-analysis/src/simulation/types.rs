//! Types for the Monte Carlo simulation engine.

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

use riskq_core::config::SimulationConfig;
use riskq_core::errors::ParameterError;

/// Statistical shape used to draw the probability component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbabilityDistribution {
    Normal,
    Uniform,
    Triangular,
    Lognormal,
}

impl ProbabilityDistribution {
    pub const ALL: &'static [ProbabilityDistribution] = &[
        Self::Normal,
        Self::Uniform,
        Self::Triangular,
        Self::Lognormal,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Uniform => "uniform",
            Self::Triangular => "triangular",
            Self::Lognormal => "lognormal",
        }
    }
}

impl std::fmt::Display for ProbabilityDistribution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Inputs to a Monte Carlo run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    pub iterations: u64,
    #[serde(rename = "probability_distribution")]
    pub distribution: ProbabilityDistribution,
    pub probability_min: f64,
    pub probability_max: f64,
    pub impact_min: f64,
    pub impact_max: f64,
    /// Linear coupling between probability and impact, typically in [-1, 1].
    #[serde(default)]
    pub correlation_factor: f64,
    /// Levels in (0, 1) to report in the percentile table.
    #[serde(default)]
    pub confidence_levels: Vec<f64>,
}

impl SimulationParameters {
    /// Parameters with iteration count and confidence levels taken from
    /// `config`, and no probability/impact coupling.
    pub fn from_config(
        config: &SimulationConfig,
        distribution: ProbabilityDistribution,
        probability: (f64, f64),
        impact: (f64, f64),
    ) -> Self {
        Self {
            iterations: config.effective_default_iterations(),
            distribution,
            probability_min: probability.0,
            probability_max: probability.1,
            impact_min: impact.0,
            impact_max: impact.1,
            correlation_factor: 0.0,
            confidence_levels: config.effective_confidence_levels(),
        }
    }

    /// Validate every field. Nothing is sampled until this passes.
    pub fn validate(&self) -> Result<(), ParameterError> {
        if self.iterations == 0 {
            return Err(ParameterError::NonPositiveIterations);
        }

        ParameterError::ensure_within("probability_min", self.probability_min, 0.0, 1.0)?;
        ParameterError::ensure_within("probability_max", self.probability_max, 0.0, 1.0)?;
        if self.probability_min > self.probability_max {
            return Err(ParameterError::InvertedRange {
                field: "probability".to_string(),
                min: self.probability_min,
                max: self.probability_max,
            });
        }

        ParameterError::ensure_within("impact_min", self.impact_min, 0.0, f64::MAX)?;
        ParameterError::ensure_within("impact_max", self.impact_max, 0.0, f64::MAX)?;
        if self.impact_min > self.impact_max {
            return Err(ParameterError::InvertedRange {
                field: "impact".to_string(),
                min: self.impact_min,
                max: self.impact_max,
            });
        }

        ParameterError::ensure_finite("correlation_factor", self.correlation_factor)?;

        for level in &self.confidence_levels {
            ParameterError::ensure_finite("confidence_levels", *level)?;
            if !(*level > 0.0 && *level < 1.0) {
                return Err(ParameterError::OutOfRange {
                    field: "confidence_levels".to_string(),
                    value: *level,
                    min: 0.0,
                    max: 1.0,
                });
            }
        }
        Ok(())
    }

    /// Confidence levels ascending with duplicates removed.
    pub fn normalized_confidence_levels(&self) -> Vec<f64> {
        normalize_levels(&self.confidence_levels)
    }
}

pub(crate) fn normalize_levels(levels: &[f64]) -> Vec<f64> {
    let mut levels = levels.to_vec();
    levels.sort_by(f64::total_cmp);
    levels.dedup();
    levels
}

/// One row of the percentile (VaR) table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileValue {
    pub confidence_level: f64,
    pub value: f64,
}

/// Band between the lowest and highest requested percentile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UncertaintyRange {
    pub min: f64,
    pub max: f64,
}

impl UncertaintyRange {
    pub fn width(&self) -> f64 {
        self.max - self.min
    }
}

/// Descriptive statistics of one Monte Carlo run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub mean: f64,
    /// Value at index `floor(n/2)` of the sorted draws.
    pub median: f64,
    /// Population standard deviation.
    pub standard_deviation: f64,
    pub min: f64,
    pub max: f64,
    /// `standard_deviation / sqrt(n)`.
    pub standard_error: f64,
    /// Nearest-rank percentiles, ascending by confidence level.
    pub percentiles: Vec<PercentileValue>,
    /// The first K values of the sorted draws. A prefix window, so it only
    /// covers the low tail once n exceeds K.
    pub visualization_sample: Vec<f64>,
    pub total_simulations: u64,
}

impl SimulationResult {
    /// Value recorded for exactly `level`, if it was requested.
    pub fn percentile(&self, level: f64) -> Option<f64> {
        self.percentiles
            .iter()
            .find(|p| p.confidence_level == level)
            .map(|p| p.value)
    }

    /// Value at risk at `level`; an alias of [`Self::percentile`].
    pub fn value_at_risk(&self, level: f64) -> Option<f64> {
        self.percentile(level)
    }

    /// Values at the lowest and highest requested levels.
    pub fn uncertainty_range(&self) -> Option<UncertaintyRange> {
        let first = self.percentiles.first()?;
        let last = self.percentiles.last()?;
        Some(UncertaintyRange {
            min: first.value,
            max: last.value,
        })
    }

    /// Normal-approximation interval for the mean at `level`
    /// (`mean ± z * standard_error`).
    pub fn mean_confidence_interval(&self, level: f64) -> Option<UncertaintyRange> {
        if !(level > 0.0 && level < 1.0) {
            return None;
        }
        let z = Normal::new(0.0, 1.0).ok()?.inverse_cdf(0.5 + level / 2.0);
        let half = z * self.standard_error;
        Some(UncertaintyRange {
            min: self.mean - half,
            max: self.mean + half,
        })
    }
}
