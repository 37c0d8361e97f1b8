//! Reduces a set of risk values to a [`SimulationResult`].
//!
//! Percentiles use the nearest-rank rule: the value at index
//! `floor(n * level)` of the ascending array, clamped to the last index, with
//! no interpolation. Existing stored analyses were produced with this rule,
//! so it stays fixed.

use riskq_core::constants::DEFAULT_VISUALIZATION_SAMPLE_SIZE;
use riskq_core::errors::ComputationError;

use super::types::{normalize_levels, PercentileValue, SimulationResult};

/// Monte Carlo aggregator.
#[derive(Debug, Clone, Copy)]
pub struct MonteCarloAggregator {
    visualization_sample_size: usize,
}

impl MonteCarloAggregator {
    pub fn new(visualization_sample_size: usize) -> Self {
        Self {
            visualization_sample_size,
        }
    }

    pub fn visualization_sample_size(&self) -> usize {
        self.visualization_sample_size
    }

    /// Sort `values` and compute the descriptive statistics.
    pub fn aggregate(
        &self,
        mut values: Vec<f64>,
        confidence_levels: &[f64],
    ) -> Result<SimulationResult, ComputationError> {
        if values.is_empty() {
            return Err(ComputationError::EmptySample);
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ComputationError::NonFinite {
                stage: "sampling".to_string(),
            });
        }

        values.sort_by(f64::total_cmp);
        let n = values.len();
        let min = values[0];
        let max = values[n - 1];

        let (mean, standard_deviation) = if min == max {
            // identical draws: skip the sum so rounding cannot leak in
            (min, 0.0)
        } else {
            let mean = values.iter().sum::<f64>() / n as f64;
            let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
            (mean, variance.sqrt())
        };
        if !mean.is_finite() || !standard_deviation.is_finite() {
            return Err(ComputationError::NonFinite {
                stage: "aggregation".to_string(),
            });
        }

        let percentiles = normalize_levels(confidence_levels)
            .into_iter()
            .map(|level| PercentileValue {
                confidence_level: level,
                value: nearest_rank(&values, level),
            })
            .collect();

        let sample_len = self.visualization_sample_size.min(n);

        Ok(SimulationResult {
            mean,
            median: values[n / 2],
            standard_deviation,
            min,
            max,
            standard_error: standard_deviation / (n as f64).sqrt(),
            percentiles,
            visualization_sample: values[..sample_len].to_vec(),
            total_simulations: n as u64,
        })
    }
}

impl Default for MonteCarloAggregator {
    fn default() -> Self {
        Self::new(DEFAULT_VISUALIZATION_SAMPLE_SIZE)
    }
}

/// Nearest-rank percentile of an ascending, non-empty slice.
pub fn nearest_rank(sorted: &[f64], level: f64) -> f64 {
    let n = sorted.len();
    let idx = (n as f64 * level).floor() as usize;
    sorted[idx.min(n - 1)]
}
