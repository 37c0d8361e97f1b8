//! Monte Carlo simulation configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CHUNK_SIZE, DEFAULT_CONFIDENCE_LEVELS, DEFAULT_ITERATIONS, DEFAULT_MAX_ITERATIONS,
    DEFAULT_PARALLEL_THRESHOLD, DEFAULT_VISUALIZATION_SAMPLE_SIZE,
};

/// Configuration for the simulation subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SimulationConfig {
    /// Iterations for parameters built from configuration. Default: 10,000.
    pub default_iterations: Option<u64>,
    /// Largest iteration count a run accepts. Default: 50,000,000.
    pub max_iterations: Option<u64>,
    /// Confidence levels used when a request supplies none.
    #[serde(default)]
    pub confidence_levels: Vec<f64>,
    /// Sorted-prefix length kept for charts. Default: 1,000.
    pub visualization_sample_size: Option<usize>,
    /// Iterations at which sampling moves onto rayon. Default: 50,000.
    pub parallel_threshold: Option<u64>,
    /// Draws per random stream. Default: 8,192.
    pub chunk_size: Option<u64>,
    /// Fixed seed for reproducible runs. Unset means OS entropy.
    pub seed: Option<u64>,
}

impl SimulationConfig {
    pub fn effective_default_iterations(&self) -> u64 {
        self.default_iterations.unwrap_or(DEFAULT_ITERATIONS)
    }

    pub fn effective_max_iterations(&self) -> u64 {
        self.max_iterations.unwrap_or(DEFAULT_MAX_ITERATIONS)
    }

    pub fn effective_confidence_levels(&self) -> Vec<f64> {
        if self.confidence_levels.is_empty() {
            DEFAULT_CONFIDENCE_LEVELS.to_vec()
        } else {
            self.confidence_levels.clone()
        }
    }

    pub fn effective_visualization_sample_size(&self) -> usize {
        self.visualization_sample_size
            .unwrap_or(DEFAULT_VISUALIZATION_SAMPLE_SIZE)
    }

    pub fn effective_parallel_threshold(&self) -> u64 {
        self.parallel_threshold.unwrap_or(DEFAULT_PARALLEL_THRESHOLD)
    }

    pub fn effective_chunk_size(&self) -> u64 {
        self.chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE)
    }
}
