//! Monte Carlo engine: chunked, cancellable, optionally parallel sampling.
//!
//! Draws are split into fixed-size chunks and chunk `i` always samples from
//! stream `i` of the [`SourceFactory`] and writes its own slice of one
//! preallocated buffer, so a seeded run gives the same result on one thread
//! or many.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info_span};

use riskq_core::config::SimulationConfig;
use riskq_core::constants::{
    DEFAULT_CHUNK_SIZE, DEFAULT_MAX_ITERATIONS, DEFAULT_PARALLEL_THRESHOLD,
};
use riskq_core::errors::{AnalysisError, ComputationError, ParameterError};
use riskq_core::events::{EventDispatcher, SimulationProgressEvent};
use riskq_core::traits::{Cancellable, CancellationToken, SourceFactory};
use riskq_core::tracing::metrics;

use super::aggregator::MonteCarloAggregator;
use super::sampler::{DrawInputs, RiskDraws};
use super::types::{SimulationParameters, SimulationResult};

/// Monte Carlo simulator for risk values.
#[derive(Debug, Clone)]
pub struct MonteCarloEngine {
    chunk_size: u64,
    parallel_threshold: u64,
    max_iterations: u64,
    aggregator: MonteCarloAggregator,
    events: EventDispatcher,
}

impl MonteCarloEngine {
    pub fn new() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            aggregator: MonteCarloAggregator::default(),
            events: EventDispatcher::new(),
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            chunk_size: config.effective_chunk_size().max(1),
            parallel_threshold: config.effective_parallel_threshold(),
            max_iterations: config.effective_max_iterations(),
            aggregator: MonteCarloAggregator::new(config.effective_visualization_sample_size()),
            events: EventDispatcher::new(),
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: u64) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Runs at or above this many iterations sample on the rayon pool.
    pub fn with_parallel_threshold(mut self, threshold: u64) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Runs above this many iterations are rejected before sampling.
    pub fn with_max_iterations(mut self, max_iterations: u64) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_aggregator(mut self, aggregator: MonteCarloAggregator) -> Self {
        self.aggregator = aggregator;
        self
    }

    /// Progress events are emitted once per finished chunk.
    pub fn with_events(mut self, events: EventDispatcher) -> Self {
        self.events = events;
        self
    }

    /// Validate, sample, and aggregate.
    pub fn run(
        &self,
        params: &SimulationParameters,
        sources: &dyn SourceFactory,
        cancel: &CancellationToken,
    ) -> Result<SimulationResult, AnalysisError> {
        params.validate()?;
        if params.iterations > self.max_iterations {
            return Err(ParameterError::OutOfRange {
                field: "iterations".to_string(),
                value: params.iterations as f64,
                min: 1.0,
                max: self.max_iterations as f64,
            }
            .into());
        }

        let parallel = params.iterations >= self.parallel_threshold;
        let span = info_span!(
            "monte_carlo",
            { metrics::ITERATIONS } = params.iterations,
            { metrics::PARALLEL } = parallel,
        );
        let _guard = span.enter();

        let started = Instant::now();
        let values = self.sample(params, sources, cancel, parallel)?;
        debug!(
            { metrics::SAMPLING_TIME_MS } = started.elapsed().as_millis() as u64,
            "sampling finished"
        );

        let started = Instant::now();
        let result = self
            .aggregator
            .aggregate(values, &params.confidence_levels)?;
        debug!(
            { metrics::AGGREGATION_TIME_MS } = started.elapsed().as_millis() as u64,
            mean = result.mean,
            "aggregation finished"
        );
        Ok(result)
    }

    fn sample(
        &self,
        params: &SimulationParameters,
        sources: &dyn SourceFactory,
        cancel: &CancellationToken,
        parallel: bool,
    ) -> Result<Vec<f64>, AnalysisError> {
        let inputs = DrawInputs::from(params);
        let total = params.iterations;
        let len = usize::try_from(total).map_err(|_| ParameterError::OutOfRange {
            field: "iterations".to_string(),
            value: total as f64,
            min: 1.0,
            max: usize::MAX as f64,
        })?;
        let chunk_len = usize::try_from(self.chunk_size).unwrap_or(usize::MAX);
        let completed = AtomicU64::new(0);

        let fill_chunk = |(index, slot): (usize, &mut [f64])| -> Result<(), AnalysisError> {
            cancel.ensure_active()?;
            let count = slot.len() as u64;
            catch_unwind(AssertUnwindSafe(|| {
                let draws = RiskDraws::unchecked(inputs, sources.stream(index as u64), count);
                for (value, draw) in slot.iter_mut().zip(draws) {
                    *value = draw;
                }
            }))
            .map_err(|panic| ComputationError::WorkerPanicked(panic_message(panic.as_ref())))?;

            let done = completed.fetch_add(count, Ordering::Relaxed) + count;
            self.events.emit_simulation_progress(&SimulationProgressEvent {
                completed_draws: done,
                total_draws: total,
            });
            Ok(())
        };

        let mut values = vec![0.0; len];
        if parallel {
            values
                .par_chunks_mut(chunk_len)
                .enumerate()
                .try_for_each(fill_chunk)?;
        } else {
            values
                .chunks_mut(chunk_len)
                .enumerate()
                .try_for_each(fill_chunk)?;
        }
        Ok(values)
    }
}

impl Default for MonteCarloEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
