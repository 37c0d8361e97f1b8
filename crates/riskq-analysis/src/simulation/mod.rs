//! Monte Carlo simulation of probability x impact risk values.
//!
//! Four probability shapes, linear probability/impact coupling,
//! nearest-rank percentile (VaR) tables, chunked seedable sampling.

pub mod aggregator;
pub mod engine;
pub mod sampler;
pub mod types;

pub use aggregator::{nearest_rank, MonteCarloAggregator};
pub use engine::MonteCarloEngine;
pub use sampler::{risk_value, sample_probability, RiskDraws};
pub use types::*;
