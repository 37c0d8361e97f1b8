//! Structured span field names shared by every engine.
//!
//! Consistent names keep log queries working across methodologies.

/// Analysis record identifier.
pub const ANALYSIS_ID: &str = "analysis_id";

/// Methodology identifier being run.
pub const METHODOLOGY: &str = "methodology";

/// Risk item the analysis belongs to.
pub const RISK_ITEM: &str = "risk_item";

/// Monte Carlo: number of draws requested.
pub const ITERATIONS: &str = "iterations";

/// Monte Carlo: whether sampling ran on the rayon pool.
pub const PARALLEL: &str = "parallel";

/// Monte Carlo: sampling phase duration in milliseconds.
pub const SAMPLING_TIME_MS: &str = "sampling_time_ms";

/// Monte Carlo: aggregation phase duration in milliseconds.
pub const AGGREGATION_TIME_MS: &str = "aggregation_time_ms";

/// Whole-run duration in milliseconds.
pub const ANALYSIS_TIME_MS: &str = "analysis_time_ms";

/// FMEA: number of modes above the critical threshold.
pub const CRITICAL_MODES: &str = "critical_modes";
