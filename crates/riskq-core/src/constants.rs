//! Shared constants for the riskq analysis engine.

/// riskq version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default Monte Carlo iteration count.
pub const DEFAULT_ITERATIONS: u64 = 10_000;

/// Upper bound on Monte Carlo iterations per run. Every draw is held in
/// memory until aggregation, so this caps a run at roughly 400 MB.
pub const DEFAULT_MAX_ITERATIONS: u64 = 50_000_000;

/// Default confidence levels reported in the percentile table.
pub const DEFAULT_CONFIDENCE_LEVELS: [f64; 5] = [0.05, 0.25, 0.50, 0.75, 0.95];

/// Default confidence level attached to an analysis record.
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// Number of sorted values kept as the visualization sample.
pub const DEFAULT_VISUALIZATION_SAMPLE_SIZE: usize = 1_000;

/// Iteration count at or above which sampling moves onto the rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: u64 = 50_000;

/// Draws per sampling chunk. Each chunk gets its own random stream.
pub const DEFAULT_CHUNK_SIZE: u64 = 8_192;

/// RPN strictly above this value marks a failure mode as critical.
pub const DEFAULT_CRITICAL_RPN_THRESHOLD: u32 = 100;

/// Relative uncertainty band width (range / mean) above which commentary
/// flags the simulation as highly uncertain.
pub const DEFAULT_WIDE_UNCERTAINTY_RATIO: f64 = 1.0;

/// Bow-Tie risk reduction below which barriers are reported as weak.
pub const DEFAULT_WEAK_REDUCTION_RATIO: f64 = 0.5;

/// FMEA score bounds (severity, occurrence, detection).
pub const MIN_FMEA_SCORE: u8 = 1;
pub const MAX_FMEA_SCORE: u8 = 10;
