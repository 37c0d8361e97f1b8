//! Failure Mode and Effects Analysis: Risk Priority Number ranking.

pub mod ranker;
pub mod types;

pub use ranker::FmeaRanker;
pub use types::*;
