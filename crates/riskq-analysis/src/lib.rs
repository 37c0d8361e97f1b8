//! Quantitative risk analysis: Monte Carlo simulation, scenario analysis,
//! FMEA ranking and Bow-Tie barrier composition behind one orchestrator.

pub mod bowtie;
pub mod fmea;
pub mod methodology;
pub mod orchestrator;
pub mod scenario;
pub mod simulation;

pub use orchestrator::{AnalysisOrchestrator, AnalysisRequest};
