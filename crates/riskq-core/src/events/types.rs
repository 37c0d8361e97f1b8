//! Event payload types for the analysis lifecycle.

use crate::types::{AnalysisId, MethodologyId, RiskItemId};

/// Payload for `on_analysis_started`.
#[derive(Debug, Clone)]
pub struct AnalysisStartedEvent {
    pub analysis_id: AnalysisId,
    pub risk_item: RiskItemId,
    pub methodology: MethodologyId,
}

/// Payload for `on_simulation_progress`.
#[derive(Debug, Clone)]
pub struct SimulationProgressEvent {
    pub completed_draws: u64,
    pub total_draws: u64,
}

/// Payload for `on_analysis_completed`.
#[derive(Debug, Clone)]
pub struct AnalysisCompletedEvent {
    pub analysis_id: AnalysisId,
    pub methodology: MethodologyId,
    pub duration_ms: u64,
}

/// Payload for `on_analysis_failed`.
#[derive(Debug, Clone)]
pub struct AnalysisFailedEvent {
    pub analysis_id: AnalysisId,
    pub error_code: &'static str,
    pub message: String,
}
