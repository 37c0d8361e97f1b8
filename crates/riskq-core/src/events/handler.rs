//! AnalysisEventHandler trait, all methods with no-op defaults.

use super::types::*;

/// Trait for observing analysis runs.
///
/// Handlers override only the events they care about. `Send + Sync` because
/// progress is reported from sampling workers.
pub trait AnalysisEventHandler: Send + Sync {
    fn on_analysis_started(&self, _event: &AnalysisStartedEvent) {}
    fn on_simulation_progress(&self, _event: &SimulationProgressEvent) {}
    fn on_analysis_completed(&self, _event: &AnalysisCompletedEvent) {}
    fn on_analysis_failed(&self, _event: &AnalysisFailedEvent) {}
}
