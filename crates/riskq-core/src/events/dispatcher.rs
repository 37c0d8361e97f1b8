//! EventDispatcher: synchronous event dispatch with zero overhead when empty.

use std::sync::Arc;

use super::handler::AnalysisEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
#[derive(Default, Clone)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn AnalysisEventHandler>>,
}

impl EventDispatcher {
    /// Create a new empty dispatcher.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Register an event handler.
    pub fn register(&mut self, handler: Arc<dyn AnalysisEventHandler>) {
        self.handlers.push(handler);
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Emit an event to all registered handlers.
    /// A panicking handler is logged and skipped; later handlers still run.
    fn emit<F: Fn(&dyn AnalysisEventHandler)>(&self, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                tracing::warn!("analysis event handler panicked; continuing");
            }
        }
    }

    pub fn emit_analysis_started(&self, event: &AnalysisStartedEvent) {
        self.emit(|h| h.on_analysis_started(event));
    }

    pub fn emit_simulation_progress(&self, event: &SimulationProgressEvent) {
        self.emit(|h| h.on_simulation_progress(event));
    }

    pub fn emit_analysis_completed(&self, event: &AnalysisCompletedEvent) {
        self.emit(|h| h.on_analysis_completed(event));
    }

    pub fn emit_analysis_failed(&self, event: &AnalysisFailedEvent) {
        self.emit(|h| h.on_analysis_failed(event));
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
