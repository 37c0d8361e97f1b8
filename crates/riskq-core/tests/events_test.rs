//! Tests for the riskq event system.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use riskq_core::events::*;
use riskq_core::types::{AnalysisId, MethodologyId, RiskItemId};

/// A test handler that counts events.
#[derive(Default)]
struct CountingHandler {
    started: AtomicUsize,
    progress: AtomicUsize,
    completed: AtomicUsize,
    failed: AtomicUsize,
}

impl AnalysisEventHandler for CountingHandler {
    fn on_analysis_started(&self, _event: &AnalysisStartedEvent) {
        self.started.fetch_add(1, Ordering::Relaxed);
    }

    fn on_simulation_progress(&self, _event: &SimulationProgressEvent) {
        self.progress.fetch_add(1, Ordering::Relaxed);
    }

    fn on_analysis_completed(&self, _event: &AnalysisCompletedEvent) {
        self.completed.fetch_add(1, Ordering::Relaxed);
    }

    fn on_analysis_failed(&self, _event: &AnalysisFailedEvent) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }
}

struct PanickingHandler;

impl AnalysisEventHandler for PanickingHandler {
    fn on_analysis_started(&self, _event: &AnalysisStartedEvent) {
        panic!("handler blew up");
    }
}

fn started_event() -> AnalysisStartedEvent {
    AnalysisStartedEvent {
        analysis_id: AnalysisId::generate(),
        risk_item: RiskItemId::new("RISK-1"),
        methodology: MethodologyId::new("monte_carlo"),
    }
}

#[test]
fn test_empty_dispatcher_is_noop() {
    let dispatcher = EventDispatcher::new();
    assert_eq!(dispatcher.handler_count(), 0);
    dispatcher.emit_analysis_started(&started_event());
}

#[test]
fn test_events_reach_every_handler() {
    let a = Arc::new(CountingHandler::default());
    let b = Arc::new(CountingHandler::default());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(a.clone());
    dispatcher.register(b.clone());

    dispatcher.emit_analysis_started(&started_event());
    dispatcher.emit_simulation_progress(&SimulationProgressEvent {
        completed_draws: 10,
        total_draws: 20,
    });
    dispatcher.emit_analysis_completed(&AnalysisCompletedEvent {
        analysis_id: AnalysisId::generate(),
        methodology: MethodologyId::new("fmea"),
        duration_ms: 3,
    });

    for h in [&a, &b] {
        assert_eq!(h.started.load(Ordering::Relaxed), 1);
        assert_eq!(h.progress.load(Ordering::Relaxed), 1);
        assert_eq!(h.completed.load(Ordering::Relaxed), 1);
        assert_eq!(h.failed.load(Ordering::Relaxed), 0);
    }
}

#[test]
fn test_panicking_handler_does_not_block_others() {
    let counter = Arc::new(CountingHandler::default());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(Arc::new(PanickingHandler));
    dispatcher.register(counter.clone());

    dispatcher.emit_analysis_started(&started_event());

    assert_eq!(counter.started.load(Ordering::Relaxed), 1);
}
