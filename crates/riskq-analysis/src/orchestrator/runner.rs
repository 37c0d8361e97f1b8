//! Runs one analysis at a time: validate, dispatch, assemble, persist.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, warn};

use riskq_core::config::RiskConfig;
use riskq_core::errors::{AnalysisError, ParameterError, RiskErrorCode};
use riskq_core::events::{
    AnalysisCompletedEvent, AnalysisFailedEvent, AnalysisStartedEvent, EventDispatcher,
};
use riskq_core::traits::{CancellationToken, SeededStreams, SourceFactory};
use riskq_core::tracing::metrics;
use riskq_core::types::{AnalysisId, MethodologyId, RiskItemId};

use super::narrative::{Narrative, NarrativeThresholds};
use super::params::AnalysisParams;
use super::record::{AdvancedAnalysis, AnalysisResult};
use super::sink::AnalysisSink;
use crate::bowtie::BowTieComposer;
use crate::fmea::FmeaRanker;
use crate::methodology::MethodologyCatalogue;
use crate::scenario::ScenarioEvaluator;
use crate::simulation::MonteCarloEngine;

/// Lifecycle of the orchestrator's most recent run.
///
/// `Idle -> Running -> Completed | Failed -> Idle`. A finished state stays
/// readable until [`AnalysisOrchestrator::reset`] or the next submit; either
/// one returns it to `Idle`, and a submit then moves on to `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Idle,
    Running,
    Completed,
    Failed,
}

/// What a caller submits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub risk_item: RiskItemId,
    pub methodology: MethodologyId,
    pub parameters: AnalysisParams,
    /// Defaults to the configured confidence level.
    #[serde(default)]
    pub confidence_level: Option<f64>,
    #[serde(default)]
    pub notes: String,
}

impl AnalysisRequest {
    pub fn new(
        risk_item: impl Into<RiskItemId>,
        methodology: impl Into<MethodologyId>,
        parameters: AnalysisParams,
    ) -> Self {
        Self {
            risk_item: risk_item.into(),
            methodology: methodology.into(),
            parameters,
            confidence_level: None,
            notes: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_confidence_level(mut self, level: f64) -> Self {
        self.confidence_level = Some(level);
        self
    }
}

/// Runs one analysis at a time and hands each finished record to the sink.
pub struct AnalysisOrchestrator {
    config: RiskConfig,
    catalogue: MethodologyCatalogue,
    sink: Arc<dyn AnalysisSink>,
    sources: Arc<dyn SourceFactory>,
    events: EventDispatcher,
    busy: AtomicBool,
    state: Mutex<RunState>,
}

/// Clears the busy flag when a run ends, however it ends.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl AnalysisOrchestrator {
    /// Seeded from `config.simulation.seed` when set, otherwise from entropy.
    pub fn new(config: RiskConfig, sink: Arc<dyn AnalysisSink>) -> Self {
        let sources: Arc<dyn SourceFactory> = match config.simulation.seed {
            Some(seed) => Arc::new(SeededStreams::new(seed)),
            None => Arc::new(SeededStreams::from_entropy()),
        };
        Self {
            config,
            catalogue: MethodologyCatalogue::builtin(),
            sink,
            sources,
            events: EventDispatcher::new(),
            busy: AtomicBool::new(false),
            state: Mutex::new(RunState::Idle),
        }
    }

    pub fn with_source_factory(mut self, sources: Arc<dyn SourceFactory>) -> Self {
        self.sources = sources;
        self
    }

    pub fn with_catalogue(mut self, catalogue: MethodologyCatalogue) -> Self {
        self.catalogue = catalogue;
        self
    }

    pub fn with_events(mut self, events: EventDispatcher) -> Self {
        self.events = events;
        self
    }

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    pub fn catalogue(&self) -> &MethodologyCatalogue {
        &self.catalogue
    }

    pub fn state(&self) -> RunState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Return to `Idle` after a completed or failed run. No effect while running.
    pub fn reset(&self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if *state != RunState::Running {
            *state = RunState::Idle;
        }
    }

    /// Clear the previous run's finished state, then mark the new run as running.
    fn begin_run(&self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if matches!(*state, RunState::Completed | RunState::Failed) {
            debug!(previous = ?*state, "clearing finished run state");
            *state = RunState::Idle;
        }
        *state = RunState::Running;
    }

    fn set_state(&self, next: RunState) {
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = next;
    }

    pub fn submit(&self, request: AnalysisRequest) -> Result<AdvancedAnalysis, AnalysisError> {
        self.submit_with_cancel(request, &CancellationToken::new())
    }

    /// Run `request`, checking `cancel` between sampling chunks.
    ///
    /// Fails with `Busy` while another run holds the orchestrator.
    pub fn submit_with_cancel(
        &self,
        request: AnalysisRequest,
        cancel: &CancellationToken,
    ) -> Result<AdvancedAnalysis, AnalysisError> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(AnalysisError::Busy);
        }
        let _busy = BusyGuard(&self.busy);
        self.begin_run();

        let id = AnalysisId::generate();
        let span = info_span!(
            "analysis",
            { metrics::ANALYSIS_ID } = %id,
            { metrics::METHODOLOGY } = %request.methodology,
            { metrics::RISK_ITEM } = %request.risk_item,
        );
        let _guard = span.enter();

        self.events.emit_analysis_started(&AnalysisStartedEvent {
            analysis_id: id,
            risk_item: request.risk_item.clone(),
            methodology: request.methodology.clone(),
        });

        let started = Instant::now();
        let methodology = request.methodology.clone();
        match self.execute(id, request, cancel) {
            Ok(analysis) => {
                let duration_ms = started.elapsed().as_millis() as u64;
                info!({ metrics::ANALYSIS_TIME_MS } = duration_ms, "analysis completed");
                self.set_state(RunState::Completed);
                self.events.emit_analysis_completed(&AnalysisCompletedEvent {
                    analysis_id: id,
                    methodology,
                    duration_ms,
                });
                Ok(analysis)
            }
            Err(e) => {
                warn!(error = %e, code = e.error_code(), "analysis failed");
                self.set_state(RunState::Failed);
                self.events.emit_analysis_failed(&AnalysisFailedEvent {
                    analysis_id: id,
                    error_code: e.error_code(),
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    fn execute(
        &self,
        id: AnalysisId,
        mut request: AnalysisRequest,
        cancel: &CancellationToken,
    ) -> Result<AdvancedAnalysis, AnalysisError> {
        if request.risk_item.is_blank() {
            return Err(AnalysisError::InvalidRiskReference(
                request.risk_item.to_string(),
            ));
        }
        let methodology = self
            .catalogue
            .get(&request.methodology)
            .ok_or_else(|| AnalysisError::UnknownMethodology(request.methodology.to_string()))?;
        if methodology.kind != request.parameters.kind() {
            return Err(ParameterError::MethodologyMismatch {
                methodology: methodology.id.to_string(),
                supplied: request.parameters.kind().to_string(),
            }
            .into());
        }

        let confidence_level = request
            .confidence_level
            .unwrap_or_else(|| self.config.analysis.effective_confidence_level());
        ParameterError::ensure_finite("confidence_level", confidence_level)?;
        if !(confidence_level > 0.0 && confidence_level < 1.0) {
            return Err(ParameterError::OutOfRange {
                field: "confidence_level".to_string(),
                value: confidence_level,
                min: 0.0,
                max: 1.0,
            }
            .into());
        }

        // record the levels actually used
        if let Some(sim) = request.parameters.simulation_mut() {
            if sim.confidence_levels.is_empty() {
                sim.confidence_levels = self.config.simulation.effective_confidence_levels();
            }
            sim.confidence_levels = sim.normalized_confidence_levels();
        }

        let result = self.dispatch(&request.parameters, cancel)?;

        let uncertainty_range = result.simulation().and_then(|s| s.uncertainty_range());
        let narrative = Narrative::for_result(
            &result,
            NarrativeThresholds::from(&self.config.analysis),
        );

        let analysis = AdvancedAnalysis {
            id,
            risk_item: request.risk_item,
            methodology: request.methodology,
            parameters: request.parameters,
            result,
            confidence_level,
            uncertainty_range,
            assumptions: narrative.assumptions,
            limitations: narrative.limitations,
            recommendations: narrative.recommendations,
            notes: request.notes,
            created_at: Utc::now(),
        };

        self.sink.persist(&analysis)?;
        Ok(analysis)
    }

    fn dispatch(
        &self,
        params: &AnalysisParams,
        cancel: &CancellationToken,
    ) -> Result<AnalysisResult, AnalysisError> {
        let result = match params {
            AnalysisParams::MonteCarlo(p) => {
                AnalysisResult::MonteCarlo(self.engine().run(p, self.sources.as_ref(), cancel)?)
            }
            AnalysisParams::Scenario(set) => {
                AnalysisResult::Scenario(ScenarioEvaluator::new().evaluate(set)?)
            }
            AnalysisParams::Fmea(p) => {
                let threshold = p
                    .critical_threshold
                    .unwrap_or_else(|| self.config.fmea.effective_critical_threshold());
                AnalysisResult::Fmea(FmeaRanker::new(threshold).rank(&p.failure_modes)?)
            }
            AnalysisParams::BowTie(model) => {
                AnalysisResult::BowTie(BowTieComposer::new().compose(model)?)
            }
            AnalysisParams::Comprehensive(p) => {
                // validate both halves before spending time on sampling
                let set = p.scenario_set();
                let evaluator = ScenarioEvaluator::new();
                evaluator.validate(&set)?;
                p.simulation.validate()?;
                let simulation = self
                    .engine()
                    .run(&p.simulation, self.sources.as_ref(), cancel)?;
                AnalysisResult::Comprehensive {
                    simulation,
                    scenarios: evaluator.evaluate(&set)?,
                }
            }
        };
        Ok(result)
    }

    fn engine(&self) -> MonteCarloEngine {
        MonteCarloEngine::from_config(&self.config.simulation).with_events(self.events.clone())
    }
}

impl std::fmt::Debug for AnalysisOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisOrchestrator")
            .field("config", &self.config)
            .field("catalogue", &self.catalogue.len())
            .field("state", &self.state())
            .field("busy", &self.is_busy())
            .finish()
    }
}
