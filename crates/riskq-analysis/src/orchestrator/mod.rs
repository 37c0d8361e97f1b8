//! Analysis orchestration: request validation, methodology dispatch,
//! record assembly and persistence.

pub mod narrative;
pub mod params;
pub mod record;
pub mod runner;
pub mod sink;

pub use narrative::{Narrative, NarrativeThresholds};
pub use params::{AnalysisParams, ComprehensiveParams, FmeaParams};
pub use record::{AdvancedAnalysis, AnalysisResult};
pub use runner::{AnalysisOrchestrator, AnalysisRequest, RunState};
pub use sink::{AnalysisSink, InMemoryAnalysisSink};
