//! The persisted analysis record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use riskq_core::errors::StorageError;
use riskq_core::types::{AnalysisId, MethodologyId, RiskItemId};

use super::params::AnalysisParams;
use crate::bowtie::BowTieResult;
use crate::fmea::FmeaResult;
use crate::scenario::ScenarioResult;
use crate::simulation::{SimulationResult, UncertaintyRange};

/// Result payload, one shape per methodology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisResult {
    MonteCarlo(SimulationResult),
    Scenario(ScenarioResult),
    Fmea(FmeaResult),
    BowTie(BowTieResult),
    Comprehensive {
        simulation: SimulationResult,
        scenarios: ScenarioResult,
    },
}

impl AnalysisResult {
    pub fn simulation(&self) -> Option<&SimulationResult> {
        match self {
            Self::MonteCarlo(r) => Some(r),
            Self::Comprehensive { simulation, .. } => Some(simulation),
            _ => None,
        }
    }

    pub fn scenarios(&self) -> Option<&ScenarioResult> {
        match self {
            Self::Scenario(r) => Some(r),
            Self::Comprehensive { scenarios, .. } => Some(scenarios),
            _ => None,
        }
    }

    pub fn fmea(&self) -> Option<&FmeaResult> {
        match self {
            Self::Fmea(r) => Some(r),
            _ => None,
        }
    }

    pub fn bow_tie(&self) -> Option<&BowTieResult> {
        match self {
            Self::BowTie(r) => Some(r),
            _ => None,
        }
    }
}

/// One completed analysis run. Built once by the orchestrator and never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvancedAnalysis {
    pub id: AnalysisId,
    pub risk_item: RiskItemId,
    pub methodology: MethodologyId,
    pub parameters: AnalysisParams,
    pub result: AnalysisResult,
    pub confidence_level: f64,
    /// Lowest to highest requested percentile, when a simulation ran.
    pub uncertainty_range: Option<UncertaintyRange>,
    pub assumptions: Vec<String>,
    pub limitations: Vec<String>,
    pub recommendations: Vec<String>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

impl AdvancedAnalysis {
    pub fn to_json(&self) -> Result<String, StorageError> {
        serde_json::to_string(self).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, StorageError> {
        serde_json::from_str(json).map_err(|e| StorageError::Serialization(e.to_string()))
    }
}
