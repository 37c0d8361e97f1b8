//! Typed parameter payloads, one variant per methodology.

use serde::{Deserialize, Serialize};

use riskq_core::errors::ParameterError;

use crate::bowtie::BowTieModel;
use crate::fmea::FailureMode;
use crate::methodology::MethodologyKind;
use crate::scenario::{Scenario, ScenarioSet};
use crate::simulation::SimulationParameters;

/// FMEA inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FmeaParams {
    pub failure_modes: Vec<FailureMode>,
    /// Overrides the configured critical RPN threshold for this run.
    #[serde(default)]
    pub critical_threshold: Option<u32>,
}

/// Inputs for a combined Monte Carlo + scenario run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComprehensiveParams {
    pub simulation: SimulationParameters,
    pub scenarios: Vec<Scenario>,
}

impl ComprehensiveParams {
    pub fn scenario_set(&self) -> ScenarioSet {
        ScenarioSet::new(self.scenarios.clone())
    }
}

/// Parameters for one analysis, tagged by `methodology` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "methodology", rename_all = "snake_case")]
pub enum AnalysisParams {
    MonteCarlo(SimulationParameters),
    Scenario(ScenarioSet),
    Fmea(FmeaParams),
    BowTie(BowTieModel),
    Comprehensive(ComprehensiveParams),
}

impl AnalysisParams {
    pub fn kind(&self) -> MethodologyKind {
        match self {
            Self::MonteCarlo(_) => MethodologyKind::MonteCarlo,
            Self::Scenario(_) => MethodologyKind::Scenario,
            Self::Fmea(_) => MethodologyKind::Fmea,
            Self::BowTie(_) => MethodologyKind::BowTie,
            Self::Comprehensive(_) => MethodologyKind::Comprehensive,
        }
    }

    /// Decode a JSON payload. Shape errors become `Malformed`.
    pub fn from_json(json: &str) -> Result<Self, ParameterError> {
        serde_json::from_str(json).map_err(|e| ParameterError::Malformed(e.to_string()))
    }

    /// Simulation parameters, if this payload carries any.
    pub fn simulation_mut(&mut self) -> Option<&mut SimulationParameters> {
        match self {
            Self::MonteCarlo(p) => Some(p),
            Self::Comprehensive(p) => Some(&mut p.simulation),
            _ => None,
        }
    }
}
