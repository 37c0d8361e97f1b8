//! Methodology types.

use serde::{Deserialize, Serialize};

use riskq_core::types::MethodologyId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodologyCategory {
    Quantitative,
    Qualitative,
    Hybrid,
}

/// Which engine a methodology dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodologyKind {
    MonteCarlo,
    Scenario,
    Fmea,
    BowTie,
    /// Monte Carlo and scenario analysis in one run.
    Comprehensive,
}

impl MethodologyKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::MonteCarlo => "monte_carlo",
            Self::Scenario => "scenario",
            Self::Fmea => "fmea",
            Self::BowTie => "bow_tie",
            Self::Comprehensive => "comprehensive",
        }
    }
}

impl std::fmt::Display for MethodologyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Immutable description of an analysis methodology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskMethodology {
    pub id: MethodologyId,
    pub name: String,
    pub category: MethodologyCategory,
    pub framework: String,
    pub formula: String,
    pub kind: MethodologyKind,
}
