//! Bow-Tie model types.

use serde::{Deserialize, Serialize};

/// A control on either side of the central event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Barrier {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Probability in [0, 1] that the barrier stops propagation.
    pub effectiveness: f64,
}

impl Barrier {
    pub fn new(id: impl Into<String>, effectiveness: f64) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            effectiveness,
        }
    }
}

/// A cause that can trigger the central event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreatEvent {
    #[serde(default)]
    pub description: String,
    pub probability: f64,
    /// Ids of preventive barriers on this threat path.
    #[serde(default)]
    pub barriers: Vec<String>,
}

/// An outcome of the central event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsequenceEvent {
    #[serde(default)]
    pub description: String,
    pub impact: f64,
    /// Ids of protective barriers on this consequence path.
    #[serde(default)]
    pub barriers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BowTieModel {
    pub central_event: String,
    #[serde(default)]
    pub threat_events: Vec<ThreatEvent>,
    #[serde(default)]
    pub consequence_events: Vec<ConsequenceEvent>,
    #[serde(default)]
    pub preventive_barriers: Vec<Barrier>,
    #[serde(default)]
    pub protective_barriers: Vec<Barrier>,
}

/// Composed Bow-Tie metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BowTieResult {
    pub preventive_effectiveness: f64,
    pub protective_effectiveness: f64,
    /// Mean probability across threat events.
    pub threat_probability: f64,
    /// Sum of consequence impacts.
    pub consequence_impact: f64,
    pub initial_risk: f64,
    pub residual_probability: f64,
    pub residual_impact: f64,
    pub residual_risk: f64,
    /// `1 - residual / initial`, or 0 when initial risk is 0.
    pub risk_reduction: f64,
}
