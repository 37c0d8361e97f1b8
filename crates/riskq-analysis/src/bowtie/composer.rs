//! Bow-Tie risk composer.
//!
//! Barrier effectiveness on each side is the product of the individual
//! effectiveness values. That treats barriers as independent and reads the
//! product as the side's combined effectiveness; correlated barriers (shared
//! power supply, same operator) are not modelled. A side with no barriers
//! composes to 0.0: nothing mitigates it.

use std::collections::HashSet;

use riskq_core::errors::{AnalysisError, ComputationError, ParameterError};

use super::types::{Barrier, BowTieModel, BowTieResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct BowTieComposer;

impl BowTieComposer {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, model: &BowTieModel) -> Result<(), ParameterError> {
        if model.central_event.trim().is_empty() {
            return Err(ParameterError::Empty {
                field: "central_event".to_string(),
            });
        }

        let preventive = barrier_ids("preventive_barriers", &model.preventive_barriers)?;
        let protective = barrier_ids("protective_barriers", &model.protective_barriers)?;

        for threat in &model.threat_events {
            ParameterError::ensure_within(
                "threat_events.probability",
                threat.probability,
                0.0,
                1.0,
            )?;
            check_references("threat_events.barriers", &threat.barriers, &preventive)?;
        }
        for consequence in &model.consequence_events {
            ParameterError::ensure_within(
                "consequence_events.impact",
                consequence.impact,
                0.0,
                f64::MAX,
            )?;
            check_references(
                "consequence_events.barriers",
                &consequence.barriers,
                &protective,
            )?;
        }
        Ok(())
    }

    /// Validation failures surface as `InvalidParameter`; impacts large enough to
    /// overflow the composed figures surface as `ComputationFailed`.
    pub fn compose(&self, model: &BowTieModel) -> Result<BowTieResult, AnalysisError> {
        self.validate(model)?;

        let preventive_effectiveness = composed_effectiveness(&model.preventive_barriers);
        let protective_effectiveness = composed_effectiveness(&model.protective_barriers);

        let threat_probability = if model.threat_events.is_empty() {
            0.0
        } else {
            model.threat_events.iter().map(|t| t.probability).sum::<f64>()
                / model.threat_events.len() as f64
        };
        let consequence_impact: f64 = model.consequence_events.iter().map(|c| c.impact).sum();

        let initial_risk = threat_probability * consequence_impact;
        let residual_probability = threat_probability * (1.0 - preventive_effectiveness);
        let residual_impact = consequence_impact * (1.0 - protective_effectiveness);
        let residual_risk = residual_probability * residual_impact;
        let risk_reduction = if initial_risk > 0.0 {
            1.0 - residual_risk / initial_risk
        } else {
            0.0
        };
        ComputationError::ensure_finite(
            "bow-tie composition",
            &[
                consequence_impact,
                initial_risk,
                residual_impact,
                residual_risk,
                risk_reduction,
            ],
        )?;

        tracing::debug!(
            central_event = %model.central_event,
            initial_risk,
            residual_risk,
            risk_reduction,
            "bow-tie composed"
        );

        Ok(BowTieResult {
            preventive_effectiveness,
            protective_effectiveness,
            threat_probability,
            consequence_impact,
            initial_risk,
            residual_probability,
            residual_impact,
            residual_risk,
            risk_reduction,
        })
    }
}

/// Product of effectiveness values; 0.0 for an empty side.
pub fn composed_effectiveness(barriers: &[Barrier]) -> f64 {
    if barriers.is_empty() {
        return 0.0;
    }
    barriers.iter().map(|b| b.effectiveness).product()
}

fn barrier_ids<'a>(
    field: &str,
    barriers: &'a [Barrier],
) -> Result<HashSet<&'a str>, ParameterError> {
    let mut ids = HashSet::with_capacity(barriers.len());
    for barrier in barriers {
        if barrier.id.trim().is_empty() {
            return Err(ParameterError::Empty {
                field: format!("{field}.id"),
            });
        }
        if !ids.insert(barrier.id.as_str()) {
            return Err(ParameterError::Duplicate {
                field: field.to_string(),
                name: barrier.id.clone(),
            });
        }
        ParameterError::ensure_within(
            &format!("{field}.{}.effectiveness", barrier.id),
            barrier.effectiveness,
            0.0,
            1.0,
        )?;
    }
    Ok(ids)
}

fn check_references(
    field: &str,
    references: &[String],
    known: &HashSet<&str>,
) -> Result<(), ParameterError> {
    match references.iter().find(|r| !known.contains(r.as_str())) {
        Some(unknown) => Err(ParameterError::UnknownBarrier {
            field: field.to_string(),
            reference: unknown.clone(),
        }),
        None => Ok(()),
    }
}
