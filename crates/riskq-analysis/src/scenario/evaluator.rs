//! Scenario evaluator.
//!
//! `expected_value = probability * impact` per scenario. The aggregate named
//! `weighted_average` is the unweighted mean of those expected values: each
//! scenario counts once no matter its probability. Stored analyses carry this
//! number, so the simplification is kept.

use std::collections::HashSet;

use riskq_core::errors::{AnalysisError, ComputationError, ParameterError};

use super::types::{ScenarioOutcome, ScenarioResult, ScenarioSet};

#[derive(Debug, Clone, Copy, Default)]
pub struct ScenarioEvaluator;

impl ScenarioEvaluator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, set: &ScenarioSet) -> Result<(), ParameterError> {
        if set.is_empty() {
            return Err(ParameterError::Empty {
                field: "scenarios".to_string(),
            });
        }
        let mut seen = HashSet::new();
        for scenario in &set.scenarios {
            if scenario.name.trim().is_empty() {
                return Err(ParameterError::Empty {
                    field: "scenarios.name".to_string(),
                });
            }
            if !seen.insert(scenario.name.as_str()) {
                return Err(ParameterError::Duplicate {
                    field: "scenarios".to_string(),
                    name: scenario.name.clone(),
                });
            }
            ParameterError::ensure_within(
                &format!("scenarios.{}.probability", scenario.name),
                scenario.probability,
                0.0,
                1.0,
            )?;
            ParameterError::ensure_within(
                &format!("scenarios.{}.impact", scenario.name),
                scenario.impact,
                0.0,
                f64::MAX,
            )?;
        }
        Ok(())
    }

    pub fn evaluate(&self, set: &ScenarioSet) -> Result<ScenarioResult, AnalysisError> {
        self.validate(set)?;

        let outcomes: Vec<ScenarioOutcome> = set
            .scenarios
            .iter()
            .map(|s| ScenarioOutcome {
                name: s.name.clone(),
                probability: s.probability,
                impact: s.impact,
                expected_value: s.probability * s.impact,
            })
            .collect();

        let weighted_average =
            outcomes.iter().map(|o| o.expected_value).sum::<f64>() / outcomes.len() as f64;
        ComputationError::ensure_finite("scenario aggregation", &[weighted_average])?;

        // first maximum wins on ties
        let dominant_scenario = outcomes
            .iter()
            .fold(None::<&ScenarioOutcome>, |best, o| match best {
                Some(b) if b.expected_value >= o.expected_value => Some(b),
                _ => Some(o),
            })
            .map(|o| o.name.clone())
            .unwrap_or_default();

        tracing::debug!(
            scenarios = outcomes.len(),
            weighted_average,
            dominant = %dominant_scenario,
            "scenarios evaluated"
        );

        Ok(ScenarioResult {
            outcomes,
            weighted_average,
            dominant_scenario,
        })
    }
}
