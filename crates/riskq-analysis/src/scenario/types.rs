//! Scenario analysis types.

use serde::{Deserialize, Serialize};

/// Conventional scenario names.
pub const BEST_CASE: &str = "best_case";
pub const BASE_CASE: &str = "base_case";
pub const WORST_CASE: &str = "worst_case";
pub const STRESS_TEST: &str = "stress_test";

/// A named scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub probability: f64,
    pub impact: f64,
    #[serde(default)]
    pub description: String,
}

impl Scenario {
    pub fn new(name: impl Into<String>, probability: f64, impact: f64) -> Self {
        Self {
            name: name.into(),
            probability,
            impact,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// An ordered set of scenarios.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScenarioSet {
    pub scenarios: Vec<Scenario>,
}

impl ScenarioSet {
    pub fn new(scenarios: Vec<Scenario>) -> Self {
        Self { scenarios }
    }

    pub fn push(&mut self, scenario: Scenario) {
        self.scenarios.push(scenario);
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

/// Expected value of one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub name: String,
    pub probability: f64,
    pub impact: f64,
    pub expected_value: f64,
}

/// Result of evaluating a [`ScenarioSet`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// One row per scenario, in input order.
    pub outcomes: Vec<ScenarioOutcome>,
    /// Plain mean of the expected values. Not re-weighted by probability.
    pub weighted_average: f64,
    /// Name of the scenario with the largest expected value.
    pub dominant_scenario: String,
}

impl ScenarioResult {
    pub fn expected_value(&self, name: &str) -> Option<f64> {
        self.outcomes
            .iter()
            .find(|o| o.name == name)
            .map(|o| o.expected_value)
    }
}
