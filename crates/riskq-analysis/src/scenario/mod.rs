//! Scenario analysis: expected value per named scenario.

pub mod evaluator;
pub mod types;

pub use evaluator::ScenarioEvaluator;
pub use types::*;
