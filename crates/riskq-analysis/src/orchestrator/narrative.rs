//! Assumptions, limitations and recommendations attached to a record.
//!
//! Assumptions and limitations describe the method and are fixed per
//! methodology. Recommendations are read off the computed numbers.

use riskq_core::config::AnalysisConfig;

use super::record::AnalysisResult;
use crate::bowtie::BowTieResult;
use crate::fmea::FmeaResult;
use crate::scenario::ScenarioResult;
use crate::simulation::SimulationResult;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Narrative {
    pub assumptions: Vec<String>,
    pub limitations: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Thresholds that decide which recommendations fire.
#[derive(Debug, Clone, Copy)]
pub struct NarrativeThresholds {
    pub wide_uncertainty_ratio: f64,
    pub weak_reduction_ratio: f64,
}

impl From<&AnalysisConfig> for NarrativeThresholds {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            wide_uncertainty_ratio: config.effective_wide_uncertainty_ratio(),
            weak_reduction_ratio: config.effective_weak_reduction_ratio(),
        }
    }
}

impl Narrative {
    pub fn for_result(result: &AnalysisResult, thresholds: NarrativeThresholds) -> Self {
        let mut narrative = Self::default();
        match result {
            AnalysisResult::MonteCarlo(sim) => narrative.simulation(sim, thresholds),
            AnalysisResult::Scenario(sc) => narrative.scenarios(sc),
            AnalysisResult::Fmea(fmea) => narrative.fmea(fmea),
            AnalysisResult::BowTie(bt) => narrative.bow_tie(bt, thresholds),
            AnalysisResult::Comprehensive {
                simulation,
                scenarios,
            } => {
                narrative.simulation(simulation, thresholds);
                narrative.scenarios(scenarios);
            }
        }
        narrative
    }

    fn simulation(&mut self, sim: &SimulationResult, thresholds: NarrativeThresholds) {
        self.assumptions.extend([
            "Probability and impact are sampled independently apart from the linear correlation factor".to_string(),
            "Input ranges bound the plausible probability and impact of the risk".to_string(),
        ]);
        self.limitations.extend([
            "Percentiles use the nearest-rank method without interpolation".to_string(),
            "The visualization sample is the lowest slice of the sorted results, not a random subsample".to_string(),
            "The correlation factor is a linear perturbation, not a full dependence model".to_string(),
        ]);

        if let Some(range) = sim.uncertainty_range() {
            if sim.mean > 0.0 && range.width() / sim.mean > thresholds.wide_uncertainty_ratio {
                self.recommendations.push(format!(
                    "Uncertainty is wide: the band {:.2} to {:.2} spans {:.1}x the mean; narrow the input ranges with loss data before committing budget",
                    range.min,
                    range.max,
                    range.width() / sim.mean
                ));
            }
            self.recommendations.push(format!(
                "Size reserves against the upper band value {:.2} rather than the mean {:.2}",
                range.max, sim.mean
            ));
        } else {
            self.recommendations.push(format!(
                "Expected loss is {:.2}; request confidence levels to obtain a value-at-risk band",
                sim.mean
            ));
        }
    }

    fn scenarios(&mut self, sc: &ScenarioResult) {
        self.assumptions.push(
            "Scenario probabilities and impacts are expert estimates".to_string(),
        );
        self.limitations.push(
            "The aggregate is an unweighted mean of scenario expected values".to_string(),
        );
        if let Some(ev) = sc.expected_value(&sc.dominant_scenario) {
            self.recommendations.push(format!(
                "Prioritise response planning for scenario '{}' (expected value {:.2})",
                sc.dominant_scenario, ev
            ));
        }
    }

    fn fmea(&mut self, fmea: &FmeaResult) {
        self.assumptions.extend([
            "Severity, occurrence and detection scores are consistent across the team".to_string(),
        ]);
        self.limitations.extend([
            "RPN weighs severity, occurrence and detection equally".to_string(),
            "Different score combinations can produce the same RPN".to_string(),
        ]);

        if fmea.critical_modes.is_empty() {
            self.recommendations.push(format!(
                "No failure mode exceeds RPN {}; review scores at the next cycle",
                fmea.critical_threshold
            ));
            return;
        }
        for mode in &fmea.critical_modes {
            let fm = &mode.failure_mode;
            if fm.actions.is_empty() {
                self.recommendations.push(format!(
                    "Critical: '{}' (RPN {}) has no recommended actions; assign an owner",
                    fm.mode, mode.rpn
                ));
            } else {
                self.recommendations.push(format!(
                    "Critical: '{}' (RPN {}): {}",
                    fm.mode,
                    mode.rpn,
                    fm.actions.join("; ")
                ));
            }
        }
    }

    fn bow_tie(&mut self, bt: &BowTieResult, thresholds: NarrativeThresholds) {
        self.assumptions.extend([
            "Barriers act independently; effectiveness values are multiplied".to_string(),
            "Threat probability is the mean across threat events".to_string(),
        ]);
        self.limitations.push(
            "Common-cause failures between barriers are not modelled".to_string(),
        );

        if bt.initial_risk == 0.0 {
            self.recommendations.push(
                "Initial risk is zero; risk reduction is reported as 0".to_string(),
            );
        } else if bt.risk_reduction < thresholds.weak_reduction_ratio {
            self.recommendations.push(format!(
                "Barriers reduce risk by only {:.1}%; strengthen or add barriers",
                bt.risk_reduction * 100.0
            ));
        } else {
            self.recommendations.push(format!(
                "Barriers reduce risk by {:.1}%; keep barrier testing on schedule",
                bt.risk_reduction * 100.0
            ));
        }
    }
}
