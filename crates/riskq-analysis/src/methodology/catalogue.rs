//! Built-in methodology catalogue.

use riskq_core::types::MethodologyId;

use super::types::{MethodologyCategory, MethodologyKind, RiskMethodology};

/// Lookup table of methodologies by id.
#[derive(Debug, Clone)]
pub struct MethodologyCatalogue {
    methodologies: Vec<RiskMethodology>,
}

impl MethodologyCatalogue {
    /// Catalogue with no entries.
    pub fn empty() -> Self {
        Self {
            methodologies: Vec::new(),
        }
    }

    /// The five built-in methodologies.
    pub fn builtin() -> Self {
        let entry = |id: &str,
                     name: &str,
                     category: MethodologyCategory,
                     framework: &str,
                     formula: &str,
                     kind: MethodologyKind| RiskMethodology {
            id: MethodologyId::new(id),
            name: name.to_string(),
            category,
            framework: framework.to_string(),
            formula: formula.to_string(),
            kind,
        };

        Self {
            methodologies: vec![
                entry(
                    "monte_carlo",
                    "Monte Carlo Simulation",
                    MethodologyCategory::Quantitative,
                    "ISO 31010",
                    "Risk = P x I over N draws; VaR(l) = sorted[floor(N * l)]",
                    MethodologyKind::MonteCarlo,
                ),
                entry(
                    "scenario_analysis",
                    "Scenario Analysis",
                    MethodologyCategory::Quantitative,
                    "ISO 31010",
                    "EV(s) = P(s) x I(s); aggregate = mean of EV(s)",
                    MethodologyKind::Scenario,
                ),
                entry(
                    "fmea",
                    "Failure Mode and Effects Analysis",
                    MethodologyCategory::Hybrid,
                    "IEC 60812",
                    "RPN = Severity x Occurrence x Detection",
                    MethodologyKind::Fmea,
                ),
                entry(
                    "bow_tie",
                    "Bow-Tie Analysis",
                    MethodologyCategory::Hybrid,
                    "CCPS",
                    "Residual = P x (1 - E_prev) x I x (1 - E_prot)",
                    MethodologyKind::BowTie,
                ),
                entry(
                    "comprehensive",
                    "Comprehensive Quantitative Analysis",
                    MethodologyCategory::Quantitative,
                    "ISO 31000",
                    "Monte Carlo VaR plus scenario expected values",
                    MethodologyKind::Comprehensive,
                ),
            ],
        }
    }

    pub fn get(&self, id: &MethodologyId) -> Option<&RiskMethodology> {
        self.methodologies.iter().find(|m| &m.id == id)
    }

    /// Add a methodology, replacing any entry with the same id.
    pub fn register(&mut self, methodology: RiskMethodology) {
        match self.methodologies.iter_mut().find(|m| m.id == methodology.id) {
            Some(existing) => *existing = methodology,
            None => self.methodologies.push(methodology),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &RiskMethodology> {
        self.methodologies.iter()
    }

    pub fn len(&self) -> usize {
        self.methodologies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methodologies.is_empty()
    }
}

impl Default for MethodologyCatalogue {
    fn default() -> Self {
        Self::builtin()
    }
}
