//! FMEA ranker.

use riskq_core::constants::DEFAULT_CRITICAL_RPN_THRESHOLD;
use riskq_core::errors::ParameterError;
use riskq_core::tracing::metrics;

use super::types::{FailureMode, FmeaResult, RankedFailureMode};

/// Scores failure modes and flags those with RPN strictly above the threshold.
#[derive(Debug, Clone, Copy)]
pub struct FmeaRanker {
    critical_threshold: u32,
}

impl FmeaRanker {
    pub fn new(critical_threshold: u32) -> Self {
        Self { critical_threshold }
    }

    pub fn critical_threshold(&self) -> u32 {
        self.critical_threshold
    }

    pub fn rank(&self, modes: &[FailureMode]) -> Result<FmeaResult, ParameterError> {
        if modes.is_empty() {
            return Err(ParameterError::Empty {
                field: "failure_modes".to_string(),
            });
        }
        for mode in modes {
            mode.validate()?;
        }

        let ranked: Vec<RankedFailureMode> = modes
            .iter()
            .map(|m| {
                let rpn = m.rpn();
                RankedFailureMode {
                    failure_mode: m.clone(),
                    rpn,
                    critical: rpn > self.critical_threshold,
                }
            })
            .collect();

        let mut critical_modes: Vec<RankedFailureMode> =
            ranked.iter().filter(|m| m.critical).cloned().collect();
        // stable: equal RPNs keep input order
        critical_modes.sort_by(|a, b| b.rpn.cmp(&a.rpn));

        let total: u64 = ranked.iter().map(|m| u64::from(m.rpn)).sum();
        let average_rpn = total as f64 / ranked.len() as f64;
        let max_rpn = ranked.iter().map(|m| m.rpn).max().unwrap_or(0);

        tracing::debug!(
            modes = ranked.len(),
            { metrics::CRITICAL_MODES } = critical_modes.len(),
            average_rpn,
            "failure modes ranked"
        );

        Ok(FmeaResult {
            modes: ranked,
            critical_modes,
            average_rpn,
            max_rpn,
            critical_threshold: self.critical_threshold,
        })
    }
}

impl Default for FmeaRanker {
    fn default() -> Self {
        Self::new(DEFAULT_CRITICAL_RPN_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_strict() {
        let ranker = FmeaRanker::default();
        let r = ranker
            .rank(&[FailureMode::new("at threshold", 5, 5, 4)])
            .unwrap();
        assert_eq!(r.modes[0].rpn, 100);
        assert!(!r.modes[0].critical);
        assert!(r.critical_modes.is_empty());
    }

    #[test]
    fn custom_threshold() {
        let ranker = FmeaRanker::new(50);
        let r = ranker.rank(&[FailureMode::new("m", 3, 3, 6)]).unwrap();
        assert!(r.modes[0].critical);
        assert_eq!(r.critical_threshold, 50);
    }
}
