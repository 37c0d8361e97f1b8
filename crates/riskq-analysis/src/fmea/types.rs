//! FMEA types.

use serde::{Deserialize, Serialize};

use riskq_core::constants::{MAX_FMEA_SCORE, MIN_FMEA_SCORE};
use riskq_core::errors::ParameterError;

/// One failure mode with its 1-10 scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureMode {
    pub mode: String,
    #[serde(default)]
    pub causes: Vec<String>,
    #[serde(default)]
    pub effects: Vec<String>,
    pub severity: u8,
    pub occurrence: u8,
    pub detection: u8,
    /// Recommended actions.
    #[serde(default)]
    pub actions: Vec<String>,
}

impl FailureMode {
    pub fn new(mode: impl Into<String>, severity: u8, occurrence: u8, detection: u8) -> Self {
        Self {
            mode: mode.into(),
            causes: Vec::new(),
            effects: Vec::new(),
            severity,
            occurrence,
            detection,
            actions: Vec::new(),
        }
    }

    pub fn validate(&self) -> Result<(), ParameterError> {
        if self.mode.trim().is_empty() {
            return Err(ParameterError::Empty {
                field: "failure_modes.mode".to_string(),
            });
        }
        for (field, score) in [
            ("severity", self.severity),
            ("occurrence", self.occurrence),
            ("detection", self.detection),
        ] {
            if !(MIN_FMEA_SCORE..=MAX_FMEA_SCORE).contains(&score) {
                return Err(ParameterError::ScoreOutOfRange {
                    subject: self.mode.clone(),
                    field: field.to_string(),
                    value: i64::from(score),
                });
            }
        }
        Ok(())
    }

    /// Risk Priority Number: `severity * occurrence * detection`.
    pub fn rpn(&self) -> u32 {
        u32::from(self.severity) * u32::from(self.occurrence) * u32::from(self.detection)
    }
}

/// A failure mode annotated with its RPN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedFailureMode {
    #[serde(flatten)]
    pub failure_mode: FailureMode,
    pub rpn: u32,
    pub critical: bool,
}

/// FMEA ranking output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FmeaResult {
    /// Every mode in input order.
    pub modes: Vec<RankedFailureMode>,
    /// Modes with RPN above the threshold, highest RPN first.
    pub critical_modes: Vec<RankedFailureMode>,
    pub average_rpn: f64,
    pub max_rpn: u32,
    pub critical_threshold: u32,
}
