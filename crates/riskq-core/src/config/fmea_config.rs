//! FMEA ranking configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_CRITICAL_RPN_THRESHOLD;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FmeaConfig {
    /// RPN strictly above this marks a mode critical. Default: 100.
    pub critical_threshold: Option<u32>,
}

impl FmeaConfig {
    pub fn effective_critical_threshold(&self) -> u32 {
        self.critical_threshold
            .unwrap_or(DEFAULT_CRITICAL_RPN_THRESHOLD)
    }
}
