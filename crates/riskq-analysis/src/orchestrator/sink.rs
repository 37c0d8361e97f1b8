//! Persistence seam for finished analyses.

use std::sync::{Mutex, MutexGuard};

use riskq_core::errors::StorageError;
use riskq_core::types::RiskItemId;

use super::record::AdvancedAnalysis;

/// Receives every completed analysis. Implementations own storage and any
/// history views built on it.
pub trait AnalysisSink: Send + Sync {
    fn persist(&self, analysis: &AdvancedAnalysis) -> Result<(), StorageError>;
}

/// Append-only in-process store.
#[derive(Debug, Default)]
pub struct InMemoryAnalysisSink {
    records: Mutex<Vec<AdvancedAnalysis>>,
}

impl InMemoryAnalysisSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<AdvancedAnalysis>> {
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn records(&self) -> Vec<AdvancedAnalysis> {
        self.lock().clone()
    }

    /// Analyses for one risk item, newest first.
    pub fn history_for(&self, risk_item: &RiskItemId) -> Vec<AdvancedAnalysis> {
        let mut history: Vec<AdvancedAnalysis> = self
            .lock()
            .iter()
            .filter(|a| &a.risk_item == risk_item)
            .cloned()
            .collect();
        history.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        history
    }
}

impl AnalysisSink for InMemoryAnalysisSink {
    fn persist(&self, analysis: &AdvancedAnalysis) -> Result<(), StorageError> {
        let mut records = self.lock();
        if records.iter().any(|r| r.id == analysis.id) {
            return Err(StorageError::DuplicateRecord {
                id: analysis.id.to_string(),
            });
        }
        records.push(analysis.clone());
        Ok(())
    }
}
