//! Shared identifier types.

pub mod identifiers;

pub use identifiers::{AnalysisId, MethodologyId, RiskItemId};
