//! Bow-Tie analysis: threats and consequences around a central event,
//! with preventive and protective barriers composed into residual risk.

pub mod composer;
pub mod types;

pub use composer::{composed_effectiveness, BowTieComposer};
pub use types::*;
