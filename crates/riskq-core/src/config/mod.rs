//! Configuration system for riskq.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod analysis_config;
pub mod fmea_config;
pub mod risk_config;
pub mod simulation_config;

pub use analysis_config::AnalysisConfig;
pub use fmea_config::FmeaConfig;
pub use risk_config::{CliOverrides, RiskConfig};
pub use simulation_config::SimulationConfig;
