//! Top-level riskq configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{AnalysisConfig, FmeaConfig, SimulationConfig};
use crate::constants::MAX_FMEA_SCORE;
use crate::errors::ConfigError;

/// Project config file name, looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "riskq.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`RISKQ_*`)
/// 3. Project config (`riskq.toml` in project root)
/// 4. User config (`~/.riskq/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RiskConfig {
    pub simulation: SimulationConfig,
    pub fmea: FmeaConfig,
    pub analysis: AnalysisConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub iterations: Option<u64>,
    pub seed: Option<u64>,
    pub critical_threshold: Option<u32>,
    pub confidence_level: Option<f64>,
}

impl RiskConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config. Only a parse failure is fatal here.
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &RiskConfig) -> Result<(), ConfigError> {
        if let Some(level) = config.analysis.confidence_level {
            if !(level > 0.0 && level < 1.0) {
                return Err(invalid(
                    "analysis.confidence_level",
                    "must be strictly between 0.0 and 1.0",
                ));
            }
        }
        for level in &config.simulation.confidence_levels {
            if !(*level > 0.0 && *level < 1.0) {
                return Err(invalid(
                    "simulation.confidence_levels",
                    "every level must be strictly between 0.0 and 1.0",
                ));
            }
        }
        if config.simulation.default_iterations == Some(0) {
            return Err(invalid(
                "simulation.default_iterations",
                "must be greater than 0",
            ));
        }
        if config.simulation.max_iterations == Some(0) {
            return Err(invalid(
                "simulation.max_iterations",
                "must be greater than 0",
            ));
        }
        if config.simulation.effective_default_iterations()
            > config.simulation.effective_max_iterations()
        {
            return Err(invalid(
                "simulation.default_iterations",
                "must not exceed simulation.max_iterations",
            ));
        }
        if config.simulation.chunk_size == Some(0) {
            return Err(invalid("simulation.chunk_size", "must be greater than 0"));
        }
        if let Some(threshold) = config.fmea.critical_threshold {
            let max_rpn = u32::from(MAX_FMEA_SCORE).pow(3);
            if threshold > max_rpn {
                return Err(invalid(
                    "fmea.critical_threshold",
                    "must not exceed the maximum RPN of 1000",
                ));
            }
        }
        for (field, ratio) in [
            (
                "analysis.wide_uncertainty_ratio",
                config.analysis.wide_uncertainty_ratio,
            ),
            (
                "analysis.weak_reduction_ratio",
                config.analysis.weak_reduction_ratio,
            ),
        ] {
            if let Some(r) = ratio {
                if !r.is_finite() || r < 0.0 {
                    return Err(invalid(field, "must be a finite, non-negative number"));
                }
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.riskq/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".riskq").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut RiskConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: RiskConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it has a value.
    fn merge(base: &mut RiskConfig, other: &RiskConfig) {
        // Simulation
        if other.simulation.default_iterations.is_some() {
            base.simulation.default_iterations = other.simulation.default_iterations;
        }
        if other.simulation.max_iterations.is_some() {
            base.simulation.max_iterations = other.simulation.max_iterations;
        }
        if !other.simulation.confidence_levels.is_empty() {
            base.simulation.confidence_levels = other.simulation.confidence_levels.clone();
        }
        if other.simulation.visualization_sample_size.is_some() {
            base.simulation.visualization_sample_size =
                other.simulation.visualization_sample_size;
        }
        if other.simulation.parallel_threshold.is_some() {
            base.simulation.parallel_threshold = other.simulation.parallel_threshold;
        }
        if other.simulation.chunk_size.is_some() {
            base.simulation.chunk_size = other.simulation.chunk_size;
        }
        if other.simulation.seed.is_some() {
            base.simulation.seed = other.simulation.seed;
        }

        // FMEA
        if other.fmea.critical_threshold.is_some() {
            base.fmea.critical_threshold = other.fmea.critical_threshold;
        }

        // Analysis
        if other.analysis.confidence_level.is_some() {
            base.analysis.confidence_level = other.analysis.confidence_level;
        }
        if other.analysis.wide_uncertainty_ratio.is_some() {
            base.analysis.wide_uncertainty_ratio = other.analysis.wide_uncertainty_ratio;
        }
        if other.analysis.weak_reduction_ratio.is_some() {
            base.analysis.weak_reduction_ratio = other.analysis.weak_reduction_ratio;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `RISKQ_SIMULATION_ITERATIONS`, `RISKQ_FMEA_CRITICAL_THRESHOLD`, etc.
    /// Unparseable values are ignored.
    fn apply_env_overrides(config: &mut RiskConfig) {
        if let Some(v) = env_parse::<u64>("RISKQ_SIMULATION_ITERATIONS") {
            config.simulation.default_iterations = Some(v);
        }
        if let Some(v) = env_parse::<u64>("RISKQ_SIMULATION_MAX_ITERATIONS") {
            config.simulation.max_iterations = Some(v);
        }
        if let Some(v) = env_parse::<u64>("RISKQ_SIMULATION_PARALLEL_THRESHOLD") {
            config.simulation.parallel_threshold = Some(v);
        }
        if let Some(v) = env_parse::<u64>("RISKQ_SIMULATION_CHUNK_SIZE") {
            config.simulation.chunk_size = Some(v);
        }
        if let Some(v) = env_parse::<usize>("RISKQ_SIMULATION_VISUALIZATION_SAMPLE_SIZE") {
            config.simulation.visualization_sample_size = Some(v);
        }
        if let Some(v) = env_parse::<u64>("RISKQ_SIMULATION_SEED") {
            config.simulation.seed = Some(v);
        }
        if let Some(v) = env_parse::<u32>("RISKQ_FMEA_CRITICAL_THRESHOLD") {
            config.fmea.critical_threshold = Some(v);
        }
        if let Some(v) = env_parse::<f64>("RISKQ_ANALYSIS_CONFIDENCE_LEVEL") {
            config.analysis.confidence_level = Some(v);
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut RiskConfig, cli: &CliOverrides) {
        if let Some(v) = cli.iterations {
            config.simulation.default_iterations = Some(v);
        }
        if let Some(v) = cli.seed {
            config.simulation.seed = Some(v);
        }
        if let Some(v) = cli.critical_threshold {
            config.fmea.critical_threshold = Some(v);
        }
        if let Some(v) = cli.confidence_level {
            config.analysis.confidence_level = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize {
            message: e.to_string(),
        })
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
