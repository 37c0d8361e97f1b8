//! Tests for the riskq configuration system.

use std::sync::Mutex;

use riskq_core::config::{CliOverrides, RiskConfig};
use riskq_core::errors::ConfigError;

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Clear all RISKQ_ env vars and point HOME at an empty directory so a
/// developer's own `~/.riskq/config.toml` cannot leak into the tests.
fn isolate_env(home: &std::path::Path) {
    for key in [
        "RISKQ_SIMULATION_ITERATIONS",
        "RISKQ_SIMULATION_MAX_ITERATIONS",
        "RISKQ_SIMULATION_PARALLEL_THRESHOLD",
        "RISKQ_SIMULATION_CHUNK_SIZE",
        "RISKQ_SIMULATION_VISUALIZATION_SAMPLE_SIZE",
        "RISKQ_SIMULATION_SEED",
        "RISKQ_FMEA_CRITICAL_THRESHOLD",
        "RISKQ_ANALYSIS_CONFIDENCE_LEVEL",
    ] {
        std::env::remove_var(key);
    }
    std::env::set_var("HOME", home);
    std::env::remove_var("USERPROFILE");
}

#[test]
fn test_defaults_without_any_files() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let project = tempdir();
    let config = RiskConfig::load(project.path(), None).unwrap();

    assert_eq!(config.simulation.effective_default_iterations(), 10_000);
    assert_eq!(config.fmea.effective_critical_threshold(), 100);
    assert_eq!(config.analysis.effective_confidence_level(), 0.95);
    assert_eq!(
        config.simulation.effective_confidence_levels(),
        vec![0.05, 0.25, 0.50, 0.75, 0.95]
    );
    assert_eq!(config.simulation.effective_visualization_sample_size(), 1_000);
    assert_eq!(config.simulation.effective_max_iterations(), 50_000_000);
    assert!(config.simulation.seed.is_none());
}

#[test]
fn test_layered_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    std::fs::create_dir_all(home.path().join(".riskq")).unwrap();
    std::fs::write(
        home.path().join(".riskq").join("config.toml"),
        r#"
[simulation]
default_iterations = 500
chunk_size = 256

[analysis]
confidence_level = 0.80
"#,
    )
    .unwrap();

    let project = tempdir();
    std::fs::write(
        project.path().join("riskq.toml"),
        r#"
[simulation]
default_iterations = 2_000
seed = 11

[fmea]
critical_threshold = 150
"#,
    )
    .unwrap();

    std::env::set_var("RISKQ_SIMULATION_SEED", "99");

    let cli = CliOverrides {
        critical_threshold: Some(200),
        ..Default::default()
    };

    let config = RiskConfig::load(project.path(), Some(&cli)).unwrap();
    std::env::remove_var("RISKQ_SIMULATION_SEED");

    // user layer survives where nobody overrides it
    assert_eq!(config.simulation.chunk_size, Some(256));
    assert_eq!(config.analysis.confidence_level, Some(0.80));
    // project beats user
    assert_eq!(config.simulation.default_iterations, Some(2_000));
    // env beats project
    assert_eq!(config.simulation.seed, Some(99));
    // cli beats everything
    assert_eq!(config.fmea.critical_threshold, Some(200));
}

#[test]
fn test_unparseable_env_value_is_ignored() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    std::env::set_var("RISKQ_FMEA_CRITICAL_THRESHOLD", "lots");
    let project = tempdir();
    let config = RiskConfig::load(project.path(), None).unwrap();
    std::env::remove_var("RISKQ_FMEA_CRITICAL_THRESHOLD");

    assert!(config.fmea.critical_threshold.is_none());
}

#[test]
fn test_invalid_project_toml_is_parse_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let project = tempdir();
    std::fs::write(project.path().join("riskq.toml"), "[simulation\nseed = ").unwrap();

    let err = RiskConfig::load(project.path(), None).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn test_validation_rejects_out_of_range_values() {
    let err = RiskConfig::from_toml("[analysis]\nconfidence_level = 1.0\n").unwrap_err();
    assert!(matches!(
        err,
        ConfigError::ValidationFailed { ref field, .. } if field == "analysis.confidence_level"
    ));

    let err = RiskConfig::from_toml("[simulation]\nconfidence_levels = [0.5, 0.0]\n").unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));

    let err = RiskConfig::from_toml("[simulation]\nchunk_size = 0\n").unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));

    let err = RiskConfig::from_toml("[fmea]\ncritical_threshold = 1001\n").unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));
}

#[test]
fn test_iteration_ceiling_is_validated() {
    let config = RiskConfig::from_toml("[simulation]\nmax_iterations = 20_000\n").unwrap();
    assert_eq!(config.simulation.effective_max_iterations(), 20_000);

    let err = RiskConfig::from_toml("[simulation]\nmax_iterations = 0\n").unwrap_err();
    assert!(matches!(
        err,
        ConfigError::ValidationFailed { ref field, .. } if field == "simulation.max_iterations"
    ));

    // the built-in default of 10,000 no longer fits
    let err = RiskConfig::from_toml("[simulation]\nmax_iterations = 5_000\n").unwrap_err();
    assert!(matches!(
        err,
        ConfigError::ValidationFailed { ref field, .. } if field == "simulation.default_iterations"
    ));
}

#[test]
fn test_toml_round_trip_keeps_values() {
    let config = RiskConfig::from_toml(
        r#"
[simulation]
seed = 42
confidence_levels = [0.1, 0.9]

[fmea]
critical_threshold = 120
"#,
    )
    .unwrap();

    let rendered = config.to_toml().unwrap();
    let reparsed = RiskConfig::from_toml(&rendered).unwrap();
    assert_eq!(reparsed.simulation.seed, Some(42));
    assert_eq!(reparsed.simulation.confidence_levels, vec![0.1, 0.9]);
    assert_eq!(reparsed.fmea.effective_critical_threshold(), 120);
}
