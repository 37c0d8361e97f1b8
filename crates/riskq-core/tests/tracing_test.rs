//! Tests for the riskq tracing setup.

use std::sync::Mutex;

use riskq_core::tracing::{init_tracing, init_tracing_with_default, LOG_ENV_VAR};

/// Serializes tests that touch RISKQ_LOG.
static TRACING_MUTEX: Mutex<()> = Mutex::new(());

#[test]
fn test_per_module_directive() {
    let _lock = TRACING_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    std::env::set_var(LOG_ENV_VAR, "riskq_analysis::simulation=debug");
    init_tracing();
    tracing::debug!(target: "riskq_analysis::simulation", "visible at debug");
    std::env::remove_var(LOG_ENV_VAR);
}

#[test]
fn test_repeated_init_is_harmless() {
    let _lock = TRACING_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    init_tracing();
    init_tracing_with_default("warn");
    init_tracing();
}

#[test]
fn test_unparseable_filter_uses_fallback() {
    let _lock = TRACING_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    std::env::set_var(LOG_ENV_VAR, "riskq_core=[[[");
    init_tracing_with_default("error");
    std::env::remove_var(LOG_ENV_VAR);
}
