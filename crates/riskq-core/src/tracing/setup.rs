//! Subscriber installation for binaries and tests that embed the engine.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter directives.
pub const LOG_ENV_VAR: &str = "RISKQ_LOG";

/// Directives used when `RISKQ_LOG` is unset or unparseable.
pub const DEFAULT_DIRECTIVES: &str = "riskq_core=info,riskq_analysis=info";

/// Install the riskq subscriber with [`DEFAULT_DIRECTIVES`] as fallback.
///
/// `RISKQ_LOG=riskq_analysis::simulation=debug` turns on per-chunk
/// sampling timings without the rest of the engine's debug output.
pub fn init_tracing() {
    init_tracing_with_default(DEFAULT_DIRECTIVES);
}

/// Install the subscriber, falling back to `default_directives`.
///
/// Only the first call in a process has any effect, and a subscriber set
/// elsewhere beforehand is left in place.
pub fn init_tracing_with_default(default_directives: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(default_directives));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
