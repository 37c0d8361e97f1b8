//! Logging setup and the span field names shared by the engines.

pub mod metrics;
pub mod setup;

pub use setup::{init_tracing, init_tracing_with_default, LOG_ENV_VAR};
