//! riskq-core: shared foundation for the riskq analysis engine.
//!
//! Errors, configuration, tracing setup, lifecycle events, the cancellation
//! and random-source traits, identifiers, and compiled defaults.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod tracing;
pub mod traits;
pub mod types;
