//! Traits at the seams of the analysis engine.

pub mod cancellation;
pub mod random_source;

pub use cancellation::{Cancellable, CancellationToken};
pub use random_source::{RandomSource, SeededStreams, SourceFactory};
