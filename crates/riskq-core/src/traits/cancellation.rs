//! Cooperative cancellation for analysis runs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::errors::AnalysisError;

/// Something a run can poll between units of work.
///
/// The Monte Carlo engine polls once per sampling chunk; a chunk already in
/// flight always finishes.
pub trait Cancellable {
    fn is_cancelled(&self) -> bool;

    fn cancel(&self);

    /// `Err(Cancelled)` once cancellation has been requested.
    fn ensure_active(&self) -> Result<(), AnalysisError> {
        if self.is_cancelled() {
            Err(AnalysisError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Shared cancellation flag. Clones observe the same flag, so a caller can
/// keep one clone and hand another to the orchestrator.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Cancellable for CancellationToken {
    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }
}
