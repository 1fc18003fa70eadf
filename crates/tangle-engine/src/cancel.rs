//! Cooperative drain cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Requests that a running drain stop before its next activation.
///
/// Cloneable and `Send + Sync`, so it can be handed to another thread or
/// to a propagator body. Work still pending when the drain stops stays
/// queued for the next drain. The request is consumed when a drain
/// observes it; one made while no drain is running is discarded when the
/// next drain starts.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle {
    requested: Arc<AtomicBool>,
}

impl CancelHandle {
    /// A handle with no request pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the drain to stop.
    pub fn cancel(&self) {
        self.requested.store(true, Ordering::Release);
    }

    /// Whether a request is pending.
    pub fn is_cancelled(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }

    /// Consume a pending request.
    pub(crate) fn take(&self) -> bool {
        self.requested.swap(false, Ordering::AcqRel)
    }
}
