//! Cooperative cancellation
//!
//! An interrupt (for example SIGINT) should end a run the same way a closed
//! sink does: immediately and cleanly, keeping whatever was already written.
//! The token is the explicit signal for that; the engine checks it once per
//! record.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable cancellation flag shared between a signal handler and the engine
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token in the not-cancelled state
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; safe to call from a signal handler
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
