/*!
 * Cooperative cancellation
 */

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Poll-checked cancellation flag shared between the walker and its owner
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token that has not been signalled
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; the walk stops at its next check point
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Cancel this token when the process receives Ctrl-C
    pub fn cancel_on_ctrl_c(&self) -> Result<(), ctrlc::Error> {
        let token = self.clone();
        ctrlc::set_handler(move || token.cancel())
    }
}
