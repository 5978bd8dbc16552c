//! Abort signal for an in-flight checkout.

use std::sync::Arc;
use tokio::sync::watch;

/// Fired when the buyer closes a checkout. Clones observe the same signal.
///
/// The order store checks it right before sending; the checkout checks it again before
/// applying the result.
#[derive(Debug, Clone)]
pub struct Dismissal {
    signal: Arc<watch::Sender<bool>>,
}

impl Dismissal {
    pub fn new() -> Self {
        let (signal, _) = watch::channel(false);
        Self {
            signal: Arc::new(signal),
        }
    }

    pub fn dismiss(&self) {
        self.signal.send_replace(true);
    }

    pub fn is_dismissed(&self) -> bool {
        *self.signal.borrow()
    }
}

impl Default for Dismissal {
    fn default() -> Self {
        Self::new()
    }
}
