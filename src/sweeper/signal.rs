//! Cooperative cancellation shared by all workers

use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::{Duration, sleep};

/// Clonable stop flag. Once raised it stays raised.
#[derive(Debug, Clone)]
pub struct StopSignal {
    sender: Arc<watch::Sender<bool>>,
    receiver: watch::Receiver<bool>,
}

impl StopSignal {
    pub fn new() -> Self {
        let (sender, receiver) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
            receiver,
        }
    }

    /// Ask every holder of this signal to stop
    pub fn stop(&self) {
        self.sender.send_replace(true);
    }

    pub fn is_stopped(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Resolve once the signal has been raised
    pub async fn stopped(&self) {
        let mut receiver = self.receiver.clone();
        // The sender lives as long as `self`, so this cannot see a closed channel
        let _ = receiver.wait_for(|stopped| *stopped).await;
    }

    /// Sleep for `duration` unless stopped first. Returns `true` when the
    /// wait was cut short by a stop request.
    pub async fn sleep(&self, duration: Duration) -> bool {
        if self.is_stopped() {
            return true;
        }
        tokio::select! {
            _ = sleep(duration) => false,
            _ = self.stopped() => true,
        }
    }
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}
