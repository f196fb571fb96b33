//! Cancellation signal shared by the executors and the host

use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// One-shot, cloneable cancellation flag
///
/// Once triggered it stays triggered. Every clone observes the same flag.
#[derive(Debug, Clone)]
pub struct Shutdown {
    sender: Arc<watch::Sender<bool>>,
    receiver: watch::Receiver<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (sender, receiver) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
            receiver,
        }
    }

    /// Requests cancellation
    pub fn trigger(&self) {
        self.sender.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Completes once cancellation has been requested
    pub async fn triggered(&self) {
        let mut receiver = self.receiver.clone();
        // The sender lives as long as `self`, so this only returns on trigger.
        let _ = receiver.wait_for(|triggered| *triggered).await;
    }

    /// Triggers this signal when the process receives Ctrl-C
    pub fn listen_for_ctrl_c(&self) -> JoinHandle<()> {
        let shutdown = self.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::warn!("Interrupt received, stopping after in-flight pages");
                    shutdown.trigger();
                }
                Err(e) => tracing::error!("Failed to listen for interrupt: {}", e),
            }
        })
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
