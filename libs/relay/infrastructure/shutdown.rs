//! Graceful shutdown management
//!
//! One [`ShutdownManager`] per process hands out [`ShutdownSignal`]s to
//! every long-running task. Triggering it (Ctrl+C, SIGTERM or
//! [`ShutdownManager::trigger`]) wakes all of them at once.

use tokio::sync::watch;
use tracing::info;

/// Owns the process-wide cancellation state
pub struct ShutdownManager {
    tx: watch::Sender<bool>,
}

impl ShutdownManager {
    /// Create a new shutdown manager in running state
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    /// Spawn a Ctrl+C / SIGTERM handler that triggers shutdown
    pub fn spawn_signal_handler(&self) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            wait_for_signal().await;
            info!("");
            info!("Received shutdown signal");
            info!("Shutting down gracefully...");
            tx.send_replace(true);
        });
    }

    /// Request shutdown programmatically
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    /// Check if the process should continue running
    pub fn is_running(&self) -> bool {
        !*self.tx.borrow()
    }

    /// Handle for a task that must stop on shutdown
    pub fn signal(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for ShutdownManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Cancellation handle held by a task
#[derive(Clone)]
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl ShutdownSignal {
    pub fn is_running(&self) -> bool {
        !*self.rx.borrow()
    }

    /// Resolves once shutdown has been requested
    pub async fn cancelled(&mut self) {
        // A dropped manager counts as shutdown
        let _ = self.rx.wait_for(|stopped| *stopped).await;
    }
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = sigterm.recv() => {}
            }
        }
        Err(_) => {
            let _ = tokio::signal::ctrl_c().await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_trigger_wakes_every_signal() {
        let manager = ShutdownManager::new();
        let mut first = manager.signal();
        let mut second = manager.signal();

        assert!(manager.is_running());
        assert!(first.is_running());

        manager.trigger();

        tokio::time::timeout(Duration::from_secs(1), first.cancelled())
            .await
            .expect("first signal should resolve");
        tokio::time::timeout(Duration::from_secs(1), second.cancelled())
            .await
            .expect("second signal should resolve");
        assert!(!manager.is_running());
        assert!(!second.is_running());
    }

    #[tokio::test]
    async fn test_signal_created_after_trigger_is_cancelled() {
        let manager = ShutdownManager::new();
        manager.trigger();

        let mut late = manager.signal();
        tokio::time::timeout(Duration::from_secs(1), late.cancelled())
            .await
            .expect("late signal should resolve immediately");
    }
}
