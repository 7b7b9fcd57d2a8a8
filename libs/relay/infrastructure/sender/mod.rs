//! Broadcast sender
//!
//! Consumes normalized records from the shared channel, writes each one to
//! the upstream analyzer and then fans the same text out to every
//! subscriber attached on `/output`.
//!
//! The upstream link is mandatory: it is established before anything is
//! forwarded and a failed write stops forwarding for good. The channel is
//! then held open but no longer drained, so it fills and every producer
//! blocks until shutdown. Subscribers are best-effort: a failed write only
//! drops that subscriber.

mod hub;
mod upstream;

pub use hub::{is_benign_close, SubscriberHub};
pub use upstream::{connect_upstream, Upstream, UpstreamSocket};

use normalizer::{GameRecord, Source};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::infrastructure::shutdown::ShutdownSignal;

#[derive(Error, Debug)]
pub enum SenderError {
    #[error("Upstream connection abandoned after {attempts} attempts: {source}")]
    RetriesExhausted {
        attempts: usize,
        #[source]
        source: tokio_tungstenite::tungstenite::Error,
    },

    #[error("Shutdown requested before the upstream link was established")]
    Cancelled,

    #[error("Upstream write failed: {0}")]
    Upstream(#[source] tokio_tungstenite::tungstenite::Error),

    #[error("Failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SenderError>;

/// Forwards records to the upstream link and the subscribers
pub struct Sender<U: Upstream> {
    upstream: U,
    hub: Arc<SubscriberHub>,
    records: mpsc::Receiver<GameRecord>,
    forwarded: u64,
}

impl<U: Upstream> Sender<U> {
    pub fn new(upstream: U, hub: Arc<SubscriberHub>, records: mpsc::Receiver<GameRecord>) -> Self {
        Self {
            upstream,
            hub,
            records,
            forwarded: 0,
        }
    }

    /// Forward records until shutdown or channel closure.
    ///
    /// An upstream failure ends forwarding but the sender keeps the channel
    /// until shutdown and then returns the failure. Either way every
    /// subscriber is closed and deregistered on the way out. The upstream
    /// link is left to its owner.
    pub async fn run(mut self, mut shutdown: ShutdownSignal) -> Result<()> {
        info!("[Sender] Forwarding records");

        loop {
            tokio::select! {
                biased;

                _ = shutdown.cancelled() => {
                    info!("[Sender] Shutdown signal received");
                    break;
                }

                record = self.records.recv() => {
                    let Some(record) = record else {
                        info!("[Sender] Record channel closed");
                        break;
                    };
                    if let Err(e) = self.forward(record).await {
                        error!(
                            forwarded = self.forwarded,
                            "[Sender] Forwarding stopped, ingestion will stall until restart: {}", e
                        );
                        // Records stay queued; producers block once the channel is full
                        shutdown.cancelled().await;
                        self.close_subscribers().await;
                        return Err(e);
                    }
                }
            }
        }

        self.close_subscribers().await;
        Ok(())
    }

    async fn close_subscribers(&self) {
        let closed = self.hub.close_all().await;
        info!(
            forwarded = self.forwarded,
            subscribers_closed = closed,
            "[Sender] Stopped"
        );
    }

    async fn forward(&mut self, record: GameRecord) -> Result<()> {
        let record = GameRecord {
            source: Some(Source::Pinnacle),
            ..record
        };
        let payload = serde_json::to_string_pretty(&record)?;

        self.upstream.send_text(&payload).await?;
        self.forwarded += 1;

        let delivered = self.hub.broadcast(&payload).await;
        debug!(
            pid = record.pid,
            subscribers = delivered,
            "[Sender] Record forwarded"
        );
        Ok(())
    }
}
