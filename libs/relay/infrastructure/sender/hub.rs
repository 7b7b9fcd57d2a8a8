//! Downstream subscribers
//!
//! Every WebSocket upgraded on `/output` is split: the write half is kept
//! here for broadcasting, the read half is drained by the upgrade task until
//! the peer goes away. Either side failing closes and deregisters the
//! subscriber.

use axum::extract::ws::{close_code, CloseFrame, Message, WebSocket};
use futures::stream::SplitStream;
use futures::{Sink, SinkExt, StreamExt};
use std::collections::HashMap;
use std::error::Error as _;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tokio_tungstenite::tungstenite::error::{Error as WsError, ProtocolError};
use tracing::{debug, info, warn};

type SubscriberSink = Pin<Box<dyn Sink<Message, Error = axum::Error> + Send>>;

/// Close codes that end a subscription without being worth a warning
pub fn is_benign_close(code: u16) -> bool {
    matches!(code, close_code::NORMAL | close_code::AWAY | close_code::ABNORMAL)
}

/// Registry of attached subscribers
pub struct SubscriberHub {
    next_id: AtomicU64,
    subscribers: Mutex<HashMap<u64, SubscriberSink>>,
}

impl SubscriberHub {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            subscribers: Mutex::new(HashMap::new()),
        }
    }

    /// Register an upgraded socket and drain its read side until it closes.
    ///
    /// Returns once the subscriber is gone.
    pub async fn attach(&self, socket: WebSocket) {
        let (sink, stream) = socket.split();
        let id = self.register(Box::pin(sink)).await;

        let reason = drain(stream).await;
        match reason {
            Disconnect::Closed(code) if is_benign_close(code) => {
                info!(subscriber = id, code = code, "[Subscribers] Subscriber disconnected");
            }
            Disconnect::Closed(code) => {
                warn!(subscriber = id, code = code, "[Subscribers] Subscriber closed unexpectedly");
            }
            Disconnect::Failed(e) => {
                warn!(subscriber = id, "[Subscribers] Read error: {}", e);
            }
        }

        self.remove(id).await;
    }

    async fn register(&self, sink: SubscriberSink) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut subscribers = self.subscribers.lock().await;
        subscribers.insert(id, sink);
        info!(
            subscriber = id,
            total = subscribers.len(),
            "[Subscribers] Subscriber registered"
        );
        id
    }

    /// Deregister and close one subscriber, if still registered
    async fn remove(&self, id: u64) {
        let sink = self.subscribers.lock().await.remove(&id);
        if let Some(mut sink) = sink {
            let _ = sink.close().await;
            debug!(subscriber = id, "[Subscribers] Subscriber removed");
        }
    }

    /// Send `payload` to every subscriber, dropping those that fail.
    ///
    /// Holds the registry lock for the whole fan-out. Returns the number of
    /// subscribers that received the payload.
    pub async fn broadcast(&self, payload: &str) -> usize {
        let mut subscribers = self.subscribers.lock().await;
        let mut failed = Vec::new();

        for (id, sink) in subscribers.iter_mut() {
            if let Err(e) = sink.send(Message::Text(payload.to_string())).await {
                warn!(subscriber = *id, "[Subscribers] Write failed: {}", e);
                failed.push(*id);
            }
        }

        for id in &failed {
            if let Some(mut sink) = subscribers.remove(id) {
                let _ = sink.close().await;
            }
        }

        subscribers.len()
    }

    /// Close and deregister every subscriber. Returns how many were closed.
    pub async fn close_all(&self) -> usize {
        let mut subscribers = self.subscribers.lock().await;
        let count = subscribers.len();

        for (_, mut sink) in subscribers.drain() {
            let frame = CloseFrame {
                code: close_code::AWAY,
                reason: "shutting down".into(),
            };
            let _ = sink.send(Message::Close(Some(frame))).await;
            let _ = sink.close().await;
        }

        count
    }

    pub async fn count(&self) -> usize {
        self.subscribers.lock().await.len()
    }
}

impl Default for SubscriberHub {
    fn default() -> Self {
        Self::new()
    }
}

enum Disconnect {
    Closed(u16),
    Failed(axum::Error),
}

/// Read and discard everything the subscriber sends
async fn drain(mut stream: SplitStream<WebSocket>) -> Disconnect {
    while let Some(message) = stream.next().await {
        match message {
            Ok(Message::Close(frame)) => {
                // A close without a status is a plain goodbye
                return Disconnect::Closed(frame.map_or(close_code::NORMAL, |f| f.code));
            }
            Ok(_) => continue,
            Err(e) if is_abrupt_reset(&e) => return Disconnect::Closed(close_code::ABNORMAL),
            Err(e) => return Disconnect::Failed(e),
        }
    }
    Disconnect::Closed(close_code::ABNORMAL)
}

/// Peer dropped the TCP connection without a closing handshake
fn is_abrupt_reset(error: &axum::Error) -> bool {
    matches!(
        error.source().and_then(|inner| inner.downcast_ref::<WsError>()),
        Some(WsError::Protocol(ProtocolError::ResetWithoutClosingHandshake))
    )
}
