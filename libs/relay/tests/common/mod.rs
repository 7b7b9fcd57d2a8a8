//! Common test utilities for relay integration tests
//!
//! A mock upstream WebSocket server that records every text frame, and a
//! scripted feed provider.

#![allow(dead_code)]

use async_trait::async_trait;
use futures::StreamExt;
use normalizer::{FeedMode, OddsSnapshot, RawEvent, Sport};
use parking_lot::Mutex;
use relay::infrastructure::client::provider::Result as ProviderResult;
use relay::{FeedProvider, ProviderError};
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::{mpsc, Notify};
use tokio_tungstenite::accept_async;

/// Macro for verbose test output (controlled by TEST_VERBOSE env var)
#[macro_export]
macro_rules! verbose_println {
    ($($arg:tt)*) => {
        if std::env::var("TEST_VERBOSE").is_ok() {
            println!($($arg)*);
        }
    };
}

// =============================================================================
// Mock upstream
// =============================================================================

/// Upstream analyzer stand-in: accepts WebSocket clients and forwards every
/// text frame it receives to the test
pub struct MockWsServer {
    pub addr: SocketAddr,
    shutdown: Arc<Notify>,
    received: mpsc::UnboundedReceiver<String>,
}

impl MockWsServer {
    /// Create and start a new mock WebSocket server
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let shutdown = Arc::new(Notify::new());
        let shutdown_clone = shutdown.clone();
        let (tx, received) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    result = listener.accept() => {
                        match result {
                            Ok((stream, _)) => {
                                let tx = tx.clone();
                                let shutdown = shutdown_clone.clone();
                                tokio::spawn(async move {
                                    Self::handle_connection(stream, tx, shutdown).await;
                                });
                            }
                            Err(e) => {
                                eprintln!("Accept error: {}", e);
                                break;
                            }
                        }
                    }
                    _ = shutdown_clone.notified() => {
                        break;
                    }
                }
            }
        });

        Self {
            addr,
            shutdown,
            received,
        }
    }

    async fn handle_connection(
        stream: tokio::net::TcpStream,
        tx: mpsc::UnboundedSender<String>,
        shutdown: Arc<Notify>,
    ) {
        let mut ws_stream = match accept_async(stream).await {
            Ok(ws) => ws,
            Err(e) => {
                eprintln!("WebSocket handshake failed: {}", e);
                return;
            }
        };

        loop {
            tokio::select! {
                msg = ws_stream.next() => {
                    match msg {
                        Some(Ok(msg)) if msg.is_text() => {
                            let text = msg.into_text().unwrap_or_default();
                            if tx.send(text).is_err() {
                                break;
                            }
                        }
                        Some(Ok(msg)) if msg.is_close() => break,
                        Some(Ok(_)) => {}
                        Some(Err(_)) | None => break,
                    }
                }
                _ = shutdown.notified() => {
                    break;
                }
            }
        }
    }

    /// Get the WebSocket URL for this server
    pub fn ws_url(&self) -> String {
        format!("ws://{}", self.addr)
    }

    /// Next text frame received from any client
    pub async fn next_message(&mut self, timeout: Duration) -> Option<String> {
        tokio::time::timeout(timeout, self.received.recv())
            .await
            .ok()
            .flatten()
    }

    /// Shutdown the server
    pub fn shutdown(&self) {
        self.shutdown.notify_waiters();
    }
}

impl Drop for MockWsServer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

// =============================================================================
// Scripted provider
// =============================================================================

/// Feed provider returning queued responses. An exhausted queue yields an
/// empty roster / empty odds body.
#[derive(Default)]
pub struct StubProvider {
    events: Mutex<VecDeque<ProviderResult<Vec<RawEvent>>>>,
    odds: Mutex<VecDeque<ProviderResult<Option<OddsSnapshot>>>>,
}

impl StubProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_events(&self, events: Vec<RawEvent>) {
        self.events.lock().push_back(Ok(events));
    }

    pub fn push_events_error(&self, error: ProviderError) {
        self.events.lock().push_back(Err(error));
    }

    pub fn push_odds(&self, snapshot: OddsSnapshot) {
        self.odds.lock().push_back(Ok(Some(snapshot)));
    }

    pub fn push_odds_error(&self, error: ProviderError) {
        self.odds.lock().push_back(Err(error));
    }
}

#[async_trait]
impl FeedProvider for StubProvider {
    async fn fetch_events(&self, _sport: Sport, _mode: FeedMode) -> ProviderResult<Vec<RawEvent>> {
        self.events.lock().pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn fetch_odds(&self, _sport: Sport, _mode: FeedMode) -> ProviderResult<Option<OddsSnapshot>> {
        self.odds.lock().pop_front().unwrap_or(Ok(None))
    }
}

/// Error as returned for a provider outage
pub fn unavailable() -> ProviderError {
    ProviderError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE)
}

/// Error as returned for a garbled body
pub fn garbled() -> ProviderError {
    let error = serde_json::from_str::<serde_json::Value>("{\"leagues\": [").unwrap_err();
    ProviderError::DeserializeFailed(error)
}

// =============================================================================
// Fixtures
// =============================================================================

pub mod fixtures {
    use normalizer::{OddsSnapshot, RawEvent};
    use serde_json::json;

    pub fn raw_event(id: i64, home: &str, away: &str) -> RawEvent {
        RawEvent {
            id,
            league: "England - Premier League".to_string(),
            home: home.to_string(),
            away: away.to_string(),
            live_status: 1,
            ..Default::default()
        }
    }

    /// Snapshot with one active match period per event id
    pub fn snapshot(ids: &[i64]) -> OddsSnapshot {
        let events: Vec<_> = ids
            .iter()
            .map(|id| {
                json!({
                    "id": id,
                    "homeScore": 0,
                    "awayScore": 0,
                    "periods": [{
                        "number": 0,
                        "status": 1,
                        "moneyLine": { "home": 1.9, "draw": 3.4, "away": 4.2 },
                        "totals": [{ "points": 2.5, "over": 1.8, "under": 2.0 }]
                    }]
                })
            })
            .collect();

        serde_json::from_value(json!({
            "sportId": 29,
            "last": 1,
            "leagues": [{ "id": 1, "events": events }]
        }))
        .unwrap()
    }
}
