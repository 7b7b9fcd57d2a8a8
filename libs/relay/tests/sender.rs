//! Integration tests for the broadcast sender and the HTTP surface

mod common;

use async_trait::async_trait;
use common::fixtures::{raw_event, snapshot};
use common::{MockWsServer, StubProvider};
use futures::StreamExt;
use normalizer::{FeedMode, GameRecord, OddsFormat, RosterEntry, Sport, SportName};
use relay::infrastructure::sender::Result as SenderResult;
use relay::infrastructure::server::serve_on;
use relay::{
    connect_upstream, FeedProvider, FixedDelay, Sender, SenderError, ShutdownManager, SportWorker,
    StreamConfig, SubscriberHub, TickOutcome, Upstream,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;

const WAIT: Duration = Duration::from_secs(5);

fn record(id: i64) -> GameRecord {
    let entry = RosterEntry::new(id, "england premier league", "arsenal", "chelsea");
    GameRecord::new(&entry, SportName::Soccer, 3)
}

/// Serve the router on an ephemeral port until `shutdown` triggers
async fn start_server(hub: Arc<SubscriberHub>, shutdown: &ShutdownManager) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let mut signal = shutdown.signal();
    tokio::spawn(serve_on(listener, hub, async move { signal.cancelled().await }));
    addr
}

async fn wait_for_subscribers(hub: &SubscriberHub, expected: usize) {
    tokio::time::timeout(WAIT, async {
        while hub.count().await != expected {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("subscriber count never reached");
}

/// Upstream whose writes always fail
struct BrokenUpstream;

#[async_trait]
impl Upstream for BrokenUpstream {
    async fn send_text(&mut self, _payload: &str) -> SenderResult<()> {
        Err(SenderError::Upstream(
            tokio_tungstenite::tungstenite::Error::ConnectionClosed,
        ))
    }
}

#[tokio::test]
async fn test_records_reach_upstream_and_subscribers() {
    verbose_println!("Forwarding one record upstream and to a subscriber...");

    let mut upstream_server = MockWsServer::start().await;
    let shutdown = ShutdownManager::new();
    let hub = Arc::new(SubscriberHub::new());
    let addr = start_server(Arc::clone(&hub), &shutdown).await;

    let (mut subscriber, _) = tokio_tungstenite::connect_async(format!("ws://{}/output", addr))
        .await
        .unwrap();
    wait_for_subscribers(&hub, 1).await;

    let strategy = FixedDelay::new(Duration::from_millis(50), Some(3));
    let upstream = connect_upstream(&upstream_server.ws_url(), &strategy, &mut shutdown.signal())
        .await
        .unwrap();

    let (tx, rx) = mpsc::channel(4);
    let sender_task = tokio::spawn(Sender::new(upstream, Arc::clone(&hub), rx).run(shutdown.signal()));

    tx.send(record(100)).await.unwrap();

    let upstream_text = upstream_server.next_message(WAIT).await.expect("upstream frame");
    let value: serde_json::Value = serde_json::from_str(&upstream_text).unwrap();
    assert_eq!(value["Pid"], 100);
    assert_eq!(value["MatchId"], "100");
    assert_eq!(value["Source"], "Pinnacle");
    assert_eq!(value["SportName"], "Soccer");
    // two-space indentation
    assert!(upstream_text.starts_with("{\n  \"Pid\": 100,"));

    let subscriber_frame = tokio::time::timeout(WAIT, subscriber.next())
        .await
        .expect("subscriber frame")
        .unwrap()
        .unwrap();
    assert_eq!(subscriber_frame, Message::Text(upstream_text));

    shutdown.trigger();
    let result = tokio::time::timeout(WAIT, sender_task).await.unwrap().unwrap();
    assert!(result.is_ok());
    assert_eq!(hub.count().await, 0);
}

#[tokio::test]
async fn test_upstream_failure_holds_until_shutdown() {
    let shutdown = ShutdownManager::new();
    let hub = Arc::new(SubscriberHub::new());
    let (tx, rx) = mpsc::channel(4);

    let mut sender_task = tokio::spawn(Sender::new(BrokenUpstream, hub, rx).run(shutdown.signal()));
    tx.send(record(1)).await.unwrap();

    // forwarding stopped, but the sender keeps the channel open
    let still_running = tokio::time::timeout(Duration::from_millis(300), &mut sender_task).await;
    assert!(still_running.is_err(), "sender returned before shutdown");
    assert!(shutdown.is_running());
    assert!(!tx.is_closed());

    shutdown.trigger();
    let result = tokio::time::timeout(WAIT, sender_task).await.unwrap().unwrap();
    assert!(matches!(result, Err(SenderError::Upstream(_))));
}

#[tokio::test]
async fn test_upstream_failure_stalls_producers() {
    verbose_println!("Upstream fails, the poller should block on a full channel...");

    let provider = StubProvider::new();
    provider.push_events(vec![
        raw_event(1, "Arsenal", "Chelsea"),
        raw_event(2, "Everton", "Fulham"),
        raw_event(3, "Leeds", "Burnley"),
    ]);
    provider.push_odds(snapshot(&[1]));
    provider.push_odds(snapshot(&[1, 2, 3]));

    let (tx, rx) = mpsc::channel(1);
    let shutdown = ShutdownManager::new();
    let provider: Arc<dyn FeedProvider> = provider;
    let worker = SportWorker::new(
        Sport::Football,
        FeedMode::Live,
        StreamConfig {
            events_interval: 1,
            odds_interval: 1,
        },
        OddsFormat::Decimal,
        provider,
        tx,
    );
    worker.refresh_roster().await;

    let hub = Arc::new(SubscriberHub::new());
    let sender_task = tokio::spawn(Sender::new(BrokenUpstream, hub, rx).run(shutdown.signal()));

    let mut signal = shutdown.signal();
    assert_eq!(worker.poll_odds(&mut signal).await, TickOutcome::Continue);

    // one record may sit in the buffer; the next send has to wait
    let stalled = tokio::time::timeout(Duration::from_millis(500), worker.poll_odds(&mut signal)).await;
    assert!(stalled.is_err(), "poller finished a tick after the upstream failed");

    shutdown.trigger();
    let result = tokio::time::timeout(WAIT, sender_task).await.unwrap().unwrap();
    assert!(matches!(result, Err(SenderError::Upstream(_))));
}

#[tokio::test]
async fn test_departed_subscriber_is_deregistered() {
    let shutdown = ShutdownManager::new();
    let hub = Arc::new(SubscriberHub::new());
    let addr = start_server(Arc::clone(&hub), &shutdown).await;

    let (mut first, _) = tokio_tungstenite::connect_async(format!("ws://{}/output", addr))
        .await
        .unwrap();
    let (mut second, _) = tokio_tungstenite::connect_async(format!("ws://{}/output", addr))
        .await
        .unwrap();
    wait_for_subscribers(&hub, 2).await;

    first.close(None).await.unwrap();
    wait_for_subscribers(&hub, 1).await;

    assert_eq!(hub.broadcast("{}").await, 1);
    let frame = tokio::time::timeout(WAIT, second.next())
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    assert_eq!(frame, Message::Text("{}".to_string()));

    shutdown.trigger();
}

#[tokio::test]
async fn test_shutdown_closes_subscribers() {
    let shutdown = ShutdownManager::new();
    let hub = Arc::new(SubscriberHub::new());
    let addr = start_server(Arc::clone(&hub), &shutdown).await;

    let (mut subscriber, _) = tokio_tungstenite::connect_async(format!("ws://{}/output", addr))
        .await
        .unwrap();
    wait_for_subscribers(&hub, 1).await;

    assert_eq!(hub.close_all().await, 1);

    let frame = tokio::time::timeout(WAIT, subscriber.next()).await.unwrap();
    match frame {
        Some(Ok(Message::Close(Some(close)))) => assert_eq!(u16::from(close.code), 1001),
        other => panic!("expected a going-away close frame, got {:?}", other),
    }

    shutdown.trigger();
}

#[tokio::test]
async fn test_health_endpoint() {
    let shutdown = ShutdownManager::new();
    let addr = start_server(Arc::new(SubscriberHub::new()), &shutdown).await;

    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let response = client
        .get(format!("http://{}/health", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(
        response.headers()[reqwest::header::CONTENT_TYPE],
        "application/json"
    );
    assert!(response.text().await.unwrap().is_empty());

    shutdown.trigger();
}

#[tokio::test]
async fn test_connect_gives_up_after_limit() {
    // Bind then drop to get a port nobody listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let shutdown = ShutdownManager::new();
    let strategy = FixedDelay::new(Duration::from_millis(10), Some(2));

    let result = connect_upstream(&format!("ws://{}", addr), &strategy, &mut shutdown.signal()).await;

    assert!(matches!(
        result,
        Err(SenderError::RetriesExhausted { attempts: 3, .. })
    ));
}

#[tokio::test]
async fn test_connect_retry_observes_shutdown() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let shutdown = ShutdownManager::new();
    let strategy = FixedDelay::unbounded(Duration::from_secs(60));
    let mut signal = shutdown.signal();
    let url = format!("ws://{}", addr);

    let connect = tokio::spawn(async move { connect_upstream(&url, &strategy, &mut signal).await });
    tokio::time::sleep(Duration::from_millis(100)).await;
    shutdown.trigger();

    let result = tokio::time::timeout(WAIT, connect).await.unwrap().unwrap();
    assert!(matches!(result, Err(SenderError::Cancelled)));
}
