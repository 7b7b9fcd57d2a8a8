//! HTTP surface: liveness probe and subscriber upgrades

use axum::extract::{State, WebSocketUpgrade};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::info;

use super::sender::SubscriberHub;
use super::shutdown::ShutdownSignal;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server failed: {0}")]
    Serve(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;

/// `/health` and `/output` routes
pub fn router(hub: Arc<SubscriberHub>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/output", get(output_handler))
        .with_state(hub)
}

/// 200 with a JSON content type and no body
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, [(header::CONTENT_TYPE, "application/json")])
}

async fn output_handler(
    ws: WebSocketUpgrade,
    State(hub): State<Arc<SubscriberHub>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| async move { hub.attach(socket).await })
}

/// Bind `addr` and serve until shutdown
pub async fn serve(
    addr: SocketAddr,
    hub: Arc<SubscriberHub>,
    mut shutdown: ShutdownSignal,
) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    serve_on(listener, hub, async move { shutdown.cancelled().await }).await
}

/// Serve on an already bound listener until `until` resolves
pub async fn serve_on(
    listener: TcpListener,
    hub: Arc<SubscriberHub>,
    until: impl std::future::Future<Output = ()> + Send + 'static,
) -> Result<()> {
    info!("[Server] Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(hub))
        .with_graceful_shutdown(until)
        .await?;

    info!("[Server] Stopped");
    Ok(())
}
