//! Upstream analyzer link

use async_trait::async_trait;
use futures::SinkExt;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{info, warn};

use super::{Result, SenderError};
use crate::infrastructure::reconnect::ReconnectionStrategy;
use crate::infrastructure::shutdown::ShutdownSignal;

pub type UpstreamSocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Destination that must receive every record
#[async_trait]
pub trait Upstream: Send {
    async fn send_text(&mut self, payload: &str) -> Result<()>;
}

#[async_trait]
impl Upstream for UpstreamSocket {
    async fn send_text(&mut self, payload: &str) -> Result<()> {
        self.send(Message::Text(payload.to_string()))
            .await
            .map_err(SenderError::Upstream)
    }
}

/// Connect to the upstream URL, retrying as the strategy allows.
///
/// Waiting between attempts is interrupted by shutdown.
pub async fn connect_upstream(
    url: &str,
    strategy: &dyn ReconnectionStrategy,
    shutdown: &mut ShutdownSignal,
) -> Result<UpstreamSocket> {
    let mut attempt = 0;

    loop {
        info!("[Upstream] Connecting to {}", url);

        let error = match connect_async(url).await {
            Ok((socket, _response)) => {
                info!("[Upstream] Connected to {}", url);
                return Ok(socket);
            }
            Err(e) => e,
        };

        let Some(delay) = strategy.next_delay(attempt) else {
            warn!("[Upstream] Giving up: {}", error);
            return Err(SenderError::RetriesExhausted {
                attempts: attempt + 1,
                source: error,
            });
        };
        attempt += 1;

        warn!(
            attempt = attempt,
            retry_in_secs = delay.as_secs_f64(),
            "[Upstream] Connection failed: {}",
            error
        );

        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            _ = shutdown.cancelled() => return Err(SenderError::Cancelled),
        }
    }
}
