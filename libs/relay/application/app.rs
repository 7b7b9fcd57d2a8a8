//! Relay application
//!
//! Wires the provider client, the pollers, the sender and the HTTP server
//! together for one process.

use normalizer::GameRecord;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{error, info};

use super::orchestrator::Orchestrator;
use crate::infrastructure::client::{FeedProvider, ProviderClient, ProviderError};
use crate::infrastructure::config::RelayConfig;
use crate::infrastructure::reconnect::FixedDelay;
use crate::infrastructure::sender::{connect_upstream, Sender, SenderError, SubscriberHub};
use crate::infrastructure::server::{self, ServerError};
use crate::infrastructure::shutdown::ShutdownManager;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Sender(#[from] SenderError),

    #[error(transparent)]
    Server(#[from] ServerError),

    #[error("Task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, RelayError>;

pub struct RelayApp {
    config: RelayConfig,
    pub shutdown: ShutdownManager,
    hub: Arc<SubscriberHub>,
}

impl RelayApp {
    pub fn new(config: RelayConfig) -> Self {
        Self {
            config,
            shutdown: ShutdownManager::new(),
            hub: Arc::new(SubscriberHub::new()),
        }
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Run until Ctrl+C / SIGTERM or until the HTTP server stops.
    ///
    /// Startup blocks until the upstream analyzer accepts the connection. A
    /// later upstream failure is reported once the process shuts down.
    pub async fn run(&self) -> Result<()> {
        self.shutdown.spawn_signal_handler();

        let provider: Arc<dyn FeedProvider> = Arc::new(ProviderClient::new(&self.config.pin)?);
        let (records_tx, records_rx) = mpsc::channel::<GameRecord>(self.config.channel_capacity);

        let strategy = FixedDelay::unbounded(self.config.sender.reconnect_delay());
        let mut signal = self.shutdown.signal();
        let upstream = match connect_upstream(&self.config.sender.url, &strategy, &mut signal).await {
            Ok(upstream) => upstream,
            Err(SenderError::Cancelled) => {
                info!("[Relay] Shutdown before the upstream link was established");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let sender = Sender::new(upstream, Arc::clone(&self.hub), records_rx);
        let sender_task = tokio::spawn(sender.run(self.shutdown.signal()));

        let orchestrator = Orchestrator::new(self.config.pin.clone(), provider, records_tx);
        let orchestrator_task = tokio::spawn(orchestrator.run(self.shutdown.signal()));

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.port_number()));
        let mut server_task = tokio::spawn(server::serve(
            addr,
            Arc::clone(&self.hub),
            self.shutdown.signal(),
        ));

        // An upstream failure stalls ingestion but keeps the process up; the
        // sender holds on until shutdown. The server returning early means
        // the port is gone, which does stop the process.
        let server_result = tokio::select! {
            result = &mut server_task => Some(result),
            _ = signal.cancelled() => None,
        };
        if self.shutdown.is_running() {
            error!("[Relay] HTTP server stopped, shutting down");
            self.shutdown.trigger();
        }

        let server_result = match server_result {
            Some(result) => result,
            None => server_task.await,
        };
        let sender_result = sender_task.await;
        orchestrator_task.await?;

        sender_result??;
        server_result??;
        Ok(())
    }
}
