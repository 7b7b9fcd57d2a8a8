//! Polling orchestrator
//!
//! Spawns one [`SportWorker`] per enabled sport that has a transform. All
//! workers share the provider, the output channel and the shutdown signal.

mod roster;
mod worker;

pub use roster::Roster;
pub use worker::{SportWorker, TickOutcome};

use normalizer::{GameRecord, MarketLayout, Sport};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::infrastructure::client::FeedProvider;
use crate::infrastructure::config::ProviderConfig;
use crate::infrastructure::shutdown::ShutdownSignal;

pub struct Orchestrator {
    config: ProviderConfig,
    provider: Arc<dyn FeedProvider>,
    records: mpsc::Sender<GameRecord>,
}

impl Orchestrator {
    pub fn new(
        config: ProviderConfig,
        provider: Arc<dyn FeedProvider>,
        records: mpsc::Sender<GameRecord>,
    ) -> Self {
        Self {
            config,
            provider,
            records,
        }
    }

    /// Enabled sports that have a transform
    pub fn scheduled_sports(&self) -> Vec<Sport> {
        self.config
            .sport
            .enabled()
            .into_iter()
            .filter(|sport| {
                if sport.layout() == MarketLayout::Unimplemented {
                    warn!(sport = %sport, "[Orchestrator] No transform for sport, not scheduled");
                    return false;
                }
                true
            })
            .collect()
    }

    /// Workers for every scheduled sport
    pub fn workers(&self) -> Vec<SportWorker> {
        self.scheduled_sports()
            .into_iter()
            .map(|sport| {
                SportWorker::new(
                    sport,
                    self.config.mode(),
                    self.config.stream(),
                    self.config.odds_format,
                    Arc::clone(&self.provider),
                    self.records.clone(),
                )
            })
            .collect()
    }

    /// Run every worker until shutdown; returns once all of them exited
    pub async fn run(self, shutdown: ShutdownSignal) {
        let workers = self.workers();
        // Only the workers keep the channel open from here on
        drop(self.records);

        info!(
            mode = if self.config.parse_live { "Live" } else { "PreMatch" },
            sports = workers.len(),
            "[Orchestrator] Starting pollers"
        );

        let mut tasks = JoinSet::new();
        for worker in workers {
            tasks.spawn(worker.run(shutdown.clone()));
        }

        while let Some(result) = tasks.join_next().await {
            if let Err(e) = result {
                error!("[Orchestrator] Poller task failed: {}", e);
            }
        }

        info!("[Orchestrator] All pollers stopped");
    }
}
