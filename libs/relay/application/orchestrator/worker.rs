//! One polling loop per sport
//!
//! Each worker owns two timers. The events timer refreshes the roster, the
//! odds timer normalizes the current snapshot against it and queues the
//! records for the sender.

use chrono::Utc;
use normalizer::{
    normalize, tennis, FeedMode, GameRecord, MarketLayout, OddsFormat, OddsSnapshot, Sport,
};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::time::{interval_at, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use super::roster::Roster;
use crate::infrastructure::client::FeedProvider;
use crate::infrastructure::config::StreamConfig;
use crate::infrastructure::shutdown::ShutdownSignal;

/// What the loop should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Stop,
}

pub struct SportWorker {
    sport: Sport,
    mode: FeedMode,
    stream: StreamConfig,
    odds_format: OddsFormat,
    provider: Arc<dyn FeedProvider>,
    roster: Roster,
    records: mpsc::Sender<GameRecord>,
}

impl SportWorker {
    pub fn new(
        sport: Sport,
        mode: FeedMode,
        stream: StreamConfig,
        odds_format: OddsFormat,
        provider: Arc<dyn FeedProvider>,
        records: mpsc::Sender<GameRecord>,
    ) -> Self {
        Self {
            sport,
            mode,
            stream,
            odds_format,
            provider,
            roster: Roster::new(),
            records,
        }
    }

    pub fn sport(&self) -> Sport {
        self.sport
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Poll until shutdown. Both timers fire first after one full period.
    pub async fn run(self, mut shutdown: ShutdownSignal) {
        let events_period = self.stream.events_period();
        let odds_period = self.stream.odds_period();
        let start = tokio::time::Instant::now();

        let mut events_timer = interval_at(start + events_period, events_period);
        let mut odds_timer = interval_at(start + odds_period, odds_period);
        events_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        odds_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            sport = %self.sport,
            events_secs = events_period.as_secs(),
            odds_secs = odds_period.as_secs(),
            "[Poller] Started"
        );

        loop {
            tokio::select! {
                biased;

                _ = shutdown.cancelled() => break,

                _ = events_timer.tick() => self.refresh_roster().await,

                _ = odds_timer.tick() => {
                    if self.poll_odds(&mut shutdown).await == TickOutcome::Stop {
                        break;
                    }
                }
            }
        }

        info!(sport = %self.sport, "[Poller] Stopped");
    }

    /// Events tick: fetch the roster and replace the known entries
    pub async fn refresh_roster(&self) {
        let started = Instant::now();

        let events = match self.provider.fetch_events(self.sport, self.mode).await {
            Ok(events) => events,
            Err(e) => {
                error!(sport = %self.sport, "[Poller] Failed to fetch events: {}", e);
                return;
            }
        };

        let size = match self.sport.layout() {
            MarketLayout::Hierarchical => self.roster.replace_tennis(&events),
            _ => self.roster.replace(&events),
        };

        info!(
            sport = %self.sport,
            events = events.len(),
            roster = size,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "[Poller] Roster refreshed"
        );
    }

    /// Odds tick: normalize the snapshot and queue the records
    pub async fn poll_odds(&self, shutdown: &mut ShutdownSignal) -> TickOutcome {
        let snapshot = match self.provider.fetch_odds(self.sport, self.mode).await {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                debug!(sport = %self.sport, "[Poller] Empty odds response");
                return TickOutcome::Continue;
            }
            Err(e) => {
                error!(sport = %self.sport, "[Poller] Failed to fetch odds: {}", e);
                return TickOutcome::Continue;
            }
        };

        let records = self.normalize_snapshot(&snapshot);
        let count = records.len();

        for record in records {
            tokio::select! {
                biased;

                _ = shutdown.cancelled() => return TickOutcome::Stop,

                sent = self.records.send(record) => {
                    if sent.is_err() {
                        warn!(sport = %self.sport, "[Poller] Record channel closed");
                        return TickOutcome::Stop;
                    }
                }
            }
        }

        info!(sport = %self.sport, records = count, "[Poller] Records forwarded");
        TickOutcome::Continue
    }

    /// Records for every snapshot event known to the roster, stamped with
    /// the feed mode and the snapshot's creation time.
    pub fn normalize_snapshot(&self, snapshot: &OddsSnapshot) -> Vec<GameRecord> {
        let records: Vec<GameRecord> = match self.sport.layout() {
            MarketLayout::Flat => snapshot
                .events()
                .filter_map(|event| {
                    let entry = self.roster.get(event.id)?;
                    normalize(self.sport, &entry, event, self.odds_format)
                })
                .collect(),
            MarketLayout::Hierarchical => self
                .roster
                .with_entries(|entries| tennis(entries, snapshot, self.odds_format))
                .into_values()
                .collect(),
            MarketLayout::Unimplemented => Vec::new(),
        };

        let created_at = Utc::now() - snapshot.staleness();
        records
            .into_iter()
            .map(|record| record.stamped(self.mode.is_live(), created_at))
            .collect()
    }
}
