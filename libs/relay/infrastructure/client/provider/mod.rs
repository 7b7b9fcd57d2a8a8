//! Odds provider client
//!
//! Two endpoints per sport: the events feed (roster) and the odds feed.
//! [`FeedProvider`] is the seam the pollers depend on; [`ProviderClient`]
//! is the HTTP implementation.

mod body;
mod client;

pub use body::{decode_events, decode_odds, filter_events, normalize_body, PRE_MATCH_WINDOW_HOURS};
pub use client::ProviderClient;

use async_trait::async_trait;
use normalizer::{FeedMode, OddsSnapshot, RawEvent, Sport};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Unexpected status: {0}")]
    Status(reqwest::StatusCode),

    #[error("Deserialization failed: {0}")]
    DeserializeFailed(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ProviderError>;

/// Source of rosters and odds snapshots
#[async_trait]
pub trait FeedProvider: Send + Sync {
    /// Current events of a sport, already filtered for the feed mode.
    /// An empty response body yields an empty list.
    async fn fetch_events(&self, sport: Sport, mode: FeedMode) -> Result<Vec<RawEvent>>;

    /// Current odds snapshot of a sport; `None` for an empty response body
    async fn fetch_odds(&self, sport: Sport, mode: FeedMode) -> Result<Option<OddsSnapshot>>;
}
