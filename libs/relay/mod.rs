//! # Relay
//!
//! Polls the odds provider, normalizes every snapshot and relays the
//! resulting records to the upstream analyzer and to WebSocket subscribers.
//!
//! ## Layout
//!
//! - **application**: per-sport polling orchestrator, process wiring
//! - **infrastructure**: provider client, broadcast sender, HTTP server,
//!   configuration, logging, shutdown

pub mod application;
pub mod infrastructure;

// Re-export application types
pub use application::{Orchestrator, RelayApp, Roster, SportWorker, TickOutcome};

// Re-export infrastructure types
pub use infrastructure::{
    connect_upstream, init_tracing, ConfigError, FeedProvider, FixedDelay, ProviderClient,
    ProviderConfig, ProviderError, ReconnectionStrategy, RelayConfig, Sender, SenderConfig,
    SenderError, ServerError, ShutdownManager, ShutdownSignal, SportToggles, StreamConfig,
    SubscriberHub, Upstream, UpstreamSocket,
};
