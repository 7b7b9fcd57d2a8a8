//! Infrastructure Layer
//!
//! Provider client, broadcast sender, HTTP server and process plumbing
//! (configuration, logging, shutdown).

pub mod client;
pub mod config;
pub mod logging;
pub mod reconnect;
pub mod sender;
pub mod server;
pub mod shutdown;

pub use client::{FeedProvider, ProviderClient, ProviderError};
pub use config::{ConfigError, ProviderConfig, RelayConfig, SenderConfig, SportToggles, StreamConfig};
pub use logging::init_tracing;
pub use reconnect::{FixedDelay, ReconnectionStrategy};
pub use sender::{connect_upstream, Sender, SenderError, SubscriberHub, Upstream, UpstreamSocket};
pub use server::ServerError;
pub use shutdown::{ShutdownManager, ShutdownSignal};
