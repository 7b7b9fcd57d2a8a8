//! Odds relay - main library
//!
//! Polls the odds provider, normalizes every snapshot into the shared record
//! shape and forwards the records to the upstream analyzer and to any
//! subscribed WebSocket clients.
//!
//! ## Architecture
//!
//! - **bin_common**: Shared utilities for the binary (CLI, runner)
//! - **normalizer**: Pure normalization engine (re-exported from workspace)
//! - **relay**: Polling, sending and serving (re-exported from workspace)
//!
//! ## Usage in Binaries
//!
//! ```rust,no_run
//! use odds_relay::bin_common::{load_config_from_env, ConfigType};
//! use odds_relay::relay::RelayConfig;
//!
//! let path = load_config_from_env(ConfigType::Relay);
//! let config = RelayConfig::load(path).unwrap();
//! ```

// Re-export workspace libraries for convenience
pub use normalizer;
pub use relay;

// Binary common utilities
pub mod bin_common {
    //! Common utilities for binary executables

    pub mod cli;
    pub mod runner;

    pub use cli::{config_type_from_args, load_config_from_env, parse_args, ConfigType};
    pub use runner::{BinaryRunner, RunConfig};
}
