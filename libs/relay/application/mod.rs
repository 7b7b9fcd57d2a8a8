//! Application Layer
//!
//! The polling orchestrator and the process wiring that connects it to the
//! sender and the HTTP server.

pub mod app;
pub mod orchestrator;

pub use app::RelayApp;
pub use orchestrator::{Orchestrator, Roster, SportWorker, TickOutcome};
