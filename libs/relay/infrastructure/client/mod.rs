//! External API clients

pub mod provider;

pub use provider::{FeedProvider, ProviderClient, ProviderError};
