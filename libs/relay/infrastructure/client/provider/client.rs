use async_trait::async_trait;
use chrono::Utc;
use normalizer::{FeedMode, OddsSnapshot, RawEvent, Sport};
use reqwest::{header, Client, StatusCode};
use tracing::debug;

use super::body::{decode_events, decode_odds};
use super::{FeedProvider, ProviderError, Result};
use crate::infrastructure::config::ProviderConfig;

/// HTTP client for the provider's events and odds endpoints.
///
/// Responses are gzip-compressed; reqwest negotiates and inflates them.
pub struct ProviderClient {
    events_endpoint: String,
    odds_endpoint: String,
    username: String,
    password: String,
    token: String,
    client: Client,
}

impl ProviderClient {
    /// Build a client with the configured proxy and timeout
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let mut builder = Client::builder().timeout(config.timeout()).gzip(true);

        if !config.proxy.is_empty() {
            builder = builder.proxy(reqwest::Proxy::all(&config.proxy)?);
        }

        Ok(Self {
            events_endpoint: format!("{}{}", config.url, config.events_url),
            odds_endpoint: format!("{}{}", config.url, config.odds_url),
            username: config.username.clone(),
            password: config.password.clone(),
            token: config.token.clone(),
            client: builder.build()?,
        })
    }

    /// GET one endpoint for a sport and return the (inflated) body text
    async fn get(&self, endpoint: &str, sport: Sport, mode: FeedMode) -> Result<String> {
        let params = [
            ("sportId", sport.provider_id().to_string()),
            ("isLive", mode.query_flag().to_string()),
        ];

        debug!("[Provider] GET {} sport={} isLive={}", endpoint, sport, mode.query_flag());

        let mut request = self
            .client
            .get(endpoint)
            .query(&params)
            .header(header::ACCEPT, "*/*")
            .header("token", &self.token);

        if !self.username.is_empty() {
            request = request.basic_auth(&self.username, Some(&self.password));
        }

        let response = request.send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(ProviderError::Status(status));
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl FeedProvider for ProviderClient {
    async fn fetch_events(&self, sport: Sport, mode: FeedMode) -> Result<Vec<RawEvent>> {
        let body = self.get(&self.events_endpoint, sport, mode).await?;
        decode_events(&body, sport, mode, Utc::now())
    }

    async fn fetch_odds(&self, sport: Sport, mode: FeedMode) -> Result<Option<OddsSnapshot>> {
        let body = self.get(&self.odds_endpoint, sport, mode).await?;
        decode_odds(&body)
    }
}
