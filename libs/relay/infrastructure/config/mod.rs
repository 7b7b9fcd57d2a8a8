//! Relay configuration
//!
//! Loaded from a YAML file, with credentials and endpoints overridable from
//! the environment (`.env` is honoured).

use normalizer::{FeedMode, OddsFormat, Sport};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config file: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Top-level relay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Port of the liveness / subscriber HTTP server
    #[serde(default = "default_port")]
    pub port: String,
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Capacity of the channel between the pollers and the sender
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
    pub pin: ProviderConfig,
    pub sender: SenderConfig,
}

/// Odds provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub url: String,
    #[serde(default = "default_events_url")]
    pub events_url: String,
    #[serde(default = "default_odds_url")]
    pub odds_url: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub proxy: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// true = poll live markets, false = pre-match
    #[serde(default)]
    pub parse_live: bool,
    #[serde(default)]
    pub odds_format: OddsFormat,
    #[serde(default = "StreamConfig::live")]
    pub live: StreamConfig,
    #[serde(default = "StreamConfig::prematch")]
    pub prematch: StreamConfig,
    #[serde(default)]
    pub sport: SportToggles,
}

/// Poll intervals for one feed mode, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamConfig {
    pub events_interval: u64,
    pub odds_interval: u64,
}

impl StreamConfig {
    fn live() -> Self {
        Self {
            events_interval: 10,
            odds_interval: 2,
        }
    }

    fn prematch() -> Self {
        Self {
            events_interval: 60,
            odds_interval: 10,
        }
    }

    pub fn events_period(&self) -> Duration {
        Duration::from_secs(self.events_interval)
    }

    pub fn odds_period(&self) -> Duration {
        Duration::from_secs(self.odds_interval)
    }
}

/// Which sports to poll
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SportToggles {
    #[serde(default)]
    pub football: bool,
    #[serde(default)]
    pub tennis: bool,
    #[serde(default)]
    pub basketball: bool,
    #[serde(default)]
    pub volleyball: bool,
    #[serde(default)]
    pub table_tennis: bool,
    #[serde(default)]
    pub handball: bool,
}

impl SportToggles {
    pub fn is_enabled(&self, sport: Sport) -> bool {
        match sport {
            Sport::Football => self.football,
            Sport::Tennis => self.tennis,
            Sport::Basketball => self.basketball,
            Sport::Volleyball => self.volleyball,
            Sport::TableTennis => self.table_tennis,
            Sport::Handball => self.handball,
        }
    }

    /// Enabled sports in declaration order
    pub fn enabled(&self) -> Vec<Sport> {
        Sport::ALL
            .iter()
            .copied()
            .filter(|sport| self.is_enabled(*sport))
            .collect()
    }
}

/// Upstream analyzer link
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SenderConfig {
    pub url: String,
    #[serde(default = "default_reconnect_delay")]
    pub reconnect_delay_secs: u64,
}

impl SenderConfig {
    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_secs(self.reconnect_delay_secs)
    }
}

fn default_port() -> String {
    "8080".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_channel_capacity() -> usize {
    150
}

fn default_events_url() -> String {
    "/v1/fixtures".to_string()
}

fn default_odds_url() -> String {
    "/v1/odds".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_reconnect_delay() -> u64 {
    5
}

impl ProviderConfig {
    pub fn mode(&self) -> FeedMode {
        FeedMode::from_live_flag(self.parse_live)
    }

    /// Interval pair of the configured feed mode
    pub fn stream(&self) -> StreamConfig {
        match self.mode() {
            FeedMode::Live => self.live,
            FeedMode::PreMatch => self.prematch,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl RelayConfig {
    /// Load configuration from YAML file and .env
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self> {
        let yaml_content = std::fs::read_to_string(config_path)?;
        let mut config = Self::from_yaml(&yaml_content)?;

        dotenv::dotenv().ok(); // Don't fail if .env doesn't exist
        config.apply_env_overrides();

        config.validate()?;
        Ok(config)
    }

    /// Parse without touching the environment
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    fn apply_env_overrides(&mut self) {
        override_from_env("PIN_URL", &mut self.pin.url);
        override_from_env("PIN_USERNAME", &mut self.pin.username);
        override_from_env("PIN_PASSWORD", &mut self.pin.password);
        override_from_env("PIN_TOKEN", &mut self.pin.token);
        override_from_env("PIN_PROXY", &mut self.pin.proxy);
        override_from_env("SENDER_URL", &mut self.sender.url);
        override_from_env("PORT", &mut self.port);
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.pin.url.is_empty() {
            return Err(ConfigError::ValidationError(
                "pin.url cannot be empty".to_string(),
            ));
        }

        if self.sender.url.is_empty() {
            return Err(ConfigError::ValidationError(
                "sender.url cannot be empty".to_string(),
            ));
        }

        if self.pin.timeout == 0 {
            return Err(ConfigError::ValidationError(
                "pin.timeout must be greater than 0".to_string(),
            ));
        }

        for (name, stream) in [("live", self.pin.live), ("prematch", self.pin.prematch)] {
            if stream.events_interval == 0 || stream.odds_interval == 0 {
                return Err(ConfigError::ValidationError(format!(
                    "pin.{} intervals must be greater than 0",
                    name
                )));
            }
        }

        if self.channel_capacity == 0 {
            return Err(ConfigError::ValidationError(
                "channel_capacity must be greater than 0".to_string(),
            ));
        }

        if self.port.parse::<u16>().is_err() {
            return Err(ConfigError::ValidationError(format!(
                "port must be a valid TCP port, got '{}'",
                self.port
            )));
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "log_level must be one of: {}",
                valid_levels.join(", ")
            )));
        }

        Ok(())
    }

    /// Port as a number. Only meaningful after [`RelayConfig::validate`].
    pub fn port_number(&self) -> u16 {
        self.port.parse().unwrap_or_default()
    }

    /// Log configuration summary
    pub fn log(&self) {
        let stream = self.pin.stream();
        let sports: Vec<String> = self
            .pin
            .sport
            .enabled()
            .iter()
            .map(ToString::to_string)
            .collect();

        info!("Configuration loaded:");
        info!("  Provider URL: {}", self.pin.url);
        info!("  Events path: {}", self.pin.events_url);
        info!("  Odds path: {}", self.pin.odds_url);
        info!("  Username: {}", redact(&self.pin.username));
        info!("  Password: {}", redact(&self.pin.password));
        info!("  Token: {}", redact(&self.pin.token));
        info!("  Proxy: {}", if self.pin.proxy.is_empty() { "none" } else { "configured" });
        info!("  Timeout: {} seconds", self.pin.timeout);
        info!("  Mode: {}", if self.pin.parse_live { "Live" } else { "PreMatch" });
        info!("  Events interval: {} seconds", stream.events_interval);
        info!("  Odds interval: {} seconds", stream.odds_interval);
        info!("  Odds format: {:?}", self.pin.odds_format);
        info!("  Sports: {}", sports.join(", "));
        info!("  Sender URL: {}", self.sender.url);
        info!("  Reconnect delay: {} seconds", self.sender.reconnect_delay_secs);
        info!("  Channel capacity: {}", self.channel_capacity);
        info!("  Port: {}", self.port);
        info!("  Log level: {}", self.log_level);
    }
}

fn override_from_env(key: &str, target: &mut String) {
    if let Ok(value) = std::env::var(key) {
        info!("Overriding {} from environment variable", key);
        *target = value;
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "not set"
    } else {
        "***"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
pin:
  url: "https://api.provider.test"
sender:
  url: "ws://127.0.0.1:9000/ws"
"#;

    #[test]
    fn test_defaults() {
        let config = RelayConfig::from_yaml(MINIMAL).unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.port, "8080");
        assert_eq!(config.channel_capacity, 150);
        assert_eq!(config.sender.reconnect_delay(), Duration::from_secs(5));
        assert_eq!(config.pin.odds_format, OddsFormat::Decimal);
        assert_eq!(config.pin.mode(), FeedMode::PreMatch);
        assert_eq!(config.pin.stream(), StreamConfig::prematch());
        assert!(config.pin.sport.enabled().is_empty());
    }

    #[test]
    fn test_sport_toggles() {
        let yaml = r#"
pin:
  url: "https://api.provider.test"
  parse_live: true
  odds_format: american
  live: { events_interval: 5, odds_interval: 1 }
  sport: { tennis: true, football: true, handball: true }
sender:
  url: "ws://127.0.0.1:9000/ws"
"#;
        let config = RelayConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.pin.mode(), FeedMode::Live);
        assert_eq!(config.pin.stream().odds_period(), Duration::from_secs(1));
        assert_eq!(config.pin.odds_format, OddsFormat::American);
        assert_eq!(
            config.pin.sport.enabled(),
            vec![Sport::Football, Sport::Tennis, Sport::Handball]
        );
    }

    #[test]
    fn test_config_validation() {
        let mut config = RelayConfig::from_yaml(MINIMAL).unwrap();

        config.port = "not-a-port".to_string();
        assert!(config.validate().is_err());
        config.port = "8080".to_string();

        config.channel_capacity = 0;
        assert!(config.validate().is_err());
        config.channel_capacity = 150;

        config.pin.live.odds_interval = 0;
        assert!(config.validate().is_err());
        config.pin.live.odds_interval = 2;

        config.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
        config.log_level = "debug".to_string();

        config.sender.url.clear();
        assert!(config.validate().is_err());
    }
}
