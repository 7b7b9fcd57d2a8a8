//! CLI utilities for binaries
//!
//! Resolves the configuration file path from arguments, the environment or
//! the built-in default.

use std::path::PathBuf;

/// Type of configuration to load
#[derive(Debug, Clone)]
pub enum ConfigType {
    /// Relay configuration (configs/common.yml)
    Relay,
    /// Custom path
    Custom(String),
}

impl ConfigType {
    /// Get the default path for this config type
    pub fn default_path(&self) -> &str {
        match self {
            ConfigType::Relay => "configs/common.yml",
            ConfigType::Custom(path) => path,
        }
    }

    /// Get the environment variable name for this config type
    pub fn env_var_name(&self) -> &str {
        "CONFIG_PATH"
    }
}

/// Load configuration path from environment or use default
///
/// A [`ConfigType::Custom`] path always wins over the environment.
///
/// # Examples
/// ```
/// use odds_relay::bin_common::{load_config_from_env, ConfigType};
///
/// let path = load_config_from_env(ConfigType::Custom("relay.yml".to_string()));
/// assert_eq!(path.to_str(), Some("relay.yml"));
/// ```
pub fn load_config_from_env(config_type: ConfigType) -> PathBuf {
    if let ConfigType::Custom(path) = config_type {
        return path.into();
    }
    std::env::var(config_type.env_var_name())
        .unwrap_or_else(|_| config_type.default_path().to_string())
        .into()
}

/// Parse command line arguments for a binary
///
/// Returns a vector of arguments (excluding the program name)
pub fn parse_args() -> Vec<String> {
    std::env::args().skip(1).collect()
}

/// Config type selected by the first positional argument, if any
pub fn config_type_from_args(args: &[String]) -> ConfigType {
    match args.first() {
        Some(path) => ConfigType::Custom(path.clone()),
        None => ConfigType::Relay,
    }
}
