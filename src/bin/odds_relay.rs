//! Odds relay
//!
//! Usage: `odds_relay [config.yml]`. Without an argument the path comes from
//! `CONFIG_PATH`, falling back to `configs/common.yml`.

use anyhow::{Context, Result};
use odds_relay::bin_common::{
    config_type_from_args, load_config_from_env, parse_args, BinaryRunner, RunConfig,
};
use relay::{init_tracing, RelayApp, RelayConfig};

struct RelayRunner {
    app: RelayApp,
    run_config: RunConfig,
}

impl RelayRunner {
    fn new(config: RelayConfig) -> Self {
        let stream = config.pin.stream();
        let sports: Vec<String> = config
            .pin
            .sport
            .enabled()
            .iter()
            .map(ToString::to_string)
            .collect();

        let run_config = RunConfig::new("Odds Relay")
            .with_detail(format!("Mode: {:?}", config.pin.mode()))
            .with_detail(format!("Sports: {}", sports.join(", ")))
            .with_detail(format!(
                "Polling: events every {}s, odds every {}s",
                stream.events_interval, stream.odds_interval
            ))
            .with_detail(format!("Listening on port {}", config.port));

        Self {
            app: RelayApp::new(config),
            run_config,
        }
    }
}

impl BinaryRunner for RelayRunner {
    async fn run(&mut self) -> Result<()> {
        self.app.run().await?;
        Ok(())
    }

    fn config(&self) -> &RunConfig {
        &self.run_config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load config first (before logging is initialized)
    let config_type = config_type_from_args(&parse_args());
    let config_path = load_config_from_env(config_type);
    let config = RelayConfig::load(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    init_tracing(&config.log_level);
    config.log();

    let mut runner = RelayRunner::new(config);
    runner.execute().await
}
