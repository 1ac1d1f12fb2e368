use std::sync::Arc;

use replyr_agent::EngagementRuntime;
use replyr_core::config::{AppConfig, ConfigError, LoadOptions};
use thiserror::Error;
use tracing::info;

pub struct Application {
    pub config: AppConfig,
    pub runtime: Arc<EngagementRuntime>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("pipeline wiring failed: {0}")]
    Wiring(#[source] anyhow::Error),
}

pub fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config)
}

pub fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(event_name = "system.bootstrap.start", "starting application bootstrap");

    let runtime = EngagementRuntime::from_config(&config).map_err(BootstrapError::Wiring)?;
    info!(
        event_name = "system.bootstrap.runtime_ready",
        crm_enabled = config.crm.enabled(),
        model = %config.llm.model,
        "comment pipeline wired"
    );

    Ok(Application { config, runtime: Arc::new(runtime) })
}
