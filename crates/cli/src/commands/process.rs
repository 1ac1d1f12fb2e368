use replyr_agent::EngagementRuntime;
use replyr_core::config::{AppConfig, LoadOptions};
use replyr_core::{ContactProfile, EngineError};

use super::CommandResult;

/// One-shot pipeline run against the live model (and CRM, if configured).
pub fn run(comment: &str, contact: Option<&str>) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure("process", "config_validation", error.to_string(), 2)
        }
    };

    let runtime = match EngagementRuntime::from_config(&config) {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure("process", "pipeline_wiring", format!("{error:#}"), 2)
        }
    };

    let tokio_runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(tokio_runtime) => tokio_runtime,
        Err(error) => {
            return CommandResult::failure(
                "process",
                "async_runtime",
                format!("failed to initialize async runtime: {error}"),
                1,
            )
        }
    };

    let contact_profile = contact.map(ContactProfile::new);
    match tokio_runtime.block_on(runtime.process(comment, contact_profile.as_ref())) {
        Ok(outcome) => {
            let message = format!(
                "classified as {} (crm_status: {})",
                outcome.category,
                outcome.crm_status.as_str()
            );
            let data = serde_json::json!({
                "reply": outcome.reply,
                "category": outcome.category,
                "crm_status": outcome.crm_status,
                "actions": outcome.actions,
            });
            CommandResult::success_with_data("process", message, data)
        }
        Err(error) => {
            let error_class = match &error {
                EngineError::InvalidInput(_) => "invalid_input",
                EngineError::Upstream { .. } => "upstream",
                EngineError::Parse(_) => "parse",
            };
            CommandResult::failure("process", error_class, error.to_string(), 1)
        }
    }
}
