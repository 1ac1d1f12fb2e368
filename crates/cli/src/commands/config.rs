use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use replyr_core::config::{AppConfig, LoadOptions};
use secrecy::ExposeSecret;
use toml::Value;

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let source = |key_path: &str, env_key: &str| {
        field_source(key_path, env_key, config_file_doc.as_ref(), config_file_path.as_deref())
    };

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];

    let llm_api_key = config
        .llm
        .api_key
        .as_ref()
        .map(|key| redact_token(key.expose_secret()))
        .unwrap_or_else(|| "<unset>".to_string());
    lines.push(render_line("llm.api_key", &llm_api_key, source("llm.api_key", "REPLYR_LLM_API_KEY")));
    lines.push(render_line(
        "llm.base_url",
        &config.llm.base_url,
        source("llm.base_url", "REPLYR_LLM_BASE_URL"),
    ));
    lines.push(render_line("llm.model", &config.llm.model, source("llm.model", "REPLYR_LLM_MODEL")));
    lines.push(render_line(
        "llm.timeout_secs",
        &config.llm.timeout_secs.to_string(),
        source("llm.timeout_secs", "REPLYR_LLM_TIMEOUT_SECS"),
    ));

    let crm_api_key = config
        .crm
        .api_key
        .as_ref()
        .map(|key| redact_token(key.expose_secret()))
        .unwrap_or_else(|| "<unset>".to_string());
    lines.push(render_line("crm.api_key", &crm_api_key, source("crm.api_key", "REPLYR_CRM_API_KEY")));
    lines.push(render_line(
        "crm.base_url",
        &config.crm.base_url,
        source("crm.base_url", "REPLYR_CRM_BASE_URL"),
    ));
    lines.push(render_line(
        "crm.location_id",
        config.crm.location_id.as_deref().unwrap_or("<unset>"),
        source("crm.location_id", "REPLYR_CRM_LOCATION_ID"),
    ));
    lines.push(render_line(
        "crm.lead_workflow_id",
        config.crm.lead_workflow_id.as_deref().unwrap_or("<unset>"),
        source("crm.lead_workflow_id", "REPLYR_CRM_LEAD_WORKFLOW_ID"),
    ));
    lines.push(render_line(
        "crm.timeout_secs",
        &config.crm.timeout_secs.to_string(),
        source("crm.timeout_secs", "REPLYR_CRM_TIMEOUT_SECS"),
    ));

    lines.push(render_line(
        "server.bind_address",
        &config.server.bind_address,
        source("server.bind_address", "REPLYR_SERVER_BIND_ADDRESS"),
    ));
    lines.push(render_line(
        "server.port",
        &config.server.port.to_string(),
        source("server.port", "REPLYR_SERVER_PORT"),
    ));

    lines.push(render_line(
        "engagement.max_comment_chars",
        &config.engagement.max_comment_chars.to_string(),
        source("engagement.max_comment_chars", "REPLYR_ENGAGEMENT_MAX_COMMENT_CHARS"),
    ));

    lines.push(render_line(
        "logging.level",
        &config.logging.level,
        source("logging.level", "REPLYR_LOGGING_LEVEL"),
    ));
    lines.push(render_line(
        "logging.format",
        &format!("{:?}", config.logging.format),
        source("logging.format", "REPLYR_LOGGING_FORMAT"),
    ));

    lines.join("\n")
}

fn detect_config_path() -> Option<PathBuf> {
    let root = PathBuf::from("replyr.toml");
    if root.exists() {
        return Some(root);
    }

    let nested = PathBuf::from("config/replyr.toml");
    if nested.exists() {
        return Some(nested);
    }

    None
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_key: &str,
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if env::var(env_key).map(|value| !value.trim().is_empty()).unwrap_or(false) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}

fn redact_token(token: &str) -> String {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return "<empty>".to_string();
    }

    if let Some((prefix, _)) = trimmed.split_once('-') {
        return format!("{prefix}-***");
    }

    "<redacted>".to_string()
}
