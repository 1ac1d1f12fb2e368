use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub llm: LlmConfig,
    pub crm: CrmConfig,
    pub server: ServerConfig,
    pub engagement: EngagementConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct LlmConfig {
    pub api_key: Option<SecretString>,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct CrmConfig {
    /// Absence of the key disables every CRM call.
    pub api_key: Option<SecretString>,
    pub base_url: String,
    pub location_id: Option<String>,
    pub lead_workflow_id: Option<String>,
    pub timeout_secs: u64,
}

impl CrmConfig {
    pub fn enabled(&self) -> bool {
        self.api_key
            .as_ref()
            .map(|key| !key.expose_secret().trim().is_empty())
            .unwrap_or(false)
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
}

#[derive(Clone, Debug)]
pub struct EngagementConfig {
    /// Longest comment accepted by the pipeline, in characters.
    pub max_comment_chars: usize,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub llm_api_key: Option<String>,
    pub llm_base_url: Option<String>,
    pub llm_model: Option<String>,
    pub crm_api_key: Option<String>,
    pub crm_base_url: Option<String>,
    pub crm_lead_workflow_id: Option<String>,
    pub max_comment_chars: Option<usize>,
    pub log_level: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            llm: LlmConfig {
                api_key: None,
                base_url: "https://api.openai.com/v1".to_string(),
                model: "gpt-4o-mini".to_string(),
                timeout_secs: 30,
            },
            crm: CrmConfig {
                api_key: None,
                base_url: "https://rest.gohighlevel.com/v1".to_string(),
                location_id: None,
                lead_workflow_id: None,
                timeout_secs: 15,
            },
            server: ServerConfig { bind_address: "127.0.0.1".to_string(), port: 8080 },
            engagement: EngagementConfig { max_comment_chars: 2000 },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

fn secret_value(value: String) -> SecretString {
    value.into()
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("replyr.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(llm) = patch.llm {
            if let Some(llm_api_key_value) = llm.api_key {
                self.llm.api_key = Some(secret_value(llm_api_key_value));
            }
            if let Some(base_url) = llm.base_url {
                self.llm.base_url = base_url;
            }
            if let Some(model) = llm.model {
                self.llm.model = model;
            }
            if let Some(timeout_secs) = llm.timeout_secs {
                self.llm.timeout_secs = timeout_secs;
            }
        }

        if let Some(crm) = patch.crm {
            if let Some(crm_api_key_value) = crm.api_key {
                self.crm.api_key = Some(secret_value(crm_api_key_value));
            }
            if let Some(base_url) = crm.base_url {
                self.crm.base_url = base_url;
            }
            if let Some(location_id) = crm.location_id {
                self.crm.location_id = Some(location_id);
            }
            if let Some(lead_workflow_id) = crm.lead_workflow_id {
                self.crm.lead_workflow_id = Some(lead_workflow_id);
            }
            if let Some(timeout_secs) = crm.timeout_secs {
                self.crm.timeout_secs = timeout_secs;
            }
        }

        if let Some(server) = patch.server {
            if let Some(bind_address) = server.bind_address {
                self.server.bind_address = bind_address;
            }
            if let Some(port) = server.port {
                self.server.port = port;
            }
        }

        if let Some(engagement) = patch.engagement {
            if let Some(max_comment_chars) = engagement.max_comment_chars {
                self.engagement.max_comment_chars = max_comment_chars;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("REPLYR_LLM_API_KEY") {
            self.llm.api_key = Some(secret_value(value));
        }
        if let Some(value) = read_env("REPLYR_LLM_BASE_URL") {
            self.llm.base_url = value;
        }
        if let Some(value) = read_env("REPLYR_LLM_MODEL") {
            self.llm.model = value;
        }
        if let Some(value) = read_env("REPLYR_LLM_TIMEOUT_SECS") {
            self.llm.timeout_secs = parse_u64("REPLYR_LLM_TIMEOUT_SECS", &value)?;
        }

        if let Some(value) = read_env("REPLYR_CRM_API_KEY") {
            self.crm.api_key = Some(secret_value(value));
        }
        if let Some(value) = read_env("REPLYR_CRM_BASE_URL") {
            self.crm.base_url = value;
        }
        if let Some(value) = read_env("REPLYR_CRM_LOCATION_ID") {
            self.crm.location_id = Some(value);
        }
        if let Some(value) = read_env("REPLYR_CRM_LEAD_WORKFLOW_ID") {
            self.crm.lead_workflow_id = Some(value);
        }
        if let Some(value) = read_env("REPLYR_CRM_TIMEOUT_SECS") {
            self.crm.timeout_secs = parse_u64("REPLYR_CRM_TIMEOUT_SECS", &value)?;
        }

        if let Some(value) = read_env("REPLYR_SERVER_BIND_ADDRESS") {
            self.server.bind_address = value;
        }
        if let Some(value) = read_env("REPLYR_SERVER_PORT") {
            self.server.port = parse_u16("REPLYR_SERVER_PORT", &value)?;
        }

        if let Some(value) = read_env("REPLYR_ENGAGEMENT_MAX_COMMENT_CHARS") {
            self.engagement.max_comment_chars =
                parse_usize("REPLYR_ENGAGEMENT_MAX_COMMENT_CHARS", &value)?;
        }

        let log_level = read_env("REPLYR_LOGGING_LEVEL").or_else(|| read_env("REPLYR_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("REPLYR_LOGGING_FORMAT").or_else(|| read_env("REPLYR_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(llm_api_key) = overrides.llm_api_key {
            self.llm.api_key = Some(secret_value(llm_api_key));
        }
        if let Some(llm_base_url) = overrides.llm_base_url {
            self.llm.base_url = llm_base_url;
        }
        if let Some(llm_model) = overrides.llm_model {
            self.llm.model = llm_model;
        }
        if let Some(crm_api_key) = overrides.crm_api_key {
            self.crm.api_key = Some(secret_value(crm_api_key));
        }
        if let Some(crm_base_url) = overrides.crm_base_url {
            self.crm.base_url = crm_base_url;
        }
        if let Some(crm_lead_workflow_id) = overrides.crm_lead_workflow_id {
            self.crm.lead_workflow_id = Some(crm_lead_workflow_id);
        }
        if let Some(max_comment_chars) = overrides.max_comment_chars {
            self.engagement.max_comment_chars = max_comment_chars;
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_llm(&self.llm)?;
        validate_crm(&self.crm)?;
        validate_server(&self.server)?;
        validate_engagement(&self.engagement)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("replyr.toml"), PathBuf::from("config/replyr.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_llm(llm: &LlmConfig) -> Result<(), ConfigError> {
    let missing =
        llm.api_key.as_ref().map(|value| value.expose_secret().trim().is_empty()).unwrap_or(true);
    if missing {
        return Err(ConfigError::Validation(
            "llm.api_key is required. Set it in replyr.toml or via REPLYR_LLM_API_KEY".to_string(),
        ));
    }

    if !llm.base_url.starts_with("http://") && !llm.base_url.starts_with("https://") {
        return Err(ConfigError::Validation(
            "llm.base_url must start with http:// or https://".to_string(),
        ));
    }

    if llm.model.trim().is_empty() {
        return Err(ConfigError::Validation("llm.model must not be empty".to_string()));
    }

    if llm.timeout_secs == 0 || llm.timeout_secs > 300 {
        return Err(ConfigError::Validation(
            "llm.timeout_secs must be in range 1..=300".to_string(),
        ));
    }

    Ok(())
}

fn validate_crm(crm: &CrmConfig) -> Result<(), ConfigError> {
    if !crm.base_url.starts_with("http://") && !crm.base_url.starts_with("https://") {
        return Err(ConfigError::Validation(
            "crm.base_url must start with http:// or https://".to_string(),
        ));
    }

    if crm.timeout_secs == 0 || crm.timeout_secs > 300 {
        return Err(ConfigError::Validation(
            "crm.timeout_secs must be in range 1..=300".to_string(),
        ));
    }

    if !crm.enabled() {
        if crm.location_id.is_some() {
            return Err(ConfigError::Validation(
                "crm.location_id is set but crm.api_key is missing".to_string(),
            ));
        }
        if crm.lead_workflow_id.is_some() {
            return Err(ConfigError::Validation(
                "crm.lead_workflow_id is set but crm.api_key is missing".to_string(),
            ));
        }
    }

    Ok(())
}

fn validate_server(server: &ServerConfig) -> Result<(), ConfigError> {
    if server.port == 0 {
        return Err(ConfigError::Validation("server.port must be greater than zero".to_string()));
    }

    Ok(())
}

fn validate_engagement(engagement: &EngagementConfig) -> Result<(), ConfigError> {
    if engagement.max_comment_chars == 0 || engagement.max_comment_chars > 20_000 {
        return Err(ConfigError::Validation(
            "engagement.max_comment_chars must be in range 1..=20000".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u16(key: &str, value: &str) -> Result<u16, ConfigError> {
    value.parse::<u16>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_usize(key: &str, value: &str) -> Result<usize, ConfigError> {
    value.parse::<usize>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    llm: Option<LlmPatch>,
    crm: Option<CrmPatch>,
    server: Option<ServerPatch>,
    engagement: Option<EngagementPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct LlmPatch {
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct CrmPatch {
    api_key: Option<String>,
    base_url: Option<String>,
    location_id: Option<String>,
    lead_workflow_id: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerPatch {
    bind_address: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
struct EngagementPatch {
    max_comment_chars: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::io;
    use std::sync::{Mutex, OnceLock};

    use secrecy::ExposeSecret;
    use tempfile::TempDir;

    use super::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn env_lock() -> &'static Mutex<()> {
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    fn clear_vars(vars: &[&str]) {
        for var in vars {
            env::remove_var(var);
        }
    }

    fn ensure(condition: bool, message: &'static str) -> Result<(), String> {
        if condition {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }

    #[test]
    fn file_load_supports_env_interpolation() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("TEST_LLM_API_KEY", "sk-from-env");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("replyr.toml");
            fs::write(
                &path,
                r#"
[llm]
api_key = "${TEST_LLM_API_KEY}"
"#,
            )
            .map_err(|err| err.to_string())?;

            let config =
                AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
                    .map_err(|err| format!("config load failed: {err}"))?;

            let api_key = config
                .llm
                .api_key
                .as_ref()
                .map(|key| key.expose_secret().to_string())
                .unwrap_or_default();
            ensure(api_key == "sk-from-env", "llm api key should be loaded from environment")
        })();

        clear_vars(&["TEST_LLM_API_KEY"]);
        result
    }

    #[test]
    fn logging_env_aliases_are_supported() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("REPLYR_LLM_API_KEY", "sk-test");
        env::set_var("REPLYR_LOG_LEVEL", "warn");
        env::set_var("REPLYR_LOG_FORMAT", "pretty");

        let result = (|| -> Result<(), String> {
            let config = AppConfig::load(LoadOptions::default())
                .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.logging.level == "warn", "warn log level should be set from env var")?;
            ensure(
                matches!(config.logging.format, LogFormat::Pretty),
                "pretty logging format should be set from env var",
            )?;
            Ok(())
        })();

        clear_vars(&["REPLYR_LLM_API_KEY", "REPLYR_LOG_LEVEL", "REPLYR_LOG_FORMAT"]);
        result
    }

    #[test]
    fn precedence_defaults_file_env_overrides() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("REPLYR_LLM_API_KEY", "sk-from-env");
        env::set_var("REPLYR_LLM_MODEL", "model-from-env");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("replyr.toml");
            fs::write(
                &path,
                r#"
[llm]
api_key = "sk-from-file"
model = "model-from-file"

[logging]
level = "warn"
"#,
            )
            .map_err(|err| err.to_string())?;

            let config = AppConfig::load(LoadOptions {
                config_path: Some(path),
                overrides: ConfigOverrides {
                    llm_model: Some("model-from-override".to_string()),
                    log_level: Some("debug".to_string()),
                    ..ConfigOverrides::default()
                },
                ..LoadOptions::default()
            })
            .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.llm.model == "model-from-override", "override model should win")?;
            ensure(config.logging.level == "debug", "overridden log level should be debug")?;
            let api_key = config
                .llm
                .api_key
                .as_ref()
                .map(|key| key.expose_secret().to_string())
                .unwrap_or_default();
            ensure(api_key == "sk-from-env", "env api key should win over file and defaults")
        })();

        clear_vars(&["REPLYR_LLM_API_KEY", "REPLYR_LLM_MODEL"]);
        result
    }

    #[test]
    fn validation_fails_fast_with_actionable_error() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let result = (|| -> Result<(), String> {
            let error = match AppConfig::load(LoadOptions::default()) {
                Ok(_) => {
                    return Err("expected validation failure but config load succeeded".to_string())
                }
                Err(error) => error,
            };
            let has_message = matches!(
                error,
                ConfigError::Validation(ref message) if message.contains("llm.api_key")
            );
            ensure(has_message, "validation failure should mention llm.api_key")
        })();

        result
    }

    #[test]
    fn crm_workflow_without_credential_is_rejected() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("REPLYR_LLM_API_KEY", "sk-test");
        env::set_var("REPLYR_CRM_LEAD_WORKFLOW_ID", "wf-123");

        let result = (|| -> Result<(), String> {
            let error = match AppConfig::load(LoadOptions::default()) {
                Ok(_) => return Err("expected validation failure".to_string()),
                Err(error) => error,
            };
            let has_message = matches!(
                error,
                ConfigError::Validation(ref message) if message.contains("crm.lead_workflow_id")
            );
            ensure(has_message, "validation failure should mention crm.lead_workflow_id")
        })();

        clear_vars(&["REPLYR_LLM_API_KEY", "REPLYR_CRM_LEAD_WORKFLOW_ID"]);
        result
    }

    #[test]
    fn secret_values_are_not_leaked_by_debug() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("REPLYR_LLM_API_KEY", "sk-secret-value");
        env::set_var("REPLYR_CRM_API_KEY", "ghl-secret-value");

        let result = (|| -> Result<(), String> {
            let config = AppConfig::load(LoadOptions::default())
                .map_err(|err| format!("config load failed: {err}"))?;
            let debug = format!("{config:?}");

            ensure(!debug.contains("sk-secret-value"), "debug output should not contain llm key")?;
            ensure(!debug.contains("ghl-secret-value"), "debug output should not contain crm key")?;
            ensure(config.crm.enabled(), "crm should be enabled when a key is present")?;
            ensure(
                matches!(config.logging.format, LogFormat::Compact),
                "default logging format should be compact",
            )?;
            Ok(())
        })();

        clear_vars(&["REPLYR_LLM_API_KEY", "REPLYR_CRM_API_KEY"]);
        result
    }
}
