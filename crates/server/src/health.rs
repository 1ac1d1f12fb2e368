use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use replyr_core::config::AppConfig;
use serde::Serialize;

#[derive(Clone)]
pub struct HealthState {
    model: String,
    crm_enabled: bool,
}

impl HealthState {
    pub fn from_config(config: &AppConfig) -> Self {
        Self { model: config.llm.model.clone(), crm_enabled: config.crm.enabled() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: HealthCheck,
    pub model: HealthCheck,
    pub crm: HealthCheck,
    pub checked_at: String,
}

pub fn router(state: HealthState) -> Router {
    Router::new().route("/health", get(health)).with_state(state)
}

/// Readiness report. Configuration is validated at bootstrap, so the
/// checks here are static; the endpoint never dials the upstream APIs.
pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let payload = HealthResponse {
        status: "ready",
        service: HealthCheck {
            status: "ready",
            detail: "replyr-server runtime initialized".to_string(),
        },
        model: HealthCheck {
            status: "ready",
            detail: format!("model `{}` configured", state.model),
        },
        crm: HealthCheck {
            status: "ready",
            detail: if state.crm_enabled {
                "crm sync connected".to_string()
            } else {
                "crm sync disabled (no credential configured)".to_string()
            },
        },
        checked_at: Utc::now().to_rfc3339(),
    };

    (StatusCode::OK, Json(payload))
}
