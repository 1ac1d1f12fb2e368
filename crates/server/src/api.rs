//! Comment processing endpoint.
//!
//! One `POST /api/v1/comments/process` call maps directly onto one
//! pipeline invocation: bad input is the caller's fault (400), model or
//! CRM misbehavior is the upstream's (502). A CRM failure never reaches
//! this mapping; the runtime reports it inside a successful outcome.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use replyr_agent::EngagementRuntime;
use replyr_core::{Category, ContactProfile, CrmStatus, EngineError, PlatformActions};

#[derive(Clone)]
pub struct ApiState {
    runtime: Arc<EngagementRuntime>,
}

pub fn router(runtime: Arc<EngagementRuntime>) -> Router {
    Router::new()
        .route("/api/v1/comments/process", post(process_comment))
        .with_state(ApiState { runtime })
}

#[derive(Debug, Deserialize)]
pub struct ProcessRequest {
    pub comment: String,
    #[serde(default)]
    pub contact: Option<ContactProfile>,
}

#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub reply: String,
    pub category: Category,
    pub crm_status: CrmStatus,
    pub actions: PlatformActions,
    pub correlation_id: String,
    pub processed_at: String,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub correlation_id: String,
}

pub async fn process_comment(
    State(state): State<ApiState>,
    Json(request): Json<ProcessRequest>,
) -> Result<Json<ProcessResponse>, (StatusCode, Json<ApiError>)> {
    let correlation_id = Uuid::new_v4().to_string();

    match state.runtime.process(&request.comment, request.contact.as_ref()).await {
        Ok(outcome) => Ok(Json(ProcessResponse {
            reply: outcome.reply,
            category: outcome.category,
            crm_status: outcome.crm_status,
            actions: outcome.actions,
            correlation_id,
            processed_at: Utc::now().to_rfc3339(),
        })),
        Err(engine_error) => {
            let status = match &engine_error {
                EngineError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                EngineError::Upstream { .. } | EngineError::Parse(_) => StatusCode::BAD_GATEWAY,
            };
            error!(
                event_name = "api.comments.process_failed",
                correlation_id = %correlation_id,
                error = %engine_error,
                "comment processing failed"
            );
            Err((
                status,
                Json(ApiError {
                    error: engine_error.user_message().to_string(),
                    correlation_id,
                }),
            ))
        }
    }
}
