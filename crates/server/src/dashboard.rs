//! Operator test page.
//!
//! A single tera-rendered page with a comment form that posts to the
//! process endpoint. Meant for manual smoke-testing replies and category
//! labels, not for end users.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Html, routing::get, Router};
use tera::{Context, Tera};
use tracing::warn;

#[derive(Clone)]
pub struct DashboardState {
    templates: Arc<Tera>,
    model: String,
    crm_enabled: bool,
}

fn init_templates() -> Arc<Tera> {
    let mut tera = Tera::default();
    if let Err(error) =
        tera.add_raw_template("index.html", include_str!("../../../templates/dashboard/index.html"))
    {
        warn!(error = %error, "failed to register dashboard template");
    }
    Arc::new(tera)
}

pub fn router(model: String, crm_enabled: bool) -> Router {
    Router::new()
        .route("/", get(index))
        .with_state(DashboardState { templates: init_templates(), model, crm_enabled })
}

async fn index(State(state): State<DashboardState>) -> Result<Html<String>, StatusCode> {
    let mut context = Context::new();
    context.insert("model", &state.model);
    context.insert("crm_enabled", &state.crm_enabled);

    let html = state.templates.render("index.html", &context).map_err(|error| {
        warn!(error = %error, "failed to render dashboard page");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Html(html))
}
