pub mod health;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::error;

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health::health_handler))
        .route("/models", get(models_handler))
        .route(
            "/api/resume-analyzer/job-description",
            post(handlers::handle_resume_job_description),
        )
        .route(
            "/api/resume-analyzer/comprehensive",
            post(handlers::handle_resume_comprehensive),
        )
        .route(
            "/api/linkedin-optimizer",
            post(handlers::handle_linkedin_optimizer),
        )
        .route(
            "/api/github-analyzer/profile",
            post(handlers::handle_github_profile),
        )
        .route(
            "/api/github-analyzer/repository",
            post(handlers::handle_github_repository),
        )
        .with_state(state)
}

/// GET /
/// Service banner.
async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "CareerAI Toolkit API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
    }))
}

/// GET /models
/// Lists generation-capable models. Always 200: a missing key or an upstream
/// failure degrades to an error payload rather than failing the request.
async fn models_handler(State(state): State<AppState>) -> Json<Value> {
    if !state.llm.is_configured() {
        return Json(json!({ "error": "Gemini API key not configured" }));
    }

    match state.llm.list_models().await {
        Ok(models) => Json(json!({ "availableModels": models })),
        Err(e) => {
            error!("Error listing models: {e}");
            Json(json!({ "error": "Could not fetch available models" }))
        }
    }
}
