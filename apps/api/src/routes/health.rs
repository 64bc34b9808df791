use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Reports liveness plus whether the Gemini key is configured, so a degraded
/// deployment is visible without hitting an LLM endpoint.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "geminiConfigured": state.llm.is_configured(),
    }))
}
