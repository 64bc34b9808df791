use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::github::GitHubError;
use crate::llm_client::LlmError;
use crate::normalize::NormalizeError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Policy: 4xx carry their message to the caller; 5xx log the detail and
/// return a generic message so no upstream/internal detail leaks.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("LLM service unavailable")]
    LlmUnavailable,

    #[error("Parse error: {0}")]
    Parse(#[from] NormalizeError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::RateLimited(msg) => {
                (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED", msg.clone())
            }
            AppError::Upstream(msg) => {
                tracing::error!("Upstream error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_ERROR",
                    msg.clone(),
                )
            }
            AppError::LlmUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "LLM_UNAVAILABLE",
                "LLM service unavailable. Please check your API key and try again.".to_string(),
            ),
            AppError::Parse(e) => {
                tracing::error!("Failed to parse LLM response: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PARSE_ERROR",
                    "Failed to parse LLM response".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Error processing your request".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        tracing::error!("LLM call failed: {e}");
        AppError::LlmUnavailable
    }
}

impl From<GitHubError> for AppError {
    fn from(e: GitHubError) -> Self {
        match e {
            GitHubError::UserNotFound(user) => {
                AppError::NotFound(format!("GitHub user '{user}' not found"))
            }
            GitHubError::RateLimited => AppError::RateLimited(
                "GitHub API rate limit exceeded. Please try again later.".to_string(),
            ),
            GitHubError::Http(e) => AppError::Upstream(format!("Failed to fetch GitHub data: {e}")),
            GitHubError::Status(code) => {
                AppError::Upstream(format!("GitHub API returned status {code}"))
            }
        }
    }
}
