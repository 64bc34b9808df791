use crate::github::GitHubClient;
use crate::llm_client::GeminiClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is request-safe to clone: both clients wrap a reqwest
/// connection pool and no mutable state crosses requests.
#[derive(Clone)]
pub struct AppState {
    pub llm: GeminiClient,
    pub github: GitHubClient,
}
