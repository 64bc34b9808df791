use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Built once in `main` and injected into clients — never read ambiently.
///
/// Both upstream credentials are optional: the service starts without them so
/// health checks keep working, and the affected endpoints degrade instead.
#[derive(Debug, Clone)]
pub struct Config {
    /// Gemini API key. `None` → LLM-dependent endpoints return 503.
    pub gemini_api_key: Option<String>,
    /// GitHub token. `None` → anonymous GitHub calls, subject to rate limits.
    pub github_token: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            github_token: optional_env("GITHUB_TOKEN"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads an env var, treating unset and empty as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
