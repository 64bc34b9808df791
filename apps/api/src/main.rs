mod analysis;
mod config;
mod errors;
mod extract;
mod github;
mod llm_client;
mod normalize;
mod routes;
mod scoring;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::github::GitHubClient;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; clients receive it explicitly.
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CareerAI Toolkit API v{}", env!("CARGO_PKG_VERSION"));

    let llm = GeminiClient::new(config.gemini_api_key.clone());
    if llm.is_configured() {
        info!("Gemini client initialized");
    } else {
        // Health checks must keep working, so start anyway.
        warn!("GEMINI_API_KEY not set - LLM endpoints will return 503");
    }

    let github = GitHubClient::new(config.github_token.clone());
    info!(
        "GitHub client initialized ({})",
        if config.github_token.is_some() {
            "authenticated"
        } else {
            "anonymous, low rate limits"
        }
    );

    let state = AppState { llm, github };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
