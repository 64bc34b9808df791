/// LLM Client — the single point of entry for all Gemini API calls.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// All LLM interactions MUST go through this module.
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

pub mod schedule;

use schedule::RetrySchedule;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model identifiers in preference order, most to least capable. Every
/// attempt walks this list before pausing and starting the next attempt.
pub const MODEL_PREFERENCE: &[&str] = &[
    "gemini-2.5-flash",
    "gemini-2.5-pro",
    "gemini-1.5-flash",
    "gemini-1.5-pro",
    "gemini-pro",
];

const DEFAULT_MAX_ATTEMPTS: u32 = 3;
const CALL_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);
const ATTEMPT_PAUSE: std::time::Duration = std::time::Duration::from_secs(1);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Gemini API key not configured")]
    NotConfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("call timed out after {}s", CALL_TIMEOUT.as_secs())]
    Timeout,

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("model returned no usable text")]
    EmptyContent,

    #[error("all models exhausted after {attempts} attempts")]
    Exhausted { attempts: u32 },
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

impl GenerateResponse {
    /// Extracts the response text: the first candidate's first text part, or,
    /// failing that, the first non-empty text part anywhere in the candidate
    /// list. A 200 with no usable text is treated the same as an error.
    pub fn text(&self) -> Option<&str> {
        let primary = self
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .and_then(|p| p.text.as_deref())
            .filter(|t| !t.trim().is_empty());
        if primary.is_some() {
            return primary;
        }
        self.candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|c| c.parts.iter())
            .filter_map(|p| p.text.as_deref())
            .find(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// A generation-capable model reported by the Gemini models listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub supported_generation_methods: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ModelsList {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

/// The single Gemini client used by all analysis features.
/// Wraps the REST `generateContent` API with a model-fallback retry schedule.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    max_attempts: u32,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Generates text for `prompt`, trying each model in `MODEL_PREFERENCE`
    /// per attempt. Any single-call failure (timeout, HTTP error, empty text)
    /// is logged and the schedule advances; the first usable text wins. A 1s
    /// pause separates attempts. Exhaustion maps to a 503 at the HTTP layer.
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::NotConfigured)?;

        for call in RetrySchedule::new(self.max_attempts, MODEL_PREFERENCE) {
            if call.pause_before {
                warn!("All models failed on attempt {}", call.attempt - 1);
                tokio::time::sleep(ATTEMPT_PAUSE).await;
            }

            debug!(
                "Calling Gemini (model: {}, attempt: {})",
                call.model, call.attempt
            );

            match self.generate_once(api_key, call.model, prompt).await {
                Ok(text) => {
                    info!("Successful response from {}", call.model);
                    return Ok(text);
                }
                Err(e) => {
                    warn!(
                        "Model {} failed (attempt {}): {e}",
                        call.model, call.attempt
                    );
                }
            }
        }

        Err(LlmError::Exhausted {
            attempts: self.max_attempts,
        })
    }

    async fn generate_once(
        &self,
        api_key: &str,
        model: &str,
        prompt: &str,
    ) -> Result<String, LlmError> {
        let request_body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(format!("{GEMINI_API_BASE}/models/{model}:generateContent"))
            .header("x-goog-api-key", api_key)
            .timeout(CALL_TIMEOUT)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout
                } else {
                    LlmError::Http(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let generated: GenerateResponse = response.json().await?;
        generated
            .text()
            .map(str::to_owned)
            .ok_or(LlmError::EmptyContent)
    }

    /// Lists models that support `generateContent`.
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::NotConfigured)?;

        let response = self
            .client
            .get(format!("{GEMINI_API_BASE}/models"))
            .header("x-goog-api-key", api_key)
            .timeout(CALL_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let listing: ModelsList = response.json().await?;
        Ok(listing
            .models
            .into_iter()
            .filter(|m| {
                m.supported_generation_methods
                    .iter()
                    .any(|method| method == "generateContent")
            })
            .collect())
    }
}
