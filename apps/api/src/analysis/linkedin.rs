//! LinkedIn profile optimization orchestrator.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::analysis::prompts;
use crate::analysis::resume::into_typed;
use crate::errors::AppError;
use crate::llm_client::GeminiClient;
use crate::normalize::{normalize, schema};
use crate::scoring::rescale;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedInOptimization {
    pub profile_strength_score: f64,
    pub headline_feedback: String,
    pub summary_feedback: String,
    pub experience_feedback: String,
    pub skills_feedback: String,
    pub activity_feedback: String,
    pub keyword_suggestions: String,
    pub overall_suggestions: String,
}

/// Evaluates an exported LinkedIn profile. The strength score is rescaled,
/// never blended — there is no job description to match against.
pub async fn optimize_linkedin_profile(
    llm: &GeminiClient,
    profile_text: &str,
) -> Result<LinkedInOptimization, AppError> {
    info!("Starting LinkedIn profile optimization");

    let prompt = prompts::LINKEDIN_OPTIMIZER_PROMPT.replace("{profile_text}", profile_text);

    let raw = llm.generate(&prompt).await?;
    let mut data = normalize(&raw, &schema::LINKEDIN_OPTIMIZATION)?;

    let rescaled = rescale(data.get("profileStrengthScore").unwrap_or(&Value::Null));
    data.insert("profileStrengthScore".to_string(), json!(rescaled));

    info!("LinkedIn profile optimization completed");
    into_typed(data)
}
