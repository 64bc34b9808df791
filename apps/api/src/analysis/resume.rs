//! Resume analysis orchestrators: job-description-matched and comprehensive.

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::analysis::prompts;
use crate::errors::AppError;
use crate::llm_client::GeminiClient;
use crate::normalize::{normalize, schema};
use crate::scoring::{blend, keyword_match_score, rescale};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobAnalysis {
    pub score: f64,
    pub summary_feedback: String,
    pub skills_feedback: String,
    pub experience_feedback: String,
    pub education_feedback: String,
    pub project_feedback: String,
    pub job_role_suggestions: String,
    pub overall_suggestions: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComprehensiveAnalysis {
    pub score: f64,
    pub comprehensive_analysis: String,
    pub summary_feedback: String,
    pub skills_feedback: String,
    pub experience_feedback: String,
    pub education_feedback: String,
    pub project_feedback: String,
    pub job_role_suggestions: String,
    pub overall_suggestions: String,
}

/// Analyzes a resume against a job description. The exposed score blends the
/// rescaled model score with an independent keyword-overlap signal
/// (0.85 / 0.15).
pub async fn analyze_resume_for_job(
    llm: &GeminiClient,
    resume_text: &str,
    job_description: &str,
) -> Result<JobAnalysis, AppError> {
    info!("Starting resume analysis with job description");

    let keyword_score = keyword_match_score(resume_text, job_description);

    let prompt = prompts::JOB_ANALYSIS_PROMPT
        .replace("{resume_text}", resume_text)
        .replace("{job_description}", job_description);

    let raw = llm.generate(&prompt).await?;
    let mut data = normalize(&raw, &schema::JOB_ANALYSIS)?;

    let base = rescale(data.get("score").unwrap_or(&Value::Null));
    data.insert("score".to_string(), json!(blend(base, keyword_score)));

    info!("Resume analysis completed");
    into_typed(data)
}

/// Analyzes a resume without a job description. Score is rescaled only.
pub async fn analyze_resume_comprehensive(
    llm: &GeminiClient,
    resume_text: &str,
) -> Result<ComprehensiveAnalysis, AppError> {
    info!("Starting comprehensive resume analysis");

    let prompt = prompts::COMPREHENSIVE_ANALYSIS_PROMPT.replace("{resume_text}", resume_text);

    let raw = llm.generate(&prompt).await?;
    let mut data = normalize(&raw, &schema::COMPREHENSIVE_ANALYSIS)?;

    let rescaled = rescale(data.get("score").unwrap_or(&Value::Null));
    data.insert("score".to_string(), json!(rescaled));

    info!("Comprehensive resume analysis completed");
    into_typed(data)
}

/// Converts a normalized payload into a typed response. The normalizer
/// guarantees the schema keys exist, so failure here means a coercion bug.
pub(super) fn into_typed<T: serde::de::DeserializeOwned>(
    data: serde_json::Map<String, Value>,
) -> Result<T, AppError> {
    serde_json::from_value(Value::Object(data))
        .map_err(|e| AppError::Internal(anyhow!("normalized payload did not fit response: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::schema::JOB_ANALYSIS;

    // The orchestration around the LLM call is pure; these tests exercise the
    // normalize → rescale → blend → typed path on canned model output.

    fn typed_job(raw: &str, jd_keyword_score: f64) -> JobAnalysis {
        let mut data = normalize(raw, &JOB_ANALYSIS).unwrap();
        let base = rescale(data.get("score").unwrap());
        data.insert("score".to_string(), json!(blend(base, jd_keyword_score)));
        into_typed(data).unwrap()
    }

    #[test]
    fn test_canned_output_produces_blended_score() {
        // raw 85 → rescaled 80; blend with keyword 50 → 75.5
        let analysis = typed_job(
            "```json\n{\"score\": 85, \"summaryFeedback\": \"solid\"}\n```",
            50.0,
        );
        assert_eq!(analysis.score, 75.5);
        assert_eq!(analysis.summary_feedback, "solid");
        assert_eq!(analysis.skills_feedback, "");
    }

    #[test]
    fn test_extra_model_keys_are_dropped_by_typing() {
        let analysis = typed_job(r#"{"score": 50, "hallucinatedField": "x"}"#, 0.0);
        assert_eq!(analysis.score, 42.5); // 50*0.85
    }

    #[test]
    fn test_comprehensive_score_is_rescaled_only() {
        let mut data = normalize(
            r#"{"score": 92, "comprehensiveAnalysis": "strong"}"#,
            &schema::COMPREHENSIVE_ANALYSIS,
        )
        .unwrap();
        let rescaled = rescale(data.get("score").unwrap());
        data.insert("score".to_string(), json!(rescaled));
        let analysis: ComprehensiveAnalysis = into_typed(data).unwrap();
        assert_eq!(analysis.score, 92.0);
        assert_eq!(analysis.comprehensive_analysis, "strong");
    }
}
