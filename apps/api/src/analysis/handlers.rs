//! Axum route handlers for the analysis features.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Deserialize;

use crate::analysis::github::{
    analyze_github_profile, analyze_github_repository, GitHubProfileAnalysis,
    GitHubRepositoryAnalysis,
};
use crate::analysis::linkedin::{optimize_linkedin_profile, LinkedInOptimization};
use crate::analysis::resume::{
    analyze_resume_comprehensive, analyze_resume_for_job, ComprehensiveAnalysis, JobAnalysis,
};
use crate::errors::AppError;
use crate::extract::extract_pdf_text;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitHubProfileRequest {
    pub github_username: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitHubRepositoryRequest {
    pub repository_url: String,
}

/// POST /api/resume-analyzer/job-description
///
/// Multipart: `resume` (PDF) + `jobDescription` (text).
pub async fn handle_resume_job_description(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<JobAnalysis>, AppError> {
    let upload = read_upload(multipart, "resume", Some("jobDescription")).await?;

    let job_description = upload
        .text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Validation("jobDescription cannot be empty".to_string()))?
        .to_string();

    let resume_text = extract_pdf_text(upload.file).await?;

    let analysis = analyze_resume_for_job(&state.llm, &resume_text, &job_description).await?;
    Ok(Json(analysis))
}

/// POST /api/resume-analyzer/comprehensive
///
/// Multipart: `resume` (PDF).
pub async fn handle_resume_comprehensive(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ComprehensiveAnalysis>, AppError> {
    let upload = read_upload(multipart, "resume", None).await?;
    let resume_text = extract_pdf_text(upload.file).await?;

    let analysis = analyze_resume_comprehensive(&state.llm, &resume_text).await?;
    Ok(Json(analysis))
}

/// POST /api/linkedin-optimizer
///
/// Multipart: `profile` (LinkedIn export PDF).
pub async fn handle_linkedin_optimizer(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<LinkedInOptimization>, AppError> {
    let upload = read_upload(multipart, "profile", None).await?;
    let profile_text = extract_pdf_text(upload.file).await?;

    let optimization = optimize_linkedin_profile(&state.llm, &profile_text).await?;
    Ok(Json(optimization))
}

/// POST /api/github-analyzer/profile
pub async fn handle_github_profile(
    State(state): State<AppState>,
    Json(request): Json<GitHubProfileRequest>,
) -> Result<Json<GitHubProfileAnalysis>, AppError> {
    let username = request.github_username.trim();
    if username.is_empty() {
        return Err(AppError::Validation(
            "githubUsername cannot be empty".to_string(),
        ));
    }

    let analysis = analyze_github_profile(&state.llm, &state.github, username).await?;
    Ok(Json(analysis))
}

/// POST /api/github-analyzer/repository
pub async fn handle_github_repository(
    State(state): State<AppState>,
    Json(request): Json<GitHubRepositoryRequest>,
) -> Result<Json<GitHubRepositoryAnalysis>, AppError> {
    let repository_url = request.repository_url.trim();
    if repository_url.is_empty() {
        return Err(AppError::Validation(
            "repositoryUrl cannot be empty".to_string(),
        ));
    }

    let analysis = analyze_github_repository(&state.llm, &state.github, repository_url).await?;
    Ok(Json(analysis))
}

struct Upload {
    file: Vec<u8>,
    text: Option<String>,
}

/// Drains a multipart body, collecting the named file field and, optionally,
/// one named text field. Anything unreadable or missing is a caller error.
async fn read_upload(
    mut multipart: Multipart,
    file_field: &str,
    text_field: Option<&str>,
) -> Result<Upload, AppError> {
    let mut file: Option<Vec<u8>> = None;
    let mut text: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == file_field {
            let data = field
                .bytes()
                .await
                .map_err(|_| AppError::Validation("Invalid file upload".to_string()))?;
            file = Some(data.to_vec());
        } else if text_field == Some(name.as_str()) {
            let value = field
                .text()
                .await
                .map_err(|_| AppError::Validation(format!("Invalid '{name}' field")))?;
            text = Some(value);
        }
    }

    let file = file.ok_or_else(|| {
        AppError::Validation(format!("Missing '{file_field}' file field"))
    })?;
    if file.is_empty() {
        return Err(AppError::Validation(format!(
            "Uploaded '{file_field}' file is empty"
        )));
    }

    Ok(Upload { file, text })
}
