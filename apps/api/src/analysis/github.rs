//! GitHub analysis orchestrators: whole-profile and single-repository.

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::info;

use crate::analysis::charts::{self, ChartDatum};
use crate::analysis::prompts;
use crate::analysis::resume::into_typed;
use crate::errors::AppError;
use crate::github::{parse_repo_url, GitHubClient, Repo};
use crate::llm_client::GeminiClient;
use crate::normalize::schema::coerce_text;
use crate::normalize::{extract_payload, normalize, schema};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitHubProfileAnalysis {
    pub tech_stack: String,
    pub code_quality_insights: String,
    pub language_distribution: Vec<ChartDatum>,
    pub language_distribution_chart: String,
    pub repository_creation_activity: Vec<ChartDatum>,
    pub repository_creation_activity_chart: String,
    pub overall_suggestions: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitHubRepositoryAnalysis {
    pub purpose_feedback: String,
    pub documentation_quality_feedback: String,
    pub overall_suggestions: String,
}

/// Analyzes a user's GitHub profile. Chart data is computed locally from the
/// repository metadata before prompting and overwrites whatever the model
/// returns for the chart fields, so only the free-text insights depend on it.
pub async fn analyze_github_profile(
    llm: &GeminiClient,
    github: &GitHubClient,
    username: &str,
) -> Result<GitHubProfileAnalysis, AppError> {
    info!("Starting GitHub profile analysis for: {username}");

    let repos = github.user_repos(username).await?;

    let languages = charts::language_distribution(&repos);
    let activity = charts::creation_activity(&repos);

    let prompt = prompts::GITHUB_PROFILE_PROMPT
        .replace("{username}", username)
        .replace("{repo_count}", &repos.len().to_string())
        .replace("{repo_data}", &repo_summary_json(&repos))
        .replace("{language_chart}", &languages.chart)
        .replace("{activity_chart}", &activity.chart);

    let raw = llm.generate(&prompt).await?;
    let mut data = extract_payload(&raw)?;

    let analysis = GitHubProfileAnalysis {
        tech_stack: take_text(&mut data, "techStack")?,
        code_quality_insights: take_text(&mut data, "codeQualityInsights")?,
        overall_suggestions: take_text(&mut data, "overallSuggestions")?,
        language_distribution: languages.entries,
        language_distribution_chart: languages.chart,
        repository_creation_activity: activity.entries,
        repository_creation_activity_chart: activity.chart,
    };

    info!("GitHub profile analysis completed");
    Ok(analysis)
}

/// Analyzes a single repository's README for purpose and documentation
/// quality. No score field on this feature.
pub async fn analyze_github_repository(
    llm: &GeminiClient,
    github: &GitHubClient,
    repository_url: &str,
) -> Result<GitHubRepositoryAnalysis, AppError> {
    info!("Starting GitHub repository analysis for: {repository_url}");

    let (owner, repo) = parse_repo_url(repository_url)
        .ok_or_else(|| AppError::Validation("Invalid repository URL".to_string()))?;

    let readme = github.fetch_readme(&owner, &repo).await;

    let prompt = prompts::GITHUB_REPOSITORY_PROMPT
        .replace("{repository_url}", repository_url)
        .replace("{readme_content}", &readme);

    let raw = llm.generate(&prompt).await?;
    let data = normalize(&raw, &schema::REPO_ANALYSIS)?;

    info!("GitHub repository analysis completed");
    into_typed(data)
}

/// Pretty-printed repository metadata for the prompt, matching the fields the
/// analysis cares about. Missing descriptions become an explicit marker so
/// the model can comment on documentation habits.
fn repo_summary_json(repos: &[Repo]) -> String {
    let summaries: Vec<Value> = repos
        .iter()
        .map(|repo| {
            json!({
                "name": repo.name,
                "description": repo.description.as_deref().unwrap_or("No description"),
                "language": repo.language,
                "created_at": repo.created_at,
                "updated_at": repo.updated_at,
                "stars": repo.stargazers_count,
                "forks": repo.forks_count,
            })
        })
        .collect();
    serde_json::to_string_pretty(&summaries).unwrap_or_else(|_| "[]".to_string())
}

/// Removes a required free-text field from the extracted payload. The profile
/// feature has no repair schema, so a field the model dropped fails the
/// request rather than silently emptying the response.
fn take_text(data: &mut Map<String, Value>, key: &str) -> Result<String, AppError> {
    let value = data
        .remove(key)
        .filter(|v| !v.is_null())
        .ok_or_else(|| AppError::Internal(anyhow!("model response missing field '{key}'")))?;
    match coerce_text(value) {
        Value::String(s) => Ok(s),
        other => Ok(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(name: &str, language: Option<&str>) -> Repo {
        Repo {
            name: name.to_string(),
            description: None,
            language: language.map(str::to_string),
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-06-01T00:00:00Z".to_string(),
            stargazers_count: 3,
            forks_count: 1,
        }
    }

    #[test]
    fn test_repo_summary_marks_missing_descriptions() {
        let summary = repo_summary_json(&[repo("demo", Some("Rust"))]);
        assert!(summary.contains("\"No description\""));
        assert!(summary.contains("\"demo\""));
        assert!(summary.contains("\"stars\": 3"));
    }

    #[test]
    fn test_take_text_coerces_lists() {
        let mut data = Map::new();
        data.insert("techStack".to_string(), json!(["Rust", "Go"]));
        assert_eq!(take_text(&mut data, "techStack").unwrap(), "Rust, Go");
        assert!(data.is_empty());
    }

    #[test]
    fn test_take_text_missing_field_fails() {
        let mut data = Map::new();
        assert!(take_text(&mut data, "techStack").is_err());
        data.insert("techStack".to_string(), Value::Null);
        assert!(take_text(&mut data, "techStack").is_err());
    }

    #[test]
    fn test_profile_charts_never_come_from_the_model() {
        // Simulates the orchestrator's assembly with a model payload that
        // returned mangled chart text.
        let repos = vec![repo("a", Some("Rust")), repo("b", Some("Rust"))];
        let languages = charts::language_distribution(&repos);
        let activity = charts::creation_activity(&repos);

        let raw = r#"{"techStack": "Rust heavy", "codeQualityInsights": "tidy",
                      "languageDistributionChart": "pie MANGLED",
                      "overallSuggestions": "keep going"}"#;
        let mut data = extract_payload(raw).unwrap();

        let analysis = GitHubProfileAnalysis {
            tech_stack: take_text(&mut data, "techStack").unwrap(),
            code_quality_insights: take_text(&mut data, "codeQualityInsights").unwrap(),
            overall_suggestions: take_text(&mut data, "overallSuggestions").unwrap(),
            language_distribution: languages.entries.clone(),
            language_distribution_chart: languages.chart.clone(),
            repository_creation_activity: activity.entries.clone(),
            repository_creation_activity_chart: activity.chart.clone(),
        };

        assert_eq!(
            analysis.language_distribution_chart,
            "pie\n    \"Rust\" : 2"
        );
        assert_eq!(analysis.language_distribution.len(), 1);
        assert_eq!(analysis.tech_stack, "Rust heavy");
    }
}
