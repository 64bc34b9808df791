//! GitHub Data Fetcher — repository listings via the REST API and README
//! content via raw-content hosts.

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

const GITHUB_API_BASE: &str = "https://api.github.com";
const RAW_CONTENT_BASE: &str = "https://raw.githubusercontent.com";
const GITHUB_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// README lookups probe these file name / branch combinations in order.
const README_NAMES: &[&str] = &["README.md", "readme.md", "README", "readme"];
const README_BRANCHES: &[&str] = &["main", "master"];

#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("GitHub user '{0}' not found")]
    UserNotFound(String),

    #[error("GitHub API rate limit exceeded")]
    RateLimited,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitHub API returned status {0}")]
    Status(u16),
}

/// The subset of repository metadata the analysis features consume.
#[derive(Debug, Clone, Deserialize)]
pub struct Repo {
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
}

/// Client for the GitHub REST API. A token is optional; without one, calls
/// are anonymous and subject to much lower rate limits.
#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(token: Option<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(GITHUB_TIMEOUT)
                .user_agent(concat!("careerai-api/", env!("CARGO_PKG_VERSION")))
                .build()
                .expect("failed to build GitHub HTTP client"),
            token,
        }
    }

    /// Lists a user's public repositories.
    pub async fn user_repos(&self, username: &str) -> Result<Vec<Repo>, GitHubError> {
        info!("Fetching GitHub repos for user: {username}");

        let mut request = self
            .client
            .get(format!("{GITHUB_API_BASE}/users/{username}/repos"))
            .header("Accept", "application/vnd.github.v3+json");
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("token {token}"));
        }

        let response = request.send().await?;
        let status = response.status();

        if status.as_u16() == 403 {
            let body = response.text().await.unwrap_or_default();
            if body.to_lowercase().contains("rate limit") {
                warn!("GitHub API rate limit reached");
                return Err(GitHubError::RateLimited);
            }
            return Err(GitHubError::Status(403));
        }
        if status.as_u16() == 404 {
            return Err(GitHubError::UserNotFound(username.to_string()));
        }
        if !status.is_success() {
            return Err(GitHubError::Status(status.as_u16()));
        }

        let repos: Vec<Repo> = response.json().await?;
        info!("Fetched {} repositories", repos.len());
        Ok(repos)
    }

    /// Fetches README content by probing name × branch combinations against
    /// the raw-content host. A timeout on one combination only skips that
    /// combination. Nothing found is not an error: a fixed placeholder comes
    /// back so the analysis can still comment on the absence.
    pub async fn fetch_readme(&self, owner: &str, repo: &str) -> String {
        info!("Fetching README for {owner}/{repo}");

        for name in README_NAMES {
            for branch in README_BRANCHES {
                let url = format!("{RAW_CONTENT_BASE}/{owner}/{repo}/{branch}/{name}");
                match self.client.get(&url).send().await {
                    Ok(response) if response.status().is_success() => {
                        if let Ok(content) = response.text().await {
                            info!("Found README: {name} on {branch}");
                            return content;
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        debug!("README probe {name}@{branch} failed: {e}");
                    }
                }
            }
        }

        info!("No README file found");
        "No README file found in the repository.".to_string()
    }
}

/// Pulls `(owner, repo)` out of a repository URL or `owner/repo` shorthand:
/// the last two path segments after trimming a trailing slash.
pub fn parse_repo_url(url: &str) -> Option<(String, String)> {
    let parts: Vec<&str> = url.trim_end_matches('/').split('/').collect();
    if parts.len() < 2 {
        return None;
    }
    let owner = parts[parts.len() - 2];
    let repo = parts[parts.len() - 1];
    if owner.is_empty() || repo.is_empty() {
        return None;
    }
    Some((owner.to_string(), repo.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_repository_url() {
        assert_eq!(
            parse_repo_url("https://github.com/rust-lang/cargo"),
            Some(("rust-lang".to_string(), "cargo".to_string()))
        );
    }

    #[test]
    fn test_parse_url_with_trailing_slash() {
        assert_eq!(
            parse_repo_url("https://github.com/rust-lang/cargo/"),
            Some(("rust-lang".to_string(), "cargo".to_string()))
        );
    }

    #[test]
    fn test_parse_owner_repo_shorthand() {
        assert_eq!(
            parse_repo_url("rust-lang/cargo"),
            Some(("rust-lang".to_string(), "cargo".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_single_segment() {
        assert_eq!(parse_repo_url("cargo"), None);
        assert_eq!(parse_repo_url(""), None);
    }

    #[test]
    fn test_parse_rejects_empty_segments() {
        assert_eq!(parse_repo_url("owner//"), None);
    }

    #[test]
    fn test_repo_deserializes_from_api_shape() {
        let repo: Repo = serde_json::from_str(
            r#"{
                "name": "demo",
                "description": null,
                "language": "Rust",
                "created_at": "2023-04-01T12:00:00Z",
                "updated_at": "2024-01-01T00:00:00Z",
                "stargazers_count": 7,
                "forks_count": 2,
                "html_url": "ignored"
            }"#,
        )
        .unwrap();
        assert_eq!(repo.name, "demo");
        assert_eq!(repo.description, None);
        assert_eq!(repo.language.as_deref(), Some("Rust"));
        assert_eq!(repo.stargazers_count, 7);
    }
}
