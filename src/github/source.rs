//! Listing of the source account repositories
use reqwest::header::{ACCEPT, USER_AGENT};
use urlencoding::encode;

use super::{repo::SourceRepository, GITHUB_API_HEADER, GITHUB_API_VERSION};
use crate::errors::{GitBackupError, GitBackupErrorKind};

/// Unauthenticated access to the GitHub API
#[derive(Debug, Clone)]
pub struct GithubSource {
    /// Base URL of the API
    api_url: String,

    /// User agent, required by GitHub
    user_agent: String,

    /// Reqwest client
    client: reqwest::Client,
}

impl GithubSource {
    /// Create a new source for the given API base URL
    pub fn new(api_url: &str, user_agent: &str) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            user_agent: user_agent.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// List the repositories of an account
    ///
    /// Only the first page returned by the API is read.
    /// # Errors
    /// Error if the request fails or doesn't return a success status
    pub async fn list_repositories(
        &self,
        owner: &str,
    ) -> Result<Vec<SourceRepository>, GitBackupError> {
        let url = format!("{}/users/{}/repos", self.api_url, encode(owner));
        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/vnd.github+json")
            .header(USER_AGENT, &self.user_agent)
            .header(GITHUB_API_HEADER, GITHUB_API_VERSION)
            .send()
            .await?;
        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await?;
            return Err(GitBackupError::new(GitBackupErrorKind::Http)
                .with_text(&format!("{status} for {url}: {text}")));
        }
        let text = response.text().await?;
        let repos: Vec<SourceRepository> = serde_json::from_str(&text)?;
        Ok(repos)
    }
}
