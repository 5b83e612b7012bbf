use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::event::Repository;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct GitHubClient {
    client: reqwest::Client,
    token: String,
    api_base: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub html_url: String,
}

impl GitHubClient {
    pub fn new(token: impl Into<String>, api_base: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("depreport/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            token: token.into(),
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Post `body` as a new comment on a pull request (issues API).
    #[instrument(skip(self, body), fields(repository = %repo, body_len = body.len()))]
    pub async fn create_comment(&self, repo: &Repository, issue_number: u64, body: &str) -> Result<Comment> {
        let url = format!(
            "{}/repos/{}/{}/issues/{issue_number}/comments",
            self.api_base, repo.owner, repo.name
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .json(&serde_json::json!({ "body": body }))
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            bail!("{url} returned HTTP {status}: {}", detail.trim());
        }

        let comment: Comment = response
            .json()
            .await
            .with_context(|| format!("failed to parse JSON from {url}"))?;
        info!(url = %comment.html_url, "posted pull request comment");
        Ok(comment)
    }
}
