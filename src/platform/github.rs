//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{DiffFormat, PlatformConfig, PrState, PullRequest};
use async_trait::async_trait;
use octocrab::Octocrab;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

const API_VERSION: &str = "2022-11-28";

/// GitHub service using octocrab
pub struct GitHubService {
    client: Octocrab,
    config: PlatformConfig,
    /// Token for raw HTTP requests (commit association, diffs)
    token: String,
    /// HTTP client for raw requests
    http_client: Client,
    /// API base URL for raw requests, without trailing slash
    api_base: String,
}

impl GitHubService {
    /// Create a new GitHub service
    pub fn new(token: &str, owner: String, repo: String, host: Option<String>) -> Result<Self> {
        let api_base = host.as_ref().map_or_else(
            || "https://api.github.com".to_string(),
            |h| format!("https://{h}/api/v3"),
        );
        Self::with_api_base(token, owner, repo, host, &api_base)
    }

    /// Create a service against an explicit API base URL.
    ///
    /// `host` is only kept for building web links.
    pub fn with_api_base(
        token: &str,
        owner: String,
        repo: String,
        host: Option<String>,
        api_base: &str,
    ) -> Result<Self> {
        let api_base = api_base.trim_end_matches('/').to_string();

        let client = Octocrab::builder()
            .personal_token(token.to_string())
            .base_uri(api_base.as_str())
            .map_err(|e| Error::GitHubApi(e.to_string()))?
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        let http_client = Client::builder()
            .user_agent("gh-cherry-pick")
            .build()
            .map_err(|e| Error::GitHubApi(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config: PlatformConfig { owner, repo, host },
            token: token.to_string(),
            http_client,
            api_base,
        })
    }

    fn repo_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/{path}",
            self.api_base, self.config.owner, self.config.repo
        )
    }

    /// Issue an authenticated GET with the given `Accept` media type
    async fn get_raw(&self, url: &str, accept: &str) -> Result<reqwest::Response> {
        self.http_client
            .get(url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", accept)
            .header("X-GitHub-Api-Version", API_VERSION)
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Request to {url} failed: {e}")))
    }
}

/// Helper to convert octocrab PR to our `PullRequest` type
fn pr_from_octocrab(pr: &octocrab::models::pulls::PullRequest) -> PullRequest {
    let state = match pr.state {
        Some(octocrab::models::IssueState::Open) => PrState::Open,
        // IssueState is non-exhaustive, so use wildcard for Closed and any future variants
        Some(_) | None => PrState::Closed,
    };

    PullRequest {
        number: pr.number,
        title: pr.title.as_deref().unwrap_or_default().to_string(),
        author: pr.user.as_ref().map(|u| u.login.clone()),
        base_ref: pr.base.ref_field.clone(),
        head_ref: pr.head.ref_field.clone(),
        merge_commit_sha: pr.merge_commit_sha.clone(),
        merged: pr.merged_at.is_some(),
        is_draft: pr.draft.unwrap_or(false),
        state,
        html_url: pr
            .html_url
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
    }
}

fn is_not_found(err: &octocrab::Error) -> bool {
    matches!(err, octocrab::Error::GitHub { source, .. } if source.status_code.as_u16() == 404)
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn get_pull_request(&self, pr_number: u64) -> Result<PullRequest> {
        debug!(pr_number, "getting PR");

        let pr = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .get(pr_number)
            .await
            .map_err(|e| {
                if is_not_found(&e) {
                    Error::NotFound(pr_number)
                } else {
                    e.into()
                }
            })?;

        let result = pr_from_octocrab(&pr);
        debug!(
            pr_number,
            merged = result.merged,
            state = %result.state,
            "got PR"
        );
        Ok(result)
    }

    async fn list_pull_requests_for_commit(&self, commit: &str) -> Result<Vec<u64>> {
        #[derive(Deserialize)]
        struct AssociatedPr {
            number: u64,
        }

        debug!(commit, "listing PRs associated with commit");
        let url = self.repo_url(&format!("commits/{}/pulls", urlencoding::encode(commit)));

        let response = self.get_raw(&url, "application/vnd.github+json").await?;
        if !response.status().is_success() {
            return Err(Error::GitHubApi(format!(
                "Listing PRs for commit {commit} returned {}",
                response.status()
            )));
        }

        let prs: Vec<AssociatedPr> = response
            .json()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to parse associated PRs: {e}")))?;

        let numbers: Vec<u64> = prs.into_iter().map(|p| p.number).collect();
        debug!(commit, count = numbers.len(), "listed associated PRs");
        Ok(numbers)
    }

    async fn get_pull_request_diff(&self, pr_number: u64, format: DiffFormat) -> Result<String> {
        debug!(pr_number, ?format, "fetching PR diff");
        let url = self.repo_url(&format!("pulls/{pr_number}"));

        let response = self.get_raw(&url, format.media_type()).await?;
        let status = response.status();
        if status.as_u16() == 404 {
            return Err(Error::NotFound(pr_number));
        }
        if !status.is_success() {
            return Err(Error::GitHubApi(format!(
                "Fetching diff for PR #{pr_number} returned {status}"
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to read PR diff: {e}")))?;
        debug!(pr_number, bytes = text.len(), "fetched PR diff");
        Ok(text)
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
