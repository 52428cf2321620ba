//! Platform services for GitHub
//!
//! Provides the remote metadata the cherry-pick workflow needs: PR state,
//! commit to PR association and the PR's diff or patch series.

mod detection;
mod factory;
mod github;

pub use detection::{detect_repo_from_remote, parse_repo_info, parse_repo_slug};
pub use factory::create_platform_service;
pub use github::GitHubService;

use crate::cherry_pick::classify_from_associated;
use crate::error::{Error, Result};
use crate::types::{DiffFormat, MergeStrategy, PlatformConfig, PullRequest};
use async_trait::async_trait;
use tracing::debug;

/// Platform service trait for PR queries
///
/// Abstracts the hosting API so the workflow can run against GitHub or a
/// test double.
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// Fetch current PR metadata. Fails with `Error::NotFound` for unknown numbers.
    async fn get_pull_request(&self, pr_number: u64) -> Result<PullRequest>;

    /// Numbers of the PRs GitHub associates with a commit
    ///
    /// `commit` may be any revision expression the API accepts, such as
    /// `<sha>~1`.
    async fn list_pull_requests_for_commit(&self, commit: &str) -> Result<Vec<u64>>;

    /// Fetch the PR's changes as a flattened diff or as a patch series
    async fn get_pull_request_diff(&self, pr_number: u64, format: DiffFormat) -> Result<String>;

    /// Get the platform configuration
    fn config(&self) -> &PlatformConfig;

    /// Detect whether a merged PR was squash- or rebase-merged.
    ///
    /// Fetches the PR fresh, then delegates to [`merge_strategy_for`].
    ///
    /// [`merge_strategy_for`]: Self::merge_strategy_for
    async fn classify_merge_strategy(&self, pr_number: u64) -> Result<MergeStrategy> {
        let pr = self.get_pull_request(pr_number).await?;
        self.merge_strategy_for(&pr).await
    }

    /// Detect the merge strategy for an already fetched PR.
    ///
    /// Looks up the PRs associated with the commit just before the merge
    /// commit `M`. A rebase merge lands the PR's own commits consecutively, so
    /// `M~1` still belongs to the PR; a squash merge puts a single new commit
    /// on top of unrelated history.
    async fn merge_strategy_for(&self, pr: &PullRequest) -> Result<MergeStrategy> {
        let merge_commit = pr.merged_commit().ok_or_else(|| Error::Unmerged {
            number: pr.number,
            state: pr.status_label().to_string(),
        })?;

        let parent = format!("{merge_commit}~1");
        let associated = self.list_pull_requests_for_commit(&parent).await?;
        let strategy = classify_from_associated(pr.number, &associated);

        debug!(
            pr_number = pr.number,
            merge_commit,
            ?associated,
            %strategy,
            "classified merge strategy"
        );
        Ok(strategy)
    }
}
