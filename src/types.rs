//! Core types for gh-cherry-pick

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A pull request, as fetched at one point in time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// PR title
    pub title: String,
    /// Login of the PR author (`None` for deleted accounts)
    pub author: Option<String>,
    /// Base (target) branch name
    pub base_ref: String,
    /// Head (source) branch name
    pub head_ref: String,
    /// SHA of the commit the merge produced on the base branch
    pub merge_commit_sha: Option<String>,
    /// Whether the PR was merged
    pub merged: bool,
    /// Whether PR is a draft
    pub is_draft: bool,
    /// Open or closed
    pub state: PrState,
    /// Web URL for the PR
    pub html_url: String,
}

impl PullRequest {
    /// Describe where the PR currently stands, for user-facing messages.
    ///
    /// Draft takes precedence over open since a draft cannot be merged.
    pub const fn status_label(&self) -> &'static str {
        if self.merged {
            "merged"
        } else if self.is_draft {
            "draft"
        } else {
            match self.state {
                PrState::Open => "open",
                PrState::Closed => "closed",
            }
        }
    }

    /// The merge commit, only when the PR is actually merged.
    ///
    /// GitHub fills `merge_commit_sha` with a test merge for open PRs, so the
    /// sha alone says nothing about merge state.
    pub fn merged_commit(&self) -> Option<&str> {
        if self.merged {
            self.merge_commit_sha.as_deref()
        } else {
            None
        }
    }
}

/// PR state (open or closed); merged is tracked separately
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrState {
    /// PR is open
    Open,
    /// PR is closed (merged or not)
    Closed,
}

impl std::fmt::Display for PrState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// How a PR landed on its base branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeStrategy {
    /// All commits squashed into a single new commit
    Squash,
    /// Commits replayed one by one onto the base branch
    Rebase,
}

impl std::fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Squash => write!(f, "squash"),
            Self::Rebase => write!(f, "rebase"),
        }
    }
}

/// Content negotiation for the PR diff endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiffFormat {
    /// Single flattened unified diff
    Diff,
    /// mbox-style patch series, one message per commit (`git am` input)
    Patch,
}

impl DiffFormat {
    /// Media type to send in the `Accept` header
    pub const fn media_type(self) -> &'static str {
        match self {
            Self::Diff => "application/vnd.github.v3.diff",
            Self::Patch => "application/vnd.github.v3.patch",
        }
    }
}

/// Snapshot of the local working copy's safety-relevant facts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingCopyState {
    /// Any uncommitted tracked or untracked change
    pub is_dirty: bool,
    /// A rebase or `git am` is in progress
    pub is_in_rebase_or_am: bool,
    /// Top of the working copy
    pub repo_root: PathBuf,
}

/// A git remote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitRemote {
    /// Remote name (e.g., "origin")
    pub name: String,
    /// Remote URL
    pub url: String,
}

/// Which GitHub repository the API calls target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Custom host (None for github.com)
    pub host: Option<String>,
}

impl PlatformConfig {
    /// Web base URL for this repository
    pub fn web_url(&self) -> String {
        let host = self.host.as_deref().unwrap_or("github.com");
        format!("https://{host}/{}/{}", self.owner, self.repo)
    }
}
