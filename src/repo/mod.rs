//! Local working copy access
//!
//! Read-only queries and the handful of git effects the cherry-pick workflow
//! performs. Every query goes to git; nothing is cached between calls.

mod git;

pub use git::{GitRepo, resolve_git_dir};

use crate::error::Result;
use crate::types::{GitRemote, WorkingCopyState};
use async_trait::async_trait;
use std::path::PathBuf;

/// Operations on the working copy the workflow runs in
#[async_trait]
pub trait WorkingCopy: Send + Sync {
    /// Any uncommitted tracked or untracked change
    async fn is_dirty(&self) -> Result<bool>;

    /// Whether a rebase or `git am` is in progress
    async fn is_in_rebase_or_am(&self) -> Result<bool>;

    /// Absolute path to the top of the working copy
    async fn repo_root(&self) -> Result<PathBuf>;

    /// Update refs (and submodule refs) for `refspec` from `remote`
    async fn fetch(&self, remote: &str, refspec: &str) -> Result<()>;

    /// Create `name` at `start_point` and switch to it
    async fn create_branch(&self, name: &str, start_point: &str) -> Result<()>;

    /// Apply an mbox patch series as commits, with three-way fallback
    async fn apply_patch(&self, patch: &str) -> Result<()>;

    /// Replay a single commit onto the current branch
    async fn cherry_pick(&self, commit: &str) -> Result<()>;

    /// Publish `branch` to `remote` and set it as upstream
    async fn push_branch(&self, remote: &str, branch: &str) -> Result<()>;

    /// Configured remotes
    async fn remotes(&self) -> Result<Vec<GitRemote>>;

    /// Read all safety-relevant facts at once
    async fn state(&self) -> Result<WorkingCopyState> {
        Ok(WorkingCopyState {
            is_dirty: self.is_dirty().await?,
            is_in_rebase_or_am: self.is_in_rebase_or_am().await?,
            repo_root: self.repo_root().await?,
        })
    }
}
