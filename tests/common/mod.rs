//! Shared test utilities

#![allow(dead_code)]

mod mock_platform;
mod mock_repo;
mod temp_git;

pub use mock_platform::MockPlatformService;
pub use mock_repo::{FailOn, MockWorkingCopy};
pub use temp_git::TempGitRepo;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use gh_cherry_pick::cherry_pick::{CherryPickRequest, ProgressCallback, Stage};
use gh_cherry_pick::error::Error;
use gh_cherry_pick::types::{PlatformConfig, PrState, PullRequest};
use std::sync::{Arc, Mutex};

/// Fixed timestamp used for deterministic branch names
pub const TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Ordered record of calls across mocks
///
/// Both mocks write to the same log so tests can assert ordering between
/// API queries and working copy effects.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    /// Append an entry
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    /// All entries, in call order
    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    /// Number of entries for the named operation
    pub fn count(&self, op: &str) -> usize {
        self.entries()
            .iter()
            .filter(|e| e.split('(').next() == Some(op))
            .count()
    }

    /// Position of the first entry for the named operation
    pub fn position(&self, op: &str) -> Option<usize> {
        self.entries()
            .iter()
            .position(|e| e.split('(').next() == Some(op))
    }
}

/// Working copy operations that change refs, branches or files
pub const MUTATING_OPS: [&str; 5] = [
    "fetch",
    "create_branch",
    "apply_patch",
    "cherry_pick",
    "push_branch",
];

/// Test platform config
pub fn github_config() -> PlatformConfig {
    PlatformConfig {
        owner: "acme".to_string(),
        repo: "widgets".to_string(),
        host: None,
    }
}

/// A merged PR with the given merge commit
pub fn merged_pr(number: u64, merge_commit: &str) -> PullRequest {
    PullRequest {
        number,
        title: format!("PR {number}"),
        author: Some("octocat".to_string()),
        base_ref: "develop".to_string(),
        head_ref: format!("feature-{number}"),
        merge_commit_sha: Some(merge_commit.to_string()),
        merged: true,
        is_draft: false,
        state: PrState::Closed,
        html_url: format!("https://github.com/acme/widgets/pull/{number}"),
    }
}

/// An unmerged PR; GitHub still reports a test merge sha for these
pub fn unmerged_pr(number: u64, state: PrState, is_draft: bool) -> PullRequest {
    PullRequest {
        merged: false,
        is_draft,
        state,
        ..merged_pr(number, "test-merge-sha")
    }
}

/// Request with a fixed timestamp
pub fn request(pr_number: u64, onto: &str) -> CherryPickRequest {
    CherryPickRequest {
        pr_number,
        onto: onto.to_string(),
        remote: "origin".to_string(),
        created_at: Utc.timestamp_opt(TEST_TIMESTAMP, 0).unwrap(),
    }
}

/// Progress callback that records stage events
#[derive(Debug, Default)]
pub struct RecordingProgress {
    completed: Mutex<Vec<Stage>>,
    failed: Mutex<Vec<Stage>>,
    messages: Mutex<Vec<String>>,
}

impl RecordingProgress {
    pub fn completed(&self) -> Vec<Stage> {
        self.completed.lock().unwrap().clone()
    }

    pub fn failed(&self) -> Vec<Stage> {
        self.failed.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProgressCallback for RecordingProgress {
    async fn on_stage_start(&self, _stage: Stage) {}

    async fn on_stage_complete(&self, stage: Stage) {
        self.completed.lock().unwrap().push(stage);
    }

    async fn on_stage_failed(&self, stage: Stage, _error: &Error) {
        self.failed.lock().unwrap().push(stage);
    }

    async fn on_message(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}
