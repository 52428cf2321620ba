//! Mock platform service for testing

use super::{CallLog, github_config};
use async_trait::async_trait;
use gh_cherry_pick::error::{Error, Result};
use gh_cherry_pick::platform::PlatformService;
use gh_cherry_pick::types::{DiffFormat, PlatformConfig, PullRequest};
use std::collections::HashMap;
use std::sync::Mutex;

/// Simple mock platform service for testing
///
/// This manually implements `PlatformService` rather than using mockall so the
/// default `classify_merge_strategy` / `merge_strategy_for` methods run for
/// real against canned responses.
///
/// Features:
/// - Canned PRs, commit associations and diffs
/// - Call tracking through a shared `CallLog`
/// - Error injection for failure path testing
pub struct MockPlatformService {
    config: PlatformConfig,
    log: CallLog,
    pull_requests: Mutex<HashMap<u64, PullRequest>>,
    associated: Mutex<HashMap<String, Vec<u64>>>,
    diffs: Mutex<HashMap<(u64, DiffFormat), String>>,
    // Error injection
    error_on_get_pr: Mutex<Option<String>>,
    error_on_list_for_commit: Mutex<Option<String>>,
    error_on_diff: Mutex<Option<String>>,
}

impl MockPlatformService {
    /// Create a new mock writing calls to `log`
    pub fn new(log: &CallLog) -> Self {
        Self {
            config: github_config(),
            log: log.clone(),
            pull_requests: Mutex::new(HashMap::new()),
            associated: Mutex::new(HashMap::new()),
            diffs: Mutex::new(HashMap::new()),
            error_on_get_pr: Mutex::new(None),
            error_on_list_for_commit: Mutex::new(None),
            error_on_diff: Mutex::new(None),
        }
    }

    // === Response setup ===

    /// Register a PR
    pub fn set_pull_request(&self, pr: PullRequest) {
        self.pull_requests.lock().unwrap().insert(pr.number, pr);
    }

    /// Set which PRs are associated with `commit`
    pub fn set_associated(&self, commit: &str, prs: &[u64]) {
        self.associated
            .lock()
            .unwrap()
            .insert(commit.to_string(), prs.to_vec());
    }

    /// Set the diff text returned for a PR in a given format
    pub fn set_diff(&self, pr_number: u64, format: DiffFormat, text: &str) {
        self.diffs
            .lock()
            .unwrap()
            .insert((pr_number, format), text.to_string());
    }

    /// Set up a squash-merged PR: `M~1` belongs to other PRs
    pub fn setup_squash_merged(&self, pr_number: u64, merge_commit: &str) {
        self.set_pull_request(super::merged_pr(pr_number, merge_commit));
        self.set_associated(&format!("{merge_commit}~1"), &[pr_number + 1000]);
    }

    /// Set up a rebase-merged PR: `M~1` is one of the PR's own commits
    pub fn setup_rebase_merged(&self, pr_number: u64, merge_commit: &str, patch: &str) {
        self.set_pull_request(super::merged_pr(pr_number, merge_commit));
        self.set_associated(&format!("{merge_commit}~1"), &[pr_number]);
        self.set_diff(pr_number, DiffFormat::Patch, patch);
    }

    // === Error injection ===

    /// Make `get_pull_request` return an API error
    pub fn fail_get_pr(&self, msg: &str) {
        *self.error_on_get_pr.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `list_pull_requests_for_commit` return an API error
    pub fn fail_list_for_commit(&self, msg: &str) {
        *self.error_on_list_for_commit.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `get_pull_request_diff` return an API error
    pub fn fail_diff(&self, msg: &str) {
        *self.error_on_diff.lock().unwrap() = Some(msg.to_string());
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn get_pull_request(&self, pr_number: u64) -> Result<PullRequest> {
        self.log.push(format!("get_pull_request({pr_number})"));

        if let Some(msg) = self.error_on_get_pr.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        self.pull_requests
            .lock()
            .unwrap()
            .get(&pr_number)
            .cloned()
            .ok_or(Error::NotFound(pr_number))
    }

    async fn list_pull_requests_for_commit(&self, commit: &str) -> Result<Vec<u64>> {
        self.log.push(format!("list_pull_requests_for_commit({commit})"));

        if let Some(msg) = self.error_on_list_for_commit.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        Ok(self
            .associated
            .lock()
            .unwrap()
            .get(commit)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_pull_request_diff(&self, pr_number: u64, format: DiffFormat) -> Result<String> {
        self.log
            .push(format!("get_pull_request_diff({pr_number}, {format:?})"));

        if let Some(msg) = self.error_on_diff.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        self.diffs
            .lock()
            .unwrap()
            .get(&(pr_number, format))
            .cloned()
            .ok_or(Error::NotFound(pr_number))
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
