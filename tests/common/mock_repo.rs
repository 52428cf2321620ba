//! Mock working copy for testing

use super::CallLog;
use async_trait::async_trait;
use gh_cherry_pick::error::{Error, Result};
use gh_cherry_pick::repo::WorkingCopy;
use gh_cherry_pick::types::GitRemote;
use std::path::PathBuf;
use std::sync::Mutex;

/// Operations that can be made to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    Fetch,
    CreateBranch,
    ApplyPatch,
    CherryPick,
    Push,
}

/// In-memory working copy that records every call
///
/// Tracks the checked out branch so tests can see what a failed run leaves
/// behind.
pub struct MockWorkingCopy {
    log: CallLog,
    dirty: Mutex<bool>,
    in_rebase: Mutex<bool>,
    current_branch: Mutex<String>,
    branches: Mutex<Vec<String>>,
    failures: Mutex<Vec<(FailOn, String)>>,
}

impl MockWorkingCopy {
    /// Clean working copy on `develop`
    pub fn new(log: &CallLog) -> Self {
        Self {
            log: log.clone(),
            dirty: Mutex::new(false),
            in_rebase: Mutex::new(false),
            current_branch: Mutex::new("develop".to_string()),
            branches: Mutex::new(vec!["develop".to_string()]),
            failures: Mutex::new(Vec::new()),
        }
    }

    /// Report uncommitted changes
    pub fn set_dirty(&self, dirty: bool) {
        *self.dirty.lock().unwrap() = dirty;
    }

    /// Report a rebase / am in progress
    pub fn set_in_rebase(&self, in_rebase: bool) {
        *self.in_rebase.lock().unwrap() = in_rebase;
    }

    /// Make an operation fail with `msg`
    pub fn fail(&self, op: FailOn, msg: &str) {
        self.failures.lock().unwrap().push((op, msg.to_string()));
    }

    /// Currently checked out branch
    pub fn current_branch(&self) -> String {
        self.current_branch.lock().unwrap().clone()
    }

    /// All local branches
    pub fn branches(&self) -> Vec<String> {
        self.branches.lock().unwrap().clone()
    }

    fn injected(&self, op: FailOn) -> Option<String> {
        self.failures
            .lock()
            .unwrap()
            .iter()
            .find(|(o, _)| *o == op)
            .map(|(_, msg)| msg.clone())
    }
}

#[async_trait]
impl WorkingCopy for MockWorkingCopy {
    async fn is_dirty(&self) -> Result<bool> {
        self.log.push("is_dirty()");
        Ok(*self.dirty.lock().unwrap())
    }

    async fn is_in_rebase_or_am(&self) -> Result<bool> {
        self.log.push("is_in_rebase_or_am()");
        Ok(*self.in_rebase.lock().unwrap())
    }

    async fn repo_root(&self) -> Result<PathBuf> {
        self.log.push("repo_root()");
        Ok(PathBuf::from("/work/widgets"))
    }

    async fn fetch(&self, remote: &str, refspec: &str) -> Result<()> {
        self.log.push(format!("fetch({remote}, {refspec})"));
        match self.injected(FailOn::Fetch) {
            Some(msg) => Err(Error::Fetch(msg)),
            None => Ok(()),
        }
    }

    async fn create_branch(&self, name: &str, start_point: &str) -> Result<()> {
        self.log.push(format!("create_branch({name}, {start_point})"));
        if let Some(msg) = self.injected(FailOn::CreateBranch) {
            return Err(Error::Checkout(msg));
        }
        let mut branches = self.branches.lock().unwrap();
        if branches.iter().any(|b| b == name) {
            return Err(Error::Checkout(format!("a branch named '{name}' already exists")));
        }
        branches.push(name.to_string());
        *self.current_branch.lock().unwrap() = name.to_string();
        Ok(())
    }

    async fn apply_patch(&self, patch: &str) -> Result<()> {
        self.log.push(format!("apply_patch({} bytes)", patch.len()));
        if let Some(msg) = self.injected(FailOn::ApplyPatch) {
            *self.in_rebase.lock().unwrap() = true;
            return Err(Error::PatchApply(msg));
        }
        Ok(())
    }

    async fn cherry_pick(&self, commit: &str) -> Result<()> {
        self.log.push(format!("cherry_pick({commit})"));
        match self.injected(FailOn::CherryPick) {
            Some(msg) => Err(Error::CherryPick(msg)),
            None => Ok(()),
        }
    }

    async fn push_branch(&self, remote: &str, branch: &str) -> Result<()> {
        self.log.push(format!("push_branch({remote}, {branch})"));
        match self.injected(FailOn::Push) {
            Some(msg) => Err(Error::Push(msg)),
            None => Ok(()),
        }
    }

    async fn remotes(&self) -> Result<Vec<GitRemote>> {
        self.log.push("remotes()");
        Ok(vec![GitRemote {
            name: "origin".to_string(),
            url: "git@github.com:acme/widgets.git".to_string(),
        }])
    }
}
