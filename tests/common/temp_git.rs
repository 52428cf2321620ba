//! Temporary git repositories backed by the real `git` binary

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// A throwaway working copy on `main`, with an optional bare `origin`
pub struct TempGitRepo {
    /// Keeps the directories alive
    _dir: TempDir,
    work: PathBuf,
    origin: Option<PathBuf>,
}

impl TempGitRepo {
    /// Initialize a repo with one commit on `main`
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let work = dir.path().join("work");
        fs::create_dir_all(&work).unwrap();

        git_in(&work, &["init", "-q", "-b", "main"]);
        git_in(&work, &["config", "user.name", "Test User"]);
        git_in(&work, &["config", "user.email", "test@example.com"]);
        git_in(&work, &["config", "commit.gpgsign", "false"]);

        let repo = Self {
            _dir: dir,
            work,
            origin: None,
        };
        repo.write("README.md", "widgets\n");
        repo.commit_all("Initial commit");
        repo
    }

    /// Initialize a repo plus a bare `origin` that has `main`
    pub fn with_origin() -> Self {
        let mut repo = Self::new();
        let origin = repo.work.parent().unwrap().join("origin.git");
        git_in(repo.work.parent().unwrap(), &["init", "-q", "--bare", "origin.git"]);
        repo.git(&["remote", "add", "origin", origin.to_str().unwrap()]);
        repo.git(&["push", "-q", "origin", "main"]);
        repo.origin = Some(origin);
        repo
    }

    /// Working copy path
    pub fn path(&self) -> &Path {
        &self.work
    }

    /// Bare origin path
    pub fn origin(&self) -> &Path {
        self.origin.as_deref().unwrap()
    }

    /// Write a file relative to the working copy
    pub fn write(&self, name: &str, contents: &str) {
        let path = self.work.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    /// Stage everything and commit, returning the new HEAD sha
    pub fn commit_all(&self, message: &str) -> String {
        self.git(&["add", "-A"]);
        self.git(&["commit", "-q", "-m", message]);
        self.head()
    }

    /// Full sha of HEAD
    pub fn head(&self) -> String {
        self.git(&["rev-parse", "HEAD"]).trim().to_string()
    }

    /// Name of the checked out branch
    pub fn current_branch(&self) -> String {
        self.git(&["rev-parse", "--abbrev-ref", "HEAD"])
            .trim()
            .to_string()
    }

    /// Run git in the working copy, panicking on failure
    pub fn git(&self, args: &[&str]) -> String {
        git_in(&self.work, args)
    }

    /// Run git in the bare origin, panicking on failure
    pub fn git_origin(&self, args: &[&str]) -> String {
        git_in(self.origin(), args)
    }
}

fn git_in(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {} failed: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}
