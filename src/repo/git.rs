//! Working copy backed by the `git` executable

use super::WorkingCopy;
use crate::error::{Error, Result};
use crate::types::GitRemote;
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// Progress markers git leaves in its metadata directory
const IN_PROGRESS_MARKERS: [&str; 2] = ["rebase-apply", "rebase-merge"];

/// A git working copy, driven through the `git` CLI
#[derive(Debug, Clone)]
pub struct GitRepo {
    /// Directory git commands run in
    path: PathBuf,
}

impl GitRepo {
    /// Open the working copy containing `path`.
    ///
    /// Fails if `path` is not inside a git working tree.
    pub async fn open(path: &Path) -> Result<Self> {
        let repo = Self {
            path: path.to_path_buf(),
        };
        repo.repo_root().await?;
        Ok(repo)
    }

    /// Run git and capture output without judging the exit status
    async fn output(&self, args: &[&str], stdin: Option<&[u8]>) -> Result<Output> {
        debug!(args = ?args, "running git");
        let mut cmd = Command::new("git");
        cmd.args(args)
            .current_dir(&self.path)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            });

        let mut child = cmd.spawn().map_err(|e| {
            Error::Git(format!(
                "failed to execute git {}: {e}",
                args.first().unwrap_or(&"")
            ))
        })?;

        if let Some(input) = stdin
            && let Some(mut pipe) = child.stdin.take()
        {
            // git may exit before reading everything; its exit status says why
            if let Err(e) = pipe.write_all(input).await
                && e.kind() != std::io::ErrorKind::BrokenPipe
            {
                return Err(e.into());
            }
            // Close stdin so git sees EOF
            drop(pipe);
        }

        Ok(child.wait_with_output().await?)
    }

    /// Run git, mapping a non-zero exit to `err` with stderr as the detail
    async fn run(
        &self,
        args: &[&str],
        stdin: Option<&[u8]>,
        err: fn(String) -> Error,
    ) -> Result<String> {
        let output = self.output(args, stdin).await?;
        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            debug!(args = ?args, status = ?output.status.code(), %stderr, "git failed");
            Err(err(format!("git {}: {stderr}", args.join(" "))))
        }
    }
}

/// Resolve the git metadata directory for a working copy root.
///
/// In linked worktrees and submodules `.git` is a file containing
/// `gitdir: <path>`, possibly relative to the working copy. Falls back to
/// `<root>/.git` when the pointer cannot be read.
pub fn resolve_git_dir(root: &Path) -> PathBuf {
    let dot_git = root.join(".git");

    if dot_git.is_file()
        && let Ok(contents) = fs::read_to_string(&dot_git)
        && let Some(target) = contents.trim().strip_prefix("gitdir:")
    {
        let target = Path::new(target.trim());
        return if target.is_absolute() {
            target.to_path_buf()
        } else {
            root.join(target)
        };
    }

    dot_git
}

#[async_trait]
impl WorkingCopy for GitRepo {
    async fn is_dirty(&self) -> Result<bool> {
        let status = self.run(&["status", "--porcelain"], None, Error::Git).await?;
        Ok(!status.trim().is_empty())
    }

    async fn is_in_rebase_or_am(&self) -> Result<bool> {
        let git_dir = resolve_git_dir(&self.repo_root().await?);
        let in_progress = IN_PROGRESS_MARKERS
            .iter()
            .any(|marker| git_dir.join(marker).exists());
        debug!(git_dir = %git_dir.display(), in_progress, "checked rebase/am markers");
        Ok(in_progress)
    }

    async fn repo_root(&self) -> Result<PathBuf> {
        let root = self
            .run(&["rev-parse", "--show-toplevel"], None, |detail| {
                Error::Git(format!("not a git repository: {detail}"))
            })
            .await?;
        Ok(PathBuf::from(root.trim()))
    }

    async fn fetch(&self, remote: &str, refspec: &str) -> Result<()> {
        self.run(
            &["fetch", "--recurse-submodules", remote, refspec],
            None,
            Error::Fetch,
        )
        .await?;
        Ok(())
    }

    async fn create_branch(&self, name: &str, start_point: &str) -> Result<()> {
        self.run(&["checkout", "-b", name, start_point], None, Error::Checkout)
            .await?;
        Ok(())
    }

    async fn apply_patch(&self, patch: &str) -> Result<()> {
        self.run(&["am", "-3"], Some(patch.as_bytes()), Error::PatchApply)
            .await?;
        Ok(())
    }

    async fn cherry_pick(&self, commit: &str) -> Result<()> {
        self.run(&["cherry-pick", commit], None, Error::CherryPick)
            .await?;
        Ok(())
    }

    async fn push_branch(&self, remote: &str, branch: &str) -> Result<()> {
        self.run(&["push", "--set-upstream", remote, branch], None, Error::Push)
            .await?;
        Ok(())
    }

    async fn remotes(&self) -> Result<Vec<GitRemote>> {
        let listing = self.run(&["remote", "-v"], None, Error::Git).await?;
        Ok(parse_remote_listing(&listing))
    }
}

/// Parse `git remote -v` output, keeping the fetch URL of each remote
fn parse_remote_listing(listing: &str) -> Vec<GitRemote> {
    listing
        .lines()
        .filter(|line| line.ends_with("(fetch)"))
        .filter_map(|line| {
            let mut parts = line.split_whitespace();
            Some(GitRemote {
                name: parts.next()?.to_string(),
                url: parts.next()?.to_string(),
            })
        })
        .collect()
}
