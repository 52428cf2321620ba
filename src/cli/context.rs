//! Shared command context for CLI commands
//!
//! Extracts common setup code shared by pick, inspect and diff.

use gh_cherry_pick::auth::get_github_auth;
use gh_cherry_pick::error::Result;
use gh_cherry_pick::platform::{
    PlatformService, create_platform_service, detect_repo_from_remote, parse_repo_slug,
};
use gh_cherry_pick::repo::{GitRepo, WorkingCopy};
use gh_cherry_pick::types::PlatformConfig;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where to find the repository and how to reach GitHub
#[derive(Debug, Clone, Default)]
pub struct RepoOptions {
    /// Working copy path
    pub path: PathBuf,
    /// Remote to fetch from, push to, and detect the repository from
    pub remote: String,
    /// Explicit `owner/name`, bypassing remote detection
    pub repo: Option<String>,
    /// GitHub Enterprise host
    pub host: Option<String>,
    /// Explicit API token
    pub token: Option<String>,
}

/// Shared context for CLI commands that talk to GitHub
///
/// - Opening the working copy
/// - Resolving the GitHub repository (flag or remote URL)
/// - Resolving credentials and creating the platform service
pub struct CommandContext {
    /// The working copy
    pub repo: GitRepo,
    /// Root path of the working copy
    pub repo_root: PathBuf,
    /// Platform service (GitHub)
    pub platform: Box<dyn PlatformService>,
    /// Selected remote name
    pub remote_name: String,
}

impl CommandContext {
    /// Create a new command context
    pub async fn new(options: &RepoOptions) -> Result<Self> {
        let repo = GitRepo::open(&options.path).await?;
        let repo_root = repo.repo_root().await?;

        let platform_config = resolve_platform_config(&repo, options).await?;
        debug!(
            owner = %platform_config.owner,
            repo = %platform_config.repo,
            host = ?platform_config.host,
            "resolved GitHub repository"
        );

        let auth =
            get_github_auth(options.token.as_deref(), platform_config.host.as_deref()).await?;
        let platform = create_platform_service(&platform_config, &auth.token)?;

        Ok(Self {
            repo,
            repo_root,
            platform,
            remote_name: options.remote.clone(),
        })
    }

    /// Root of the working copy
    pub fn root(&self) -> &Path {
        &self.repo_root
    }
}

/// `--repo` wins; otherwise detect from the remote URL
async fn resolve_platform_config(repo: &GitRepo, options: &RepoOptions) -> Result<PlatformConfig> {
    if let Some(ref slug) = options.repo {
        return parse_repo_slug(slug, options.host.clone());
    }

    let remotes = repo.remotes().await?;
    let mut config = detect_repo_from_remote(&remotes, &options.remote)?;
    if options.host.is_some() {
        config.host.clone_from(&options.host);
    }
    Ok(config)
}
