//! Repository detection from git remote URLs

use crate::error::{Error, Result};
use crate::types::{GitRemote, PlatformConfig};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// `git@host:owner/repo(.git)` style remotes, which are not valid URLs
static SCP_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[\w.-]+@)?([\w.-]+):([\w.-]+)/([\w.-]+?)(?:\.git)?/?$")
        .expect("scp-like remote regex is valid")
});

/// Parse a GitHub remote URL into a platform config.
///
/// Accepts `https://`, `ssh://` and scp-like (`git@github.com:o/r.git`)
/// remotes. Any host other than `github.com` is treated as GitHub Enterprise.
pub fn parse_repo_info(remote_url: &str) -> Result<PlatformConfig> {
    let trimmed = remote_url.trim();

    if let Ok(url) = Url::parse(trimmed)
        && url.has_host()
    {
        let host = url
            .host_str()
            .ok_or_else(|| Error::InvalidRemoteUrl(trimmed.to_string()))?;
        let mut segments = url
            .path_segments()
            .ok_or_else(|| Error::InvalidRemoteUrl(trimmed.to_string()))?
            .filter(|s| !s.is_empty());

        let (Some(owner), Some(repo), None) = (segments.next(), segments.next(), segments.next())
        else {
            return Err(Error::InvalidRemoteUrl(trimmed.to_string()));
        };

        return Ok(make_config(host, owner, repo));
    }

    let caps = SCP_LIKE
        .captures(trimmed)
        .ok_or_else(|| Error::InvalidRemoteUrl(trimmed.to_string()))?;
    Ok(make_config(&caps[1], &caps[2], &caps[3]))
}

/// Parse an explicit `owner/repo` slug
pub fn parse_repo_slug(slug: &str, host: Option<String>) -> Result<PlatformConfig> {
    match slug.trim().split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok(PlatformConfig {
                owner: owner.to_string(),
                repo: repo.to_string(),
                host,
            })
        }
        _ => Err(Error::Config(format!(
            "expected repository as owner/name, got '{slug}'"
        ))),
    }
}

/// Find `remote_name` among `remotes` and parse its URL
pub fn detect_repo_from_remote(remotes: &[GitRemote], remote_name: &str) -> Result<PlatformConfig> {
    let remote = remotes
        .iter()
        .find(|r| r.name == remote_name)
        .ok_or_else(|| Error::RemoteNotFound(remote_name.to_string()))?;
    parse_repo_info(&remote.url)
}

fn make_config(host: &str, owner: &str, repo: &str) -> PlatformConfig {
    let repo = repo.strip_suffix(".git").unwrap_or(repo);
    let host = if host == "github.com" || host == "www.github.com" {
        None
    } else {
        Some(host.to_string())
    };
    PlatformConfig {
        owner: owner.to_string(),
        repo: repo.to_string(),
        host,
    }
}
