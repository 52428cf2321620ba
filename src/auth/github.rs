//! GitHub token resolution

use super::AuthSource;
use crate::error::{Error, Result};
use octocrab::Octocrab;
use tokio::process::Command;
use tracing::debug;

/// Environment variables checked for a token, in order
const TOKEN_ENV_VARS: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];

/// Resolved GitHub credentials
#[derive(Debug, Clone)]
pub struct GitHubAuthConfig {
    /// API token
    pub token: String,
    /// Where the token came from
    pub source: AuthSource,
    /// GitHub Enterprise host, if any
    pub host: Option<String>,
}

/// Resolve a GitHub token.
///
/// Order: explicit token, `GITHUB_TOKEN`, `GH_TOKEN`, then `gh auth token`.
pub async fn get_github_auth(
    explicit: Option<&str>,
    host: Option<&str>,
) -> Result<GitHubAuthConfig> {
    let host = host.map(ToString::to_string);

    if let Some(token) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
        debug!("using token from --token");
        return Ok(GitHubAuthConfig {
            token: token.to_string(),
            source: AuthSource::Flag,
            host,
        });
    }

    if let Some(token) = token_from_env(|name| std::env::var(name).ok()) {
        debug!("using token from environment");
        return Ok(GitHubAuthConfig {
            token,
            source: AuthSource::EnvVar,
            host,
        });
    }

    let token = token_from_gh_cli(host.as_deref()).await?;
    debug!("using token from gh CLI");
    Ok(GitHubAuthConfig {
        token,
        source: AuthSource::Cli,
        host,
    })
}

/// Pick the first non-empty token from the known environment variables
fn token_from_env(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    TOKEN_ENV_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}

async fn token_from_gh_cli(host: Option<&str>) -> Result<String> {
    let mut cmd = Command::new("gh");
    cmd.args(["auth", "token"]);
    if let Some(h) = host {
        cmd.args(["--hostname", h]);
    }

    let output = cmd.output().await.map_err(|e| {
        Error::Auth(format!(
            "no token in GITHUB_TOKEN/GH_TOKEN and gh CLI unavailable: {e}"
        ))
    })?;

    if !output.status.success() {
        return Err(Error::Auth(format!(
            "gh auth token failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        return Err(Error::Auth("gh auth token returned an empty token".to_string()));
    }
    Ok(token)
}

/// Verify the token against the API, returning the authenticated login
pub async fn test_github_auth(config: &GitHubAuthConfig) -> Result<String> {
    let mut builder = Octocrab::builder().personal_token(config.token.clone());
    if let Some(ref h) = config.host {
        builder = builder
            .base_uri(format!("https://{h}/api/v3"))
            .map_err(|e| Error::GitHubApi(e.to_string()))?;
    }
    let client = builder
        .build()
        .map_err(|e| Error::GitHubApi(e.to_string()))?;

    let user = client
        .current()
        .user()
        .await
        .map_err(|e| Error::Auth(format!("token rejected: {e}")))?;
    Ok(user.login)
}
