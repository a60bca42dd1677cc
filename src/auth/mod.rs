//! Authentication for GitHub
//!
//! Supports environment variables and CLI-based auth (gh).

use crate::error::{Error, Result};
use std::process::Command;

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token from an environment variable
    EnvVar,
    /// Token from the gh CLI
    Cli,
}

/// A resolved GitHub token and where it came from
#[derive(Debug, Clone)]
pub struct GitHubAuth {
    /// The token itself
    pub token: String,
    /// Where the token was found
    pub source: AuthSource,
}

/// Resolve a GitHub token.
///
/// Checks `GITHUB_TOKEN` then `GH_TOKEN`, then falls back to `gh auth token`.
pub fn get_github_auth() -> Result<GitHubAuth> {
    for var in ["GITHUB_TOKEN", "GH_TOKEN"] {
        if let Ok(token) = std::env::var(var)
            && !token.trim().is_empty()
        {
            return Ok(GitHubAuth {
                token: token.trim().to_string(),
                source: AuthSource::EnvVar,
            });
        }
    }

    let output = Command::new("gh")
        .args(["auth", "token"])
        .output()
        .map_err(|e| Error::Auth(format!("failed to run 'gh auth token': {e}")))?;

    if !output.status.success() {
        return Err(Error::Auth(
            "no GitHub token found: set GITHUB_TOKEN or run 'gh auth login'".to_string(),
        ));
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        return Err(Error::Auth(
            "gh CLI returned an empty token; run 'gh auth login'".to_string(),
        ));
    }

    Ok(GitHubAuth {
        token,
        source: AuthSource::Cli,
    })
}
