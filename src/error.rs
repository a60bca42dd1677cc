//! Error types for merge-queue

use thiserror::Error;

/// All errors that can occur in merge-queue
#[derive(Debug, Error)]
pub enum Error {
    /// GitHub API returned an error
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Raw HTTP request failed (transport-level)
    #[error("HTTP error: {0}")]
    Http(String),

    /// Authentication failed or no token available
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal invariant violation
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<octocrab::Error> for Error {
    fn from(e: octocrab::Error) -> Self {
        Self::GitHubApi(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e.to_string())
    }
}

impl Error {
    /// Whether this error should end the cycle as a silent retry.
    ///
    /// API and transport failures are transient by policy: the next scheduled
    /// invocation is the retry mechanism. Auth and config errors are surfaced
    /// at startup, before any cycle runs.
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::GitHubApi(_) | Self::Http(_))
    }
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;
