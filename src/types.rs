//! Core types for merge-queue

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A pull request carrying the queue label
///
/// An immutable snapshot fetched fresh at the start of each cycle. Identity is
/// the PR number. Nothing here is cached across cycles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueuedPr {
    /// PR number
    pub number: u64,
    /// When the PR was opened
    pub created_at: DateTime<Utc>,
    /// Head branch name
    pub head_ref: String,
    /// Head commit SHA at the time of the snapshot
    pub head_sha: String,
    /// PR title (for display and logs)
    pub title: String,
    /// Web URL for the PR
    pub html_url: String,
}

/// Aggregate review decision for a PR
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewState {
    /// The PR has an approving review decision
    Approved,
    /// Anything else: changes requested, review required, or no decision
    NotApproved,
}

/// Whether a PR can be merged cleanly into its base
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeableState {
    /// No conflicts with the base branch
    Mergeable,
    /// Has merge conflicts
    Conflicting,
    /// GitHub has not finished computing mergeability yet
    Unknown,
}

/// How far a PR's head branch is behind its base
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BranchFreshness {
    /// Number of commits the head is behind the base; 0 means up to date
    pub behind_by: u64,
}

impl BranchFreshness {
    /// Whether the head branch contains the current base tip
    pub const fn is_current(self) -> bool {
        self.behind_by == 0
    }
}

/// Status of an individual check run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckRunStatus {
    /// Waiting to be scheduled
    Queued,
    /// Currently running
    InProgress,
    /// Finished; see the conclusion
    Completed,
    /// Waiting on an external condition
    Pending,
    /// Waiting on a deployment protection rule
    Waiting,
    /// Requested but not yet queued
    Requested,
    /// Any status this crate does not recognize
    #[serde(other)]
    Other,
}

/// Conclusion of a completed check run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckConclusion {
    /// Check passed
    Success,
    /// Check reported a neutral result
    Neutral,
    /// Check was skipped
    Skipped,
    /// Check failed
    Failure,
    /// Check was cancelled
    Cancelled,
    /// Check timed out
    TimedOut,
    /// Check requires manual action
    ActionRequired,
    /// Check result is stale
    Stale,
    /// Check infrastructure failed to start
    StartupFailure,
    /// Any conclusion this crate does not recognize
    #[serde(other)]
    Other,
}

/// A named check run on a PR's head commit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckRun {
    /// Check run name (workflow job name for GitHub Actions)
    pub name: String,
    /// Current lifecycle status
    pub status: CheckRunStatus,
    /// Conclusion, present once the run has completed
    pub conclusion: Option<CheckConclusion>,
}

/// Aggregate CI state over all relevant check runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    /// Every relevant check completed with success, skipped, or neutral
    Success,
    /// At least one check is still running, or no checks have registered yet
    Pending,
    /// At least one check failed, was cancelled, timed out, or needs action
    Failure,
    /// Checks are in a combination this crate cannot classify
    Unknown,
}

/// The single decision a cycle produces for its candidate PR
///
/// Exactly one `Outcome` is produced per invocation, as a pure function of the
/// fetched snapshot. The reporter maps it to at most one mutating action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Leave the PR queued without acting (e.g. not yet approved)
    Skip {
        /// Why the PR was skipped
        reason: String,
    },
    /// Bring the head branch up to date with the base
    UpdateBranch,
    /// Merge the PR and delete its head branch
    Merge,
    /// Remove the queue label and explain why in a comment
    Dequeue {
        /// Why the PR left the queue
        reason: String,
    },
    /// Do nothing; the next scheduled cycle re-evaluates
    Retry,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Skip { reason } => write!(f, "skip ({reason})"),
            Self::UpdateBranch => write!(f, "update branch"),
            Self::Merge => write!(f, "merge"),
            Self::Dequeue { reason } => write!(f, "dequeue ({reason})"),
            Self::Retry => write!(f, "retry"),
        }
    }
}

/// Result of an update-branch call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchUpdate {
    /// The platform accepted the update
    Updated,
    /// The expected head SHA no longer matched (concurrent push)
    PreconditionFailed,
}

/// Result of a merge operation
#[derive(Debug, Clone)]
pub struct MergeResult {
    /// Whether the merge was successful
    pub merged: bool,
    /// The SHA of the merge commit (if successful)
    pub sha: Option<String>,
    /// Message from the merge operation (especially on failure)
    pub message: Option<String>,
}

/// Merge strategy/method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeMethod {
    /// Squash all commits into one
    Squash,
    /// Create a merge commit
    Merge,
    /// Rebase commits onto base branch
    Rebase,
}

impl std::fmt::Display for MergeMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Squash => write!(f, "squash"),
            Self::Merge => write!(f, "merge"),
            Self::Rebase => write!(f, "rebase"),
        }
    }
}

impl std::str::FromStr for MergeMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "squash" => Ok(Self::Squash),
            "merge" => Ok(Self::Merge),
            "rebase" => Ok(Self::Rebase),
            other => Err(format!(
                "unknown merge method '{other}' (expected squash, merge, or rebase)"
            )),
        }
    }
}

/// Repository coordinates for the platform service
#[derive(Debug, Clone)]
pub struct RepoConfig {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Custom host (None for github.com)
    pub host: Option<String>,
}

impl RepoConfig {
    /// Parse an `owner/name` slug as used by `GITHUB_REPOSITORY`
    pub fn from_slug(slug: &str, host: Option<String>) -> crate::error::Result<Self> {
        match slug.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() => Ok(Self {
                owner: owner.to_string(),
                repo: repo.to_string(),
                host,
            }),
            _ => Err(crate::error::Error::Config(format!(
                "invalid repository slug '{slug}' (expected owner/name)"
            ))),
        }
    }
}
