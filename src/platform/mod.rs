//! Platform services for the host repository
//!
//! Provides a thin interface over the PR, branch, and check operations the
//! queue cycle consumes.

mod github;

pub use github::GitHubService;

use crate::error::Result;
use crate::types::{
    BranchFreshness, BranchUpdate, CheckRun, MergeMethod, MergeResult, MergeableState, QueuedPr,
    RepoConfig, ReviewState,
};
use async_trait::async_trait;

/// Repository service trait for queue operations
///
/// This trait abstracts the hosting platform's PR/branch/check API so the
/// cycle orchestrator can be tested against a mock. Every method corresponds
/// to one platform call; none of them cache anything between calls.
#[async_trait]
pub trait RepoService: Send + Sync {
    /// List open PRs carrying `label` against `base`, as fresh snapshots.
    ///
    /// Both filters are applied platform-side. Order is unspecified; the
    /// selector imposes the deterministic FIFO order.
    async fn list_queued_prs(&self, label: &str, base: &str) -> Result<Vec<QueuedPr>>;

    /// Get the aggregate review decision for a PR
    async fn review_decision(&self, pr_number: u64) -> Result<ReviewState>;

    /// Get whether a PR merges cleanly into its base
    async fn mergeable_state(&self, pr_number: u64) -> Result<MergeableState>;

    /// Compare `head` against `base`, returning how far behind the head is
    async fn compare_branches(&self, base: &str, head: &str) -> Result<BranchFreshness>;

    /// Update a PR's head branch with the base, guarded by `expected_head_sha`.
    ///
    /// Returns `PreconditionFailed` when the head moved since the snapshot was
    /// taken; this is a non-fatal condition for the caller.
    async fn update_branch(&self, pr_number: u64, expected_head_sha: &str)
    -> Result<BranchUpdate>;

    /// List all check runs on a head commit.
    ///
    /// Self-exclusion by name prefix is the caller's concern; this returns the
    /// raw list.
    async fn list_checks(&self, head_sha: &str) -> Result<Vec<CheckRun>>;

    /// Merge a PR with the specified method
    async fn merge_pr(&self, pr_number: u64, method: MergeMethod) -> Result<MergeResult>;

    /// Delete a branch (after merge)
    async fn delete_branch(&self, branch: &str) -> Result<()>;

    /// Remove a label from a PR
    async fn remove_label(&self, pr_number: u64, label: &str) -> Result<()>;

    /// Create a comment on a PR
    async fn post_comment(&self, pr_number: u64, body: &str) -> Result<()>;

    /// Get the repository configuration
    fn config(&self) -> &RepoConfig;
}
