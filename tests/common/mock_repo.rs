//! Mock repository service for testing
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use async_trait::async_trait;
use merge_queue::error::{Error, Result};
use merge_queue::platform::RepoService;
use merge_queue::types::{
    BranchFreshness, BranchUpdate, CheckRun, MergeMethod, MergeResult, MergeableState, QueuedPr,
    RepoConfig, ReviewState,
};
use std::collections::HashMap;
use std::sync::Mutex;

/// Call record for `update_branch`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateBranchCall {
    pub pr_number: u64,
    pub expected_head_sha: String,
}

/// Call record for `merge_pr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePrCall {
    pub pr_number: u64,
    pub method: MergeMethod,
}

/// Call record for `remove_label`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveLabelCall {
    pub pr_number: u64,
    pub label: String,
}

/// Call record for `post_comment`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostCommentCall {
    pub pr_number: u64,
    pub body: String,
}

/// Simple mock repository service for testing
///
/// This manually implements `RepoService` rather than using mockall,
/// because mockall has issues with methods returning references.
///
/// Features:
/// - Configurable responses per PR / branch
/// - Call tracking for verification
/// - Error injection for failure path testing
pub struct MockRepoService {
    config: RepoConfig,
    // Response maps
    queued_prs: Mutex<Vec<QueuedPr>>,
    review_responses: Mutex<HashMap<u64, ReviewState>>,
    mergeable_responses: Mutex<HashMap<u64, MergeableState>>,
    compare_responses: Mutex<HashMap<String, BranchFreshness>>,
    update_branch_responses: Mutex<HashMap<u64, BranchUpdate>>,
    check_responses: Mutex<HashMap<String, Vec<CheckRun>>>,
    merge_responses: Mutex<HashMap<u64, MergeResult>>,
    // Call tracking
    list_calls: Mutex<Vec<(String, String)>>,
    review_calls: Mutex<Vec<u64>>,
    mergeable_calls: Mutex<Vec<u64>>,
    compare_calls: Mutex<Vec<(String, String)>>,
    update_branch_calls: Mutex<Vec<UpdateBranchCall>>,
    check_calls: Mutex<Vec<String>>,
    merge_calls: Mutex<Vec<MergePrCall>>,
    delete_branch_calls: Mutex<Vec<String>>,
    remove_label_calls: Mutex<Vec<RemoveLabelCall>>,
    post_comment_calls: Mutex<Vec<PostCommentCall>>,
    // Error injection
    error_on_list: Mutex<Option<String>>,
    error_on_review: Mutex<Option<String>>,
    error_on_update_branch: Mutex<Option<String>>,
    error_on_merge: Mutex<Option<String>>,
    error_on_delete_branch: Mutex<Option<String>>,
    error_on_remove_label: Mutex<Option<String>>,
}

impl MockRepoService {
    /// Create a new mock with the given repo config
    pub fn with_config(config: RepoConfig) -> Self {
        Self {
            config,
            queued_prs: Mutex::new(Vec::new()),
            review_responses: Mutex::new(HashMap::new()),
            mergeable_responses: Mutex::new(HashMap::new()),
            compare_responses: Mutex::new(HashMap::new()),
            update_branch_responses: Mutex::new(HashMap::new()),
            check_responses: Mutex::new(HashMap::new()),
            merge_responses: Mutex::new(HashMap::new()),
            list_calls: Mutex::new(Vec::new()),
            review_calls: Mutex::new(Vec::new()),
            mergeable_calls: Mutex::new(Vec::new()),
            compare_calls: Mutex::new(Vec::new()),
            update_branch_calls: Mutex::new(Vec::new()),
            check_calls: Mutex::new(Vec::new()),
            merge_calls: Mutex::new(Vec::new()),
            delete_branch_calls: Mutex::new(Vec::new()),
            remove_label_calls: Mutex::new(Vec::new()),
            post_comment_calls: Mutex::new(Vec::new()),
            error_on_list: Mutex::new(None),
            error_on_review: Mutex::new(None),
            error_on_update_branch: Mutex::new(None),
            error_on_merge: Mutex::new(None),
            error_on_delete_branch: Mutex::new(None),
            error_on_remove_label: Mutex::new(None),
        }
    }

    // === Response setup ===

    /// Set the queued PRs returned by `list_queued_prs`
    pub fn set_queued_prs(&self, prs: Vec<QueuedPr>) {
        *self.queued_prs.lock().unwrap() = prs;
    }

    /// Set the review decision for a PR
    pub fn set_review(&self, pr_number: u64, state: ReviewState) {
        self.review_responses.lock().unwrap().insert(pr_number, state);
    }

    /// Set the mergeable state for a PR
    pub fn set_mergeable(&self, pr_number: u64, state: MergeableState) {
        self.mergeable_responses
            .lock()
            .unwrap()
            .insert(pr_number, state);
    }

    /// Set how far a head branch is behind the base
    pub fn set_behind_by(&self, head: &str, behind_by: u64) {
        self.compare_responses
            .lock()
            .unwrap()
            .insert(head.to_string(), BranchFreshness { behind_by });
    }

    /// Set the update-branch result for a PR
    pub fn set_update_branch(&self, pr_number: u64, result: BranchUpdate) {
        self.update_branch_responses
            .lock()
            .unwrap()
            .insert(pr_number, result);
    }

    /// Set the check runs for a head SHA
    pub fn set_checks(&self, head_sha: &str, runs: Vec<CheckRun>) {
        self.check_responses
            .lock()
            .unwrap()
            .insert(head_sha.to_string(), runs);
    }

    /// Set the merge result for a PR
    pub fn set_merge(&self, pr_number: u64, result: MergeResult) {
        self.merge_responses.lock().unwrap().insert(pr_number, result);
    }

    /// Helper: configure a PR that clears every gate and merges cleanly
    pub fn setup_mergeable_pr(&self, pr: &QueuedPr) {
        self.set_review(pr.number, ReviewState::Approved);
        self.set_mergeable(pr.number, MergeableState::Mergeable);
        self.set_behind_by(&pr.head_ref, 0);
        self.set_checks(
            &pr.head_sha,
            vec![CheckRun {
                name: "build".to_string(),
                status: merge_queue::types::CheckRunStatus::Completed,
                conclusion: Some(merge_queue::types::CheckConclusion::Success),
            }],
        );
        self.set_merge(
            pr.number,
            MergeResult {
                merged: true,
                sha: Some(format!("merged-{}", pr.number)),
                message: None,
            },
        );
    }

    // === Error injection ===

    /// Make `list_queued_prs` return an error
    pub fn fail_list(&self, msg: &str) {
        *self.error_on_list.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `review_decision` return an error
    pub fn fail_review(&self, msg: &str) {
        *self.error_on_review.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `update_branch` return an error
    pub fn fail_update_branch(&self, msg: &str) {
        *self.error_on_update_branch.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `merge_pr` return an error
    pub fn fail_merge(&self, msg: &str) {
        *self.error_on_merge.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `delete_branch` return an error
    pub fn fail_delete_branch(&self, msg: &str) {
        *self.error_on_delete_branch.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `remove_label` return an error
    pub fn fail_remove_label(&self, msg: &str) {
        *self.error_on_remove_label.lock().unwrap() = Some(msg.to_string());
    }

    // === Call verification ===

    /// All `update_branch` calls
    pub fn update_branch_calls(&self) -> Vec<UpdateBranchCall> {
        self.update_branch_calls.lock().unwrap().clone()
    }

    /// All `merge_pr` calls
    pub fn merge_calls(&self) -> Vec<MergePrCall> {
        self.merge_calls.lock().unwrap().clone()
    }

    /// All `delete_branch` calls
    pub fn delete_branch_calls(&self) -> Vec<String> {
        self.delete_branch_calls.lock().unwrap().clone()
    }

    /// All `remove_label` calls
    pub fn remove_label_calls(&self) -> Vec<RemoveLabelCall> {
        self.remove_label_calls.lock().unwrap().clone()
    }

    /// All `post_comment` calls
    pub fn post_comment_calls(&self) -> Vec<PostCommentCall> {
        self.post_comment_calls.lock().unwrap().clone()
    }

    /// All `list_queued_prs` calls as (label, base) pairs
    pub fn list_calls(&self) -> Vec<(String, String)> {
        self.list_calls.lock().unwrap().clone()
    }

    /// All `list_checks` calls
    pub fn check_calls(&self) -> Vec<String> {
        self.check_calls.lock().unwrap().clone()
    }

    /// All `compare_branches` calls as (base, head) pairs
    pub fn compare_calls(&self) -> Vec<(String, String)> {
        self.compare_calls.lock().unwrap().clone()
    }

    /// Number of mutating actions taken: branch updates, merges, and label
    /// removals. Dequeue comments and post-merge branch deletes belong to
    /// the action that caused them and are not counted separately.
    pub fn mutation_count(&self) -> usize {
        self.update_branch_calls.lock().unwrap().len()
            + self.merge_calls.lock().unwrap().len()
            + self.remove_label_calls.lock().unwrap().len()
    }

    /// Assert that `merge_pr` was called for a specific PR
    pub fn assert_merge_called(&self, pr_number: u64) {
        let calls = self.merge_calls();
        assert!(
            calls.iter().any(|c| c.pr_number == pr_number),
            "Expected merge_pr({pr_number}) but got: {calls:?}"
        );
    }

    /// Assert that `merge_pr` was NOT called for a specific PR
    pub fn assert_merge_not_called(&self, pr_number: u64) {
        let calls = self.merge_calls();
        assert!(
            !calls.iter().any(|c| c.pr_number == pr_number),
            "Expected merge_pr({pr_number}) NOT to be called but it was: {calls:?}"
        );
    }

    /// Assert that `update_branch` was called with a specific guard SHA
    pub fn assert_update_branch_called(&self, pr_number: u64, expected_head_sha: &str) {
        let calls = self.update_branch_calls();
        assert!(
            calls
                .iter()
                .any(|c| c.pr_number == pr_number && c.expected_head_sha == expected_head_sha),
            "Expected update_branch({pr_number}, {expected_head_sha}) but got: {calls:?}"
        );
    }
}

#[async_trait]
impl RepoService for MockRepoService {
    async fn list_queued_prs(&self, label: &str, base: &str) -> Result<Vec<QueuedPr>> {
        self.list_calls
            .lock()
            .unwrap()
            .push((label.to_string(), base.to_string()));

        if let Some(msg) = self.error_on_list.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        Ok(self.queued_prs.lock().unwrap().clone())
    }

    async fn review_decision(&self, pr_number: u64) -> Result<ReviewState> {
        self.review_calls.lock().unwrap().push(pr_number);

        if let Some(msg) = self.error_on_review.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        self.review_responses
            .lock()
            .unwrap()
            .get(&pr_number)
            .copied()
            .ok_or_else(|| {
                Error::GitHubApi(format!(
                    "review_decision: no response configured for PR #{pr_number}"
                ))
            })
    }

    async fn mergeable_state(&self, pr_number: u64) -> Result<MergeableState> {
        self.mergeable_calls.lock().unwrap().push(pr_number);

        self.mergeable_responses
            .lock()
            .unwrap()
            .get(&pr_number)
            .copied()
            .ok_or_else(|| {
                Error::GitHubApi(format!(
                    "mergeable_state: no response configured for PR #{pr_number}"
                ))
            })
    }

    async fn compare_branches(&self, base: &str, head: &str) -> Result<BranchFreshness> {
        self.compare_calls
            .lock()
            .unwrap()
            .push((base.to_string(), head.to_string()));

        self.compare_responses
            .lock()
            .unwrap()
            .get(head)
            .copied()
            .ok_or_else(|| {
                Error::GitHubApi(format!(
                    "compare_branches: no response configured for head '{head}'"
                ))
            })
    }

    async fn update_branch(
        &self,
        pr_number: u64,
        expected_head_sha: &str,
    ) -> Result<BranchUpdate> {
        self.update_branch_calls
            .lock()
            .unwrap()
            .push(UpdateBranchCall {
                pr_number,
                expected_head_sha: expected_head_sha.to_string(),
            });

        if let Some(msg) = self.error_on_update_branch.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        Ok(self
            .update_branch_responses
            .lock()
            .unwrap()
            .get(&pr_number)
            .copied()
            .unwrap_or(BranchUpdate::Updated))
    }

    async fn list_checks(&self, head_sha: &str) -> Result<Vec<CheckRun>> {
        self.check_calls.lock().unwrap().push(head_sha.to_string());

        Ok(self
            .check_responses
            .lock()
            .unwrap()
            .get(head_sha)
            .cloned()
            .unwrap_or_default())
    }

    async fn merge_pr(&self, pr_number: u64, method: MergeMethod) -> Result<MergeResult> {
        self.merge_calls
            .lock()
            .unwrap()
            .push(MergePrCall { pr_number, method });

        if let Some(msg) = self.error_on_merge.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        self.merge_responses
            .lock()
            .unwrap()
            .get(&pr_number)
            .cloned()
            .ok_or_else(|| {
                Error::GitHubApi(format!(
                    "merge_pr: no response configured for PR #{pr_number}"
                ))
            })
    }

    async fn delete_branch(&self, branch: &str) -> Result<()> {
        self.delete_branch_calls
            .lock()
            .unwrap()
            .push(branch.to_string());

        if let Some(msg) = self.error_on_delete_branch.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        Ok(())
    }

    async fn remove_label(&self, pr_number: u64, label: &str) -> Result<()> {
        self.remove_label_calls
            .lock()
            .unwrap()
            .push(RemoveLabelCall {
                pr_number,
                label: label.to_string(),
            });

        if let Some(msg) = self.error_on_remove_label.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        Ok(())
    }

    async fn post_comment(&self, pr_number: u64, body: &str) -> Result<()> {
        self.post_comment_calls
            .lock()
            .unwrap()
            .push(PostCommentCall {
                pr_number,
                body: body.to_string(),
            });
        Ok(())
    }

    fn config(&self) -> &RepoConfig {
        &self.config
    }
}
