//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::RepoService;
use crate::types::{
    BranchFreshness, BranchUpdate, CheckRun, MergeMethod, MergeResult, MergeableState, QueuedPr,
    RepoConfig, ReviewState,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use octocrab::Octocrab;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Timeout for raw HTTP requests; octocrab carries its own defaults.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

// GraphQL response types for queue listing and review decisions

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
struct QueuedPrsData {
    repository: QueuedPrsRepository,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueuedPrsRepository {
    pull_requests: QueuedPrsConnection,
}

#[derive(Deserialize)]
struct QueuedPrsConnection {
    nodes: Vec<GraphQlQueuedPr>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphQlQueuedPr {
    number: u64,
    created_at: DateTime<Utc>,
    head_ref_name: String,
    head_ref_oid: String,
    title: String,
    url: String,
}

impl From<GraphQlQueuedPr> for QueuedPr {
    fn from(pr: GraphQlQueuedPr) -> Self {
        Self {
            number: pr.number,
            created_at: pr.created_at,
            head_ref: pr.head_ref_name,
            head_sha: pr.head_ref_oid,
            title: pr.title,
            html_url: pr.url,
        }
    }
}

#[derive(Deserialize)]
struct ReviewDecisionData {
    repository: ReviewDecisionRepository,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReviewDecisionRepository {
    pull_request: Option<ReviewDecisionPr>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReviewDecisionPr {
    review_decision: Option<String>,
}

/// GitHub service using octocrab
pub struct GitHubService {
    client: Octocrab,
    config: RepoConfig,
    /// Token for raw HTTP requests (compare, update-branch, check runs)
    token: String,
    /// HTTP client for raw requests
    http_client: Client,
    /// API host for raw requests
    api_host: String,
}

impl GitHubService {
    /// Create a new GitHub service
    pub fn new(token: &str, config: RepoConfig) -> Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());

        let api_host = if let Some(ref h) = config.host {
            let base_url = format!("https://{h}/api/v3");
            builder = builder
                .base_uri(&base_url)
                .map_err(|e| Error::GitHubApi(e.to_string()))?;
            format!("{h}/api/v3")
        } else {
            "api.github.com".to_string()
        };

        let client = builder
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        let http_client = Client::builder()
            .user_agent("mergeq")
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::GitHubApi(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config,
            token: token.to_string(),
            http_client,
            api_host,
        })
    }

    /// Build a raw GET request with the standard GitHub headers
    fn rest_get(&self, url: &str) -> reqwest::RequestBuilder {
        self.http_client
            .get(url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
    }
}

#[async_trait]
impl RepoService for GitHubService {
    async fn list_queued_prs(&self, label: &str, base: &str) -> Result<Vec<QueuedPr>> {
        debug!(label, base, "listing queued PRs");

        // Label and base filters are applied platform-side so the queue is
        // exactly what GitHub reports, never a client-side reconstruction.
        let response: GraphQlResponse<QueuedPrsData> = self
            .client
            .graphql(&serde_json::json!({
                "query": r"
                    query QueuedPullRequests($owner: String!, $name: String!, $base: String!, $label: String!) {
                        repository(owner: $owner, name: $name) {
                            pullRequests(
                                states: OPEN,
                                baseRefName: $base,
                                labels: [$label],
                                first: 100,
                                orderBy: { field: CREATED_AT, direction: ASC }
                            ) {
                                nodes {
                                    number
                                    createdAt
                                    headRefName
                                    headRefOid
                                    title
                                    url
                                }
                            }
                        }
                    }
                ",
                "variables": {
                    "owner": self.config.owner,
                    "name": self.config.repo,
                    "base": base,
                    "label": label,
                }
            }))
            .await
            .map_err(|e| Error::GitHubApi(format!("GraphQL query failed: {e}")))?;

        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            let messages: Vec<_> = errors.into_iter().map(|e| e.message).collect();
            return Err(Error::GitHubApi(format!(
                "GraphQL error: {}",
                messages.join(", ")
            )));
        }

        let data = response
            .data
            .ok_or_else(|| Error::GitHubApi("No data in GraphQL response".to_string()))?;

        let prs: Vec<QueuedPr> = data
            .repository
            .pull_requests
            .nodes
            .into_iter()
            .map(Into::into)
            .collect();

        debug!(count = prs.len(), "listed queued PRs");
        Ok(prs)
    }

    async fn review_decision(&self, pr_number: u64) -> Result<ReviewState> {
        debug!(pr_number, "fetching review decision");

        let response: GraphQlResponse<ReviewDecisionData> = self
            .client
            .graphql(&serde_json::json!({
                "query": r"
                    query ReviewDecision($owner: String!, $name: String!, $number: Int!) {
                        repository(owner: $owner, name: $name) {
                            pullRequest(number: $number) {
                                reviewDecision
                            }
                        }
                    }
                ",
                "variables": {
                    "owner": self.config.owner,
                    "name": self.config.repo,
                    "number": pr_number,
                }
            }))
            .await
            .map_err(|e| Error::GitHubApi(format!("GraphQL query failed: {e}")))?;

        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            let messages: Vec<_> = errors.into_iter().map(|e| e.message).collect();
            return Err(Error::GitHubApi(format!(
                "GraphQL error: {}",
                messages.join(", ")
            )));
        }

        let decision = response
            .data
            .ok_or_else(|| Error::GitHubApi("No data in GraphQL response".to_string()))?
            .repository
            .pull_request
            .and_then(|pr| pr.review_decision);

        // Repositories without required reviews report no decision at all;
        // that is still not an approval.
        let state = match decision.as_deref() {
            Some("APPROVED") => ReviewState::Approved,
            _ => ReviewState::NotApproved,
        };

        debug!(pr_number, state = ?state, "review decision");
        Ok(state)
    }

    async fn mergeable_state(&self, pr_number: u64) -> Result<MergeableState> {
        debug!(pr_number, "fetching mergeable state");

        let pr = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .get(pr_number)
            .await?;

        let state = match pr.mergeable {
            Some(true) => MergeableState::Mergeable,
            Some(false) => MergeableState::Conflicting,
            None => MergeableState::Unknown,
        };

        debug!(pr_number, state = ?state, "mergeable state");
        Ok(state)
    }

    async fn compare_branches(&self, base: &str, head: &str) -> Result<BranchFreshness> {
        #[derive(Deserialize)]
        struct Comparison {
            behind_by: u64,
        }

        debug!(base, head, "comparing branches");

        let url = format!(
            "https://{}/repos/{}/{}/compare/{}...{}",
            self.api_host, self.config.owner, self.config.repo, base, head
        );

        let response = self
            .rest_get(&url)
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to compare branches: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::GitHubApi(format!(
                "Branch compare returned {}",
                response.status()
            )));
        }

        let comparison: Comparison = response
            .json()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to parse comparison: {e}")))?;

        debug!(base, head, behind_by = comparison.behind_by, "compared branches");
        Ok(BranchFreshness {
            behind_by: comparison.behind_by,
        })
    }

    async fn update_branch(
        &self,
        pr_number: u64,
        expected_head_sha: &str,
    ) -> Result<BranchUpdate> {
        debug!(pr_number, expected_head_sha, "updating branch");

        let url = format!(
            "https://{}/repos/{}/{}/pulls/{}/update-branch",
            self.api_host, self.config.owner, self.config.repo, pr_number
        );

        let response = self
            .http_client
            .put(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .json(&serde_json::json!({ "expected_head_sha": expected_head_sha }))
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to update branch: {e}")))?;

        // 422 means the expected head SHA no longer matches: someone pushed
        // between our snapshot and this call. That is the optimistic-
        // concurrency precondition doing its job, not a failure of ours.
        if response.status() == reqwest::StatusCode::UNPROCESSABLE_ENTITY {
            debug!(pr_number, "update-branch precondition failed");
            return Ok(BranchUpdate::PreconditionFailed);
        }

        if !response.status().is_success() {
            return Err(Error::GitHubApi(format!(
                "Branch update returned {}",
                response.status()
            )));
        }

        debug!(pr_number, "branch update accepted");
        Ok(BranchUpdate::Updated)
    }

    async fn list_checks(&self, head_sha: &str) -> Result<Vec<CheckRun>> {
        #[derive(Deserialize)]
        struct CheckRunsResponse {
            check_runs: Vec<CheckRun>,
        }

        debug!(head_sha, "listing check runs");

        let url = format!(
            "https://{}/repos/{}/{}/commits/{}/check-runs?per_page=100",
            self.api_host, self.config.owner, self.config.repo, head_sha
        );

        let response = self
            .rest_get(&url)
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to fetch check runs: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::GitHubApi(format!(
                "Check runs returned {}",
                response.status()
            )));
        }

        let check_runs: CheckRunsResponse = response
            .json()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to parse check runs: {e}")))?;

        debug!(head_sha, count = check_runs.check_runs.len(), "listed check runs");
        Ok(check_runs.check_runs)
    }

    async fn merge_pr(&self, pr_number: u64, method: MergeMethod) -> Result<MergeResult> {
        debug!(pr_number, %method, "merging PR");

        let octocrab_method = match method {
            MergeMethod::Squash => octocrab::params::pulls::MergeMethod::Squash,
            MergeMethod::Merge => octocrab::params::pulls::MergeMethod::Merge,
            MergeMethod::Rebase => octocrab::params::pulls::MergeMethod::Rebase,
        };

        let result = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .merge(pr_number)
            .method(octocrab_method)
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Merge failed: {e}")))?;

        let merge_result = MergeResult {
            merged: result.merged,
            sha: result.sha,
            message: result.message,
        };

        debug!(
            pr_number,
            merged = merge_result.merged,
            sha = ?merge_result.sha,
            "merge complete"
        );
        Ok(merge_result)
    }

    async fn delete_branch(&self, branch: &str) -> Result<()> {
        debug!(branch, "deleting branch");

        let url = format!(
            "https://{}/repos/{}/{}/git/refs/heads/{}",
            self.api_host, self.config.owner, self.config.repo, branch
        );

        let response = self
            .http_client
            .delete(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to delete branch: {e}")))?;

        // 422 means the ref is already gone (e.g. auto-delete on merge);
        // deleting an absent branch is a harmless repeat.
        if !response.status().is_success()
            && response.status() != reqwest::StatusCode::UNPROCESSABLE_ENTITY
        {
            return Err(Error::GitHubApi(format!(
                "Branch delete returned {}",
                response.status()
            )));
        }

        debug!(branch, "deleted branch");
        Ok(())
    }

    async fn remove_label(&self, pr_number: u64, label: &str) -> Result<()> {
        debug!(pr_number, label, "removing label");
        self.client
            .issues(&self.config.owner, &self.config.repo)
            .remove_label(pr_number, label)
            .await?;
        debug!(pr_number, label, "removed label");
        Ok(())
    }

    async fn post_comment(&self, pr_number: u64, body: &str) -> Result<()> {
        debug!(pr_number, "creating PR comment");
        self.client
            .issues(&self.config.owner, &self.config.repo)
            .create_comment(pr_number, body)
            .await?;
        debug!(pr_number, "created PR comment");
        Ok(())
    }

    fn config(&self) -> &RepoConfig {
        &self.config
    }
}
