//! Outcome reporting - effectful dispatch of a settled cycle outcome
//!
//! Maps each `Outcome` to its externally visible effect: nothing for Skip and
//! Retry, one branch update, one merge (plus head-branch cleanup), or one
//! label removal with an explanatory comment. Acting always runs to
//! completion: side-effect failures are logged and surface as a retry, never
//! as a process failure, because the next scheduled cycle re-evaluates from
//! scratch.

use crate::config::QueueConfig;
use crate::cycle::CycleEnd;
use crate::platform::RepoService;
use crate::types::{BranchUpdate, Outcome, QueuedPr};
use tracing::{info, warn};

/// Build the comment posted when a PR is dequeued.
///
/// Every dequeue pairs the label removal with a human-readable cause and the
/// instructions for re-entering the queue.
pub fn dequeue_comment(label: &str, reason: &str) -> String {
    format!(
        "🚦 This PR was removed from the merge queue: **{reason}**.\n\n\
         Once the problem is fixed, add the `{label}` label again to re-queue it."
    )
}

/// Apply a settled outcome's side effect via the platform client.
///
/// At most one mutating action happens here, and the function always returns
/// a terminal `CycleEnd` for the invocation.
pub async fn apply_outcome(
    client: &dyn RepoService,
    config: &QueueConfig,
    pr: &QueuedPr,
    outcome: &Outcome,
) -> CycleEnd {
    match outcome {
        Outcome::Skip { reason } => CycleEnd::Skipped {
            pr: pr.number,
            reason: reason.clone(),
        },

        Outcome::Retry => CycleEnd::Retrying {
            pr: Some(pr.number),
            reason: "waiting for platform state to settle".to_string(),
        },

        Outcome::UpdateBranch => {
            // The snapshot's head SHA is the optimistic-concurrency guard: if
            // anyone pushed since we read it, the platform refuses and the
            // next cycle re-evaluates the new head.
            match client.update_branch(pr.number, &pr.head_sha).await {
                Ok(BranchUpdate::Updated) => {
                    info!(pr = pr.number, "branch update requested");
                    CycleEnd::Updated { pr: pr.number }
                }
                Ok(BranchUpdate::PreconditionFailed) => {
                    info!(pr = pr.number, "head moved concurrently; will re-evaluate");
                    CycleEnd::Retrying {
                        pr: Some(pr.number),
                        reason: "head moved during branch update".to_string(),
                    }
                }
                Err(e) => {
                    warn!(pr = pr.number, error = %e, "branch update failed");
                    CycleEnd::Retrying {
                        pr: Some(pr.number),
                        reason: e.to_string(),
                    }
                }
            }
        }

        Outcome::Merge => match client.merge_pr(pr.number, config.merge_method).await {
            Ok(result) if result.merged => {
                info!(pr = pr.number, sha = ?result.sha, "merged");
                // Head cleanup is best-effort: the merge already happened and
                // a leftover branch is harmless.
                if let Err(e) = client.delete_branch(&pr.head_ref).await {
                    warn!(pr = pr.number, branch = %pr.head_ref, error = %e, "branch delete failed");
                }
                CycleEnd::Merged {
                    pr: pr.number,
                    sha: result.sha,
                }
            }
            Ok(result) => {
                let message = result
                    .message
                    .unwrap_or_else(|| "merge was not performed".to_string());
                warn!(pr = pr.number, message = %message, "merge refused");
                CycleEnd::Retrying {
                    pr: Some(pr.number),
                    reason: message,
                }
            }
            Err(e) => {
                warn!(pr = pr.number, error = %e, "merge failed");
                CycleEnd::Retrying {
                    pr: Some(pr.number),
                    reason: e.to_string(),
                }
            }
        },

        Outcome::Dequeue { reason } => {
            // Both effects are applied even if one fails: a dequeue that lost
            // its comment (or vice versa) is repaired by humans, not by
            // retry loops, and the next cycle no longer sees the label.
            if let Err(e) = client.remove_label(pr.number, &config.label).await {
                warn!(pr = pr.number, error = %e, "label removal failed");
            }
            let body = dequeue_comment(&config.label, reason);
            if let Err(e) = client.post_comment(pr.number, &body).await {
                warn!(pr = pr.number, error = %e, "dequeue comment failed");
            }
            info!(pr = pr.number, reason = %reason, "dequeued");
            CycleEnd::Dequeued {
                pr: pr.number,
                reason: reason.clone(),
            }
        }
    }
}
