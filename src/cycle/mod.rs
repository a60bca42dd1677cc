//! Cycle orchestration - one end-to-end queue pass per invocation
//!
//! A cycle moves through the phases Idle, Selecting, Evaluating, Acting,
//! Done. It selects at most one candidate PR, interleaves fresh platform
//! reads with the pure gates, and applies at most one mutating action before
//! terminating. There is no loop over multiple PRs: the external scheduler
//! provides the loop across cycles, and the next invocation is the universal
//! retry mechanism.

use crate::config::QueueConfig;
use crate::error::Result;
use crate::gate::{approval_gate, ci_gate, classify_checks, conflict_gate, freshness_gate, GateResult};
use crate::platform::RepoService;
use crate::queue::select_candidate;
use crate::report::apply_outcome;
use crate::types::{Outcome, QueuedPr};
use tracing::{debug, info, warn};

/// The phases a cycle moves through, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePhase {
    /// Not yet started
    Idle,
    /// Listing the queue and picking the candidate
    Selecting,
    /// Running the candidate through the gate pipeline
    Evaluating,
    /// Applying the settled outcome's side effect
    Acting,
    /// Terminal; the invocation ends here regardless of Acting's result
    Done,
}

impl std::fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Selecting => write!(f, "selecting"),
            Self::Evaluating => write!(f, "evaluating"),
            Self::Acting => write!(f, "acting"),
            Self::Done => write!(f, "done"),
        }
    }
}

/// How a cycle ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleEnd {
    /// No PR carries the queue label; nothing to do
    QueueEmpty,
    /// The candidate was left queued without any action
    Skipped {
        /// Candidate PR number
        pr: u64,
        /// Why it was skipped
        reason: String,
    },
    /// The candidate's head branch was brought up to date
    Updated {
        /// Candidate PR number
        pr: u64,
    },
    /// The candidate was merged
    Merged {
        /// Candidate PR number
        pr: u64,
        /// Merge commit SHA, when the platform reported one
        sha: Option<String>,
    },
    /// The candidate left the queue (label removed, comment posted)
    Dequeued {
        /// Candidate PR number
        pr: u64,
        /// Why it was dequeued
        reason: String,
    },
    /// Nothing was done this cycle; the next one re-evaluates
    Retrying {
        /// Candidate PR number, when one had been selected
        pr: Option<u64>,
        /// Why the cycle ended early
        reason: String,
    },
}

impl std::fmt::Display for CycleEnd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::QueueEmpty => write!(f, "queue is empty"),
            Self::Skipped { pr, reason } => write!(f, "skipped PR #{pr}: {reason}"),
            Self::Updated { pr } => write!(f, "updated branch of PR #{pr}"),
            Self::Merged { pr, sha } => match sha {
                Some(sha) => write!(f, "merged PR #{pr} as {sha}"),
                None => write!(f, "merged PR #{pr}"),
            },
            Self::Dequeued { pr, reason } => write!(f, "dequeued PR #{pr}: {reason}"),
            Self::Retrying { pr: Some(pr), reason } => {
                write!(f, "retrying PR #{pr} next cycle: {reason}")
            }
            Self::Retrying { pr: None, reason } => write!(f, "retrying next cycle: {reason}"),
        }
    }
}

/// Select this cycle's candidate and run it through the gate pipeline.
///
/// Returns `None` when the queue is empty. Platform reads happen gate by
/// gate, cheapest first, and stop at the first settled outcome; a PR that
/// fails approval never costs a branch compare or a check listing.
pub async fn evaluate_queue(
    client: &dyn RepoService,
    config: &QueueConfig,
) -> Result<Option<(QueuedPr, Outcome)>> {
    debug!(phase = %CyclePhase::Selecting, "cycle phase");

    let prs = client
        .list_queued_prs(&config.label, &config.base_branch)
        .await?;
    let Some(candidate) = select_candidate(&prs).cloned() else {
        debug!("no queued PRs");
        return Ok(None);
    };

    info!(
        pr = candidate.number,
        title = %candidate.title,
        queued = prs.len(),
        "selected candidate"
    );
    debug!(phase = %CyclePhase::Evaluating, "cycle phase");

    let outcome = evaluate_pr(client, config, &candidate).await?;
    info!(pr = candidate.number, outcome = %outcome, "pipeline settled");
    Ok(Some((candidate, outcome)))
}

/// Run one PR through the gates, in the fixed order, short-circuiting.
async fn evaluate_pr(
    client: &dyn RepoService,
    config: &QueueConfig,
    pr: &QueuedPr,
) -> Result<Outcome> {
    let review = client.review_decision(pr.number).await?;
    if let GateResult::Settle(outcome) = approval_gate(review) {
        return Ok(outcome);
    }

    let mergeable = client.mergeable_state(pr.number).await?;
    if let GateResult::Settle(outcome) = conflict_gate(mergeable) {
        return Ok(outcome);
    }

    let freshness = client
        .compare_branches(&config.base_branch, &pr.head_ref)
        .await?;
    if let GateResult::Settle(outcome) = freshness_gate(freshness) {
        return Ok(outcome);
    }

    let checks = client.list_checks(&pr.head_sha).await?;
    let state = classify_checks(&checks, &config.self_check_prefix);
    debug!(pr = pr.number, state = ?state, "classified checks");
    Ok(ci_gate(state))
}

/// Run one complete cycle: select, evaluate, act, done.
///
/// Never fails: every platform error inside the cycle is logged and collapses
/// into `Retrying`, because the next scheduled invocation re-reads everything
/// fresh anyway.
pub async fn run_cycle(client: &dyn RepoService, config: &QueueConfig) -> CycleEnd {
    debug!(phase = %CyclePhase::Idle, "cycle phase");

    let evaluated = match evaluate_queue(client, config).await {
        Ok(evaluated) => evaluated,
        Err(e) => {
            warn!(error = %e, "cycle aborted by platform error");
            return CycleEnd::Retrying {
                pr: None,
                reason: e.to_string(),
            };
        }
    };

    let Some((pr, outcome)) = evaluated else {
        debug!(phase = %CyclePhase::Done, "cycle phase");
        return CycleEnd::QueueEmpty;
    };

    debug!(phase = %CyclePhase::Acting, "cycle phase");
    let end = apply_outcome(client, config, &pr, &outcome).await;

    debug!(phase = %CyclePhase::Done, "cycle phase");
    info!(end = %end, "cycle complete");
    end
}
