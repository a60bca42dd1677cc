//! Gate pipeline - pure eligibility predicates for a single queued PR
//!
//! The gates run in a fixed order: approval, conflicts, freshness, CI.
//! Approval and conflicts are cheap platform reads and must gate before the
//! more expensive branch-compare and check-list calls; freshness must gate
//! before CI because a stale branch's green CI is not trustworthy for merge.
//!
//! No I/O happens here. The orchestrator interleaves platform reads with
//! these predicates and short-circuits on the first settled outcome.

use crate::types::{
    BranchFreshness, CheckConclusion, CheckRun, CheckRunStatus, CheckState, MergeableState,
    Outcome, ReviewState,
};

/// Result of one gate: either the pipeline proceeds, or the cycle's outcome
/// is settled and later gates are never consulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateResult {
    /// This gate passed; evaluate the next one
    Proceed,
    /// The outcome is decided; stop evaluating
    Settle(Outcome),
}

/// Gate 1: approval.
///
/// Fails closed with a Skip, never a Dequeue: a PR can legitimately lose and
/// regain approval while queued, so losing it is not grounds for eviction.
pub fn approval_gate(review: ReviewState) -> GateResult {
    match review {
        ReviewState::Approved => GateResult::Proceed,
        ReviewState::NotApproved => GateResult::Settle(Outcome::Skip {
            reason: "not approved".to_string(),
        }),
    }
}

/// Gate 2: merge conflicts.
///
/// `Unknown` means the platform has not finished computing mergeability;
/// that is a retry, never an inference in either direction.
pub fn conflict_gate(state: MergeableState) -> GateResult {
    match state {
        MergeableState::Mergeable => GateResult::Proceed,
        MergeableState::Conflicting => GateResult::Settle(Outcome::Dequeue {
            reason: "merge conflicts".to_string(),
        }),
        MergeableState::Unknown => GateResult::Settle(Outcome::Retry),
    }
}

/// Gate 3: branch freshness.
///
/// A head behind its base gets one update-branch action and nothing else this
/// cycle; its CI results are for the stale merge base and are never consulted.
pub fn freshness_gate(freshness: BranchFreshness) -> GateResult {
    if freshness.is_current() {
        GateResult::Proceed
    } else {
        GateResult::Settle(Outcome::UpdateBranch)
    }
}

/// Classify the aggregate CI state of a head commit's check runs, excluding
/// runs whose name starts with `self_prefix` (this system's own job would
/// otherwise deadlock the queue waiting on itself).
///
/// An empty list is Pending, never Success: merging before CI has even
/// registered would be a vacuous pass.
pub fn classify_checks(runs: &[CheckRun], self_prefix: &str) -> CheckState {
    let mut saw_any = false;
    let mut has_pending = false;
    let mut has_unknown = false;

    for run in runs {
        if run.name.starts_with(self_prefix) {
            continue;
        }
        saw_any = true;

        match run.status {
            CheckRunStatus::Completed => match run.conclusion {
                Some(
                    CheckConclusion::Failure
                    | CheckConclusion::Cancelled
                    | CheckConclusion::TimedOut
                    | CheckConclusion::ActionRequired
                    | CheckConclusion::Stale
                    | CheckConclusion::StartupFailure,
                ) => return CheckState::Failure,
                Some(
                    CheckConclusion::Success | CheckConclusion::Neutral | CheckConclusion::Skipped,
                ) => {}
                // Completed with no conclusion or one we don't recognize
                Some(CheckConclusion::Other) | None => has_unknown = true,
            },
            CheckRunStatus::Queued
            | CheckRunStatus::InProgress
            | CheckRunStatus::Pending
            | CheckRunStatus::Waiting
            | CheckRunStatus::Requested => has_pending = true,
            CheckRunStatus::Other => has_unknown = true,
        }
    }

    if !saw_any {
        CheckState::Pending
    } else if has_pending {
        CheckState::Pending
    } else if has_unknown {
        CheckState::Unknown
    } else {
        CheckState::Success
    }
}

/// Gate 4: CI dispatch. Always settles the cycle.
pub fn ci_gate(state: CheckState) -> Outcome {
    match state {
        CheckState::Success => Outcome::Merge,
        CheckState::Pending | CheckState::Unknown => Outcome::Retry,
        CheckState::Failure => Outcome::Dequeue {
            reason: "CI failed".to_string(),
        },
    }
}
