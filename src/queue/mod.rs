//! Queue selection - pure ordering over queued PR snapshots
//!
//! The label on the platform is the only durable queue membership marker;
//! this module just imposes a deterministic order on what the platform
//! reports and picks the single candidate for the cycle.

use crate::types::QueuedPr;

/// Pick the candidate PR for this cycle: oldest `created_at` first (FIFO),
/// ties broken by ascending PR number.
///
/// FIFO keeps exactly one PR "in flight" at a time, so two PRs never
/// invalidate each other's freshness by racing branch updates. The number
/// tie-break makes selection stable even under clock skew between PR
/// creation timestamps.
pub fn select_candidate(prs: &[QueuedPr]) -> Option<&QueuedPr> {
    prs.iter().min_by_key(|pr| (pr.created_at, pr.number))
}
