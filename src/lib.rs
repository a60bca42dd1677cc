//! merge-queue: a label-driven merge queue for GitHub pull requests
//!
//! Applying the queue label to a PR requests automated merging. Each
//! invocation runs one cycle: pick the oldest labeled PR, pass it through the
//! gates (approval, conflicts, branch freshness, CI), apply at most one
//! mutating action, and exit. Repeated scheduled invocations provide the loop;
//! the label on the platform is the only queue state there is.

pub mod auth;
pub mod config;
pub mod cycle;
pub mod error;
pub mod gate;
pub mod platform;
pub mod queue;
pub mod report;
pub mod types;
