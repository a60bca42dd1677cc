//! Shared test fixtures

#![allow(dead_code)]

mod mock_repo;

pub use mock_repo::MockRepoService;

use chrono::{TimeZone, Utc};
use merge_queue::config::QueueConfig;
use merge_queue::types::{
    CheckConclusion, CheckRun, CheckRunStatus, QueuedPr, RepoConfig,
};

/// Default test repository coordinates
pub fn test_repo_config() -> RepoConfig {
    RepoConfig {
        owner: "test".to_string(),
        repo: "repo".to_string(),
        host: None,
    }
}

/// Default queue configuration for tests
pub fn test_queue_config() -> QueueConfig {
    QueueConfig::default()
}

/// Build a queued PR snapshot with a creation time offset in seconds
pub fn make_pr(number: u64, created_secs: i64) -> QueuedPr {
    QueuedPr {
        number,
        created_at: Utc.timestamp_opt(1_700_000_000 + created_secs, 0).unwrap(),
        head_ref: format!("feature-{number}"),
        head_sha: format!("sha-{number}"),
        title: format!("Test PR #{number}"),
        html_url: format!("https://github.com/test/repo/pull/{number}"),
    }
}

/// A completed check run
pub fn completed_check(name: &str, conclusion: CheckConclusion) -> CheckRun {
    CheckRun {
        name: name.to_string(),
        status: CheckRunStatus::Completed,
        conclusion: Some(conclusion),
    }
}

/// A check run that is still running
pub fn running_check(name: &str) -> CheckRun {
    CheckRun {
        name: name.to_string(),
        status: CheckRunStatus::InProgress,
        conclusion: None,
    }
}
