//! Queue configuration: defaults, optional TOML file, CLI overrides.

use crate::error::{Error, Result};
use crate::types::MergeMethod;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default name of the queue label.
const DEFAULT_LABEL: &str = "queue";

/// Default base branch PRs are merged into.
const DEFAULT_BASE_BRANCH: &str = "main";

/// Default prefix identifying this system's own check runs.
///
/// Checks whose name starts with this prefix are excluded from CI
/// classification so a cycle never waits on its own still-running job.
const DEFAULT_SELF_CHECK_PREFIX: &str = "merge-queue";

/// Configuration for the queue-processing cycle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct QueueConfig {
    /// Branch PRs are merged into
    pub base_branch: String,
    /// Label marking a PR as queued
    pub label: String,
    /// Merge method used when a PR clears all gates
    pub merge_method: MergeMethod,
    /// Check-name prefix excluded from CI classification (this system's own jobs)
    pub self_check_prefix: String,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            base_branch: DEFAULT_BASE_BRANCH.to_string(),
            label: DEFAULT_LABEL.to_string(),
            merge_method: MergeMethod::Squash,
            self_check_prefix: DEFAULT_SELF_CHECK_PREFIX.to_string(),
        }
    }
}

impl QueueConfig {
    /// Load configuration from a TOML file.
    ///
    /// Missing keys fall back to defaults. A missing file is an error; callers
    /// that treat the file as optional should check existence first.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))?;

        Ok(config)
    }

    /// Load from `path` if it exists, otherwise return defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}
