//! Shared command context for CLI commands
//!
//! Extracts the setup code shared by the run and status commands.

use merge_queue::auth::get_github_auth;
use merge_queue::config::QueueConfig;
use merge_queue::error::{Error, Result};
use merge_queue::platform::{GitHubService, RepoService};
use merge_queue::types::{MergeMethod, RepoConfig};
use std::path::Path;

/// Shared context for CLI commands that interact with the platform
///
/// Encapsulates the common setup: loading the config file, applying flag
/// overrides, resolving the repository slug and token, and creating the
/// platform service.
pub struct CommandContext {
    /// Queue configuration after file + flag resolution
    pub config: QueueConfig,
    /// Platform service for the target repository
    pub client: Box<dyn RepoService>,
}

/// Flag-level overrides applied on top of the config file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override for the base branch
    pub base_branch: Option<String>,
    /// Override for the queue label
    pub label: Option<String>,
    /// Override for the merge method
    pub merge_method: Option<MergeMethod>,
}

impl CommandContext {
    /// Create a new command context
    pub fn new(
        config_path: &Path,
        repo_slug: Option<&str>,
        host: Option<String>,
        overrides: ConfigOverrides,
    ) -> Result<Self> {
        let mut config = QueueConfig::load_or_default(config_path)?;

        if let Some(base_branch) = overrides.base_branch {
            config.base_branch = base_branch;
        }
        if let Some(label) = overrides.label {
            config.label = label;
        }
        if let Some(merge_method) = overrides.merge_method {
            config.merge_method = merge_method;
        }

        let slug = match repo_slug {
            Some(slug) => slug.to_string(),
            None => std::env::var("GITHUB_REPOSITORY").map_err(|_| {
                Error::Config(
                    "no repository given: pass --repo owner/name or set GITHUB_REPOSITORY"
                        .to_string(),
                )
            })?,
        };
        let repo_config = RepoConfig::from_slug(&slug, host)?;

        let auth = get_github_auth()?;
        let client = GitHubService::new(&auth.token, repo_config)?;

        Ok(Self {
            config,
            client: Box::new(client),
        })
    }
}
