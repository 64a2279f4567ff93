//! Run configuration — repository coordinates, credential, API root.
//!
//! Built exactly once (in the binary's entry point) and threaded as an
//! immutable reference to every component; nothing below this layer reads
//! the process environment.

use crate::error::ConfigError;
use crate::types::{Owner, RepoName};

/// Default GitHub REST API root, overridable via `GITHUB_API_URL`.
pub const DEFAULT_API_ROOT: &str = "https://api.github.com";

/// Immutable per-invocation configuration.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub owner: Owner,
    pub repo: RepoName,
    /// Bearer credential for the REST API.
    pub token: String,
    /// API root URL, without a trailing slash.
    pub api_root: String,
    pub verbose: bool,
}

impl RunConfig {
    /// Assemble the configuration from the conventional Actions environment:
    /// `GITHUB_REPOSITORY` (`owner/repo`), `INPUT_GITHUB_TOKEN`, and an
    /// optional `GITHUB_API_URL` override.
    pub fn from_env(verbose: bool) -> Result<Self, ConfigError> {
        let repository =
            std::env::var("GITHUB_REPOSITORY").map_err(|_| ConfigError::MissingRepository)?;
        let (owner, repo) = match repository.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() => {
                (Owner::from(owner), RepoName::from(repo))
            }
            _ => return Err(ConfigError::InvalidRepository { value: repository }),
        };

        let token = std::env::var("INPUT_GITHUB_TOKEN")
            .ok()
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let api_root = std::env::var("GITHUB_API_URL")
            .ok()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_API_ROOT.to_owned());

        Ok(RunConfig {
            owner,
            repo,
            token,
            api_root: api_root.trim_end_matches('/').to_owned(),
            verbose,
        })
    }
}
