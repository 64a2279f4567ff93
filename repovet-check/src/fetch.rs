//! Single-GET setting fetcher.
//!
//! One authenticated read per check, no retries and no backoff: transient
//! errors are the CI environment's responsibility to retry by re-running
//! the tool.

use serde_json::Value;
use tracing::debug;

use repovet_core::RunConfig;

use crate::error::FetchError;

/// Outcome of fetching one check's resource.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched {
    /// Decoded 2xx response body (object or array).
    Body(Value),
    /// The resource path answered 404 — a check failure, not a fatal error.
    Absent,
}

/// Issues authenticated GETs against the configured API root.
pub struct Fetcher {
    agent: ureq::Agent,
    api_root: String,
    token: String,
}

impl Fetcher {
    pub fn new(config: &RunConfig) -> Self {
        Fetcher {
            agent: ureq::agent(),
            api_root: config.api_root.clone(),
            token: config.token.clone(),
        }
    }

    /// GET a fully resolved resource path (e.g.
    /// `repos/octo/widgets/actions/permissions`) relative to the API root.
    pub fn get(&self, path: &str) -> Result<Fetched, FetchError> {
        let url = format!("{}/{}", self.api_root, path.trim_start_matches('/'));
        debug!("GET {url}");

        let response = self
            .agent
            .get(&url)
            .set("Authorization", &format!("Bearer {}", self.token))
            .set("Accept", "application/vnd.github+json")
            .set("X-GitHub-Api-Version", "2022-11-28")
            .call();

        match response {
            Ok(resp) => {
                let body: Value = resp
                    .into_json()
                    .map_err(|source| FetchError::Decode { url, source })?;
                Ok(Fetched::Body(body))
            }
            Err(ureq::Error::Status(404, _)) => {
                debug!("{url} answered 404");
                Ok(Fetched::Absent)
            }
            Err(ureq::Error::Status(status, _)) => Err(FetchError::Status { status, url }),
            Err(ureq::Error::Transport(transport)) => Err(FetchError::Transport {
                url,
                source: Box::new(transport),
            }),
        }
    }
}
