//! Error types for repovet-check.

use thiserror::Error;

use repovet_template::TemplateError;

/// Fatal fetch-level failures. Any of these aborts the whole run: once the
/// API answers with auth failures, rate limiting, or server errors, the
/// remaining checks could report misleading passes.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Non-2xx, non-404 response (auth failure, rate limit, server error).
    #[error("GET {url} answered HTTP {status}")]
    Status { status: u16, url: String },

    /// Connection-level failure (DNS, TLS, refused, timeout).
    #[error("transport failure for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<ureq::Transport>,
    },

    /// A 2xx response whose body was not valid JSON.
    #[error("failed to decode JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

/// All errors that abort a verification run.
#[derive(Debug, Error)]
pub enum RunError {
    /// A check's name or path contained an unresolvable placeholder.
    #[error("in check '{name}': {source}")]
    Template {
        name: String,
        #[source]
        source: TemplateError,
    },

    /// The remote API could not be trusted to answer further checks.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}
