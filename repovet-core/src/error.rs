//! Error types for repovet-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while assembling the run configuration and
/// settings document. Every variant is fatal: nothing runs until the
/// document and environment are sound.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure (file unreadable, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse error on load — includes file path and line context from serde_yaml.
    #[error("failed to parse settings at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// No settings document existed at the expected path.
    #[error("settings file not found at {path}")]
    SettingsNotFound { path: PathBuf },

    /// The settings document's top level was not a mapping.
    #[error("settings document at {path} is not a mapping")]
    NotAMapping { path: PathBuf },

    /// A check declaration was structurally invalid.
    #[error("invalid check '{name}': {reason}")]
    InvalidCheck { name: String, reason: String },

    /// `GITHUB_REPOSITORY` was not set.
    #[error("GITHUB_REPOSITORY is not set; expected '<owner>/<repo>'")]
    MissingRepository,

    /// `GITHUB_REPOSITORY` did not look like `owner/repo`.
    #[error("GITHUB_REPOSITORY value '{value}' is not of the form '<owner>/<repo>'")]
    InvalidRepository { value: String },

    /// `INPUT_GITHUB_TOKEN` was unset or empty.
    #[error("INPUT_GITHUB_TOKEN is empty; verify this repository can access the credential")]
    MissingToken,
}
