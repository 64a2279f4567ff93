//! Repovet core library — settings document model, loading, run configuration.
//!
//! Public API surface:
//! - [`types`] — newtypes, raw document structs, resolved [`Check`] shape
//! - [`settings`] — discovery / load / merge of the YAML settings document
//! - [`config`] — [`RunConfig`] built once from the environment
//! - [`error`] — [`ConfigError`]

pub mod config;
pub mod error;
pub mod settings;
pub mod types;

pub use config::RunConfig;
pub use error::ConfigError;
pub use types::{Check, CheckSpec, Expectation, Owner, RepoName, Selector, SettingsDoc};
