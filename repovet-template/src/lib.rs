//! # repovet-template
//!
//! Placeholder resolution for check names and resource paths: every
//! `<dotted.key>` token in a string is replaced with the scalar found by
//! walking the settings document's `defaults` tree.
//!
//! ## Usage
//!
//! ```rust
//! use repovet_template::resolve;
//! use serde_json::json;
//!
//! let defaults = json!({"repo": {"default_branch": "main"}});
//! let path = resolve("branches/<repo.default_branch>/protection", &defaults).unwrap();
//! assert_eq!(path, "branches/main/protection");
//! ```

pub mod error;
pub mod resolve;

pub use error::TemplateError;
pub use resolve::{deep_get, resolve};
