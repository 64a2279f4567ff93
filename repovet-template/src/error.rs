//! Error types for repovet-template.

use thiserror::Error;

/// All errors that can arise from placeholder resolution.
///
/// Both variants are fatal: an unresolvable token means the check's path or
/// name cannot be trusted, so the run aborts before the fetch.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    /// The token's dotted path did not lead anywhere in the defaults tree.
    #[error("unknown placeholder <{token}>: no such key under 'defaults'")]
    UnknownKey { token: String },

    /// The token's dotted path resolved to a mapping, array, or null
    /// instead of a substitutable scalar.
    #[error("placeholder <{token}> does not resolve to a scalar value")]
    NotScalar { token: String },
}
