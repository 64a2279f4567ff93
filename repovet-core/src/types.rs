//! Domain types for the repovet settings document.
//!
//! The YAML file deserializes into the raw [`CheckSpec`] shape; at load time
//! every entry is resolved into a [`Check`] with a typed [`Expectation`], so
//! the one-of json/array/existence decision is made exactly once.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed repository owner (user or organization login).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Owner(pub String);

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for Owner {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Owner {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A strongly-typed repository name (without the owner prefix).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoName(pub String);

impl fmt::Display for RepoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for RepoName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RepoName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Raw document shapes (serde)
// ---------------------------------------------------------------------------

/// One check as written in YAML, before shape validation.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckSpec {
    /// API resource path template; may contain `{owner}`, `{repo}` and
    /// `<dotted.key>` placeholder tokens.
    pub path: String,

    /// Expected field subset to match against the fetched object.
    #[serde(default)]
    pub json: Option<Value>,

    /// Expected scalars that must appear among the fetched array's elements.
    #[serde(default)]
    pub array: Option<Vec<Value>>,

    /// Field to extract from each array element for membership comparison.
    #[serde(default)]
    pub key: Option<String>,

    /// Remediation guidance shown when the check fails.
    #[serde(default)]
    pub hints: Vec<String>,

    /// Skip this check entirely; it is reported but never fetched.
    #[serde(default)]
    pub ignore: bool,

    /// Select one element of an array response before comparison.
    #[serde(default, rename = "match")]
    pub select: Option<Selector>,
}

/// Keyed lookup of a single element within an array response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Selector {
    pub key: String,
    pub value: Value,
}

// ---------------------------------------------------------------------------
// Resolved check shape
// ---------------------------------------------------------------------------

/// What a check expects of the fetched resource.
#[derive(Debug, Clone, PartialEq)]
pub enum Expectation {
    /// Every declared field must be present and deep-equal in the fetched
    /// object; extra fetched fields are ignored.
    Subset(serde_json::Map<String, Value>),

    /// For every declared scalar some fetched element must carry it under
    /// `key`; extra fetched elements are ignored.
    Members { key: String, values: Vec<Value> },

    /// The resource merely has to exist (any 2xx body).
    Exists,
}

/// A single named assertion, shape-validated at load time.
#[derive(Debug, Clone, PartialEq)]
pub struct Check {
    /// Display name; may contain `{owner}`, `{repo}` and placeholder tokens.
    pub name: String,
    /// Resource path template relative to the API root.
    pub path: String,
    pub expect: Expectation,
    pub select: Option<Selector>,
    pub hints: Vec<String>,
    pub ignore: bool,
}

impl Check {
    /// Validate a raw [`CheckSpec`] into a [`Check`].
    ///
    /// Rejected shapes: `json` and `array` together, `array` without `key`,
    /// `json` that is not a mapping. A stray `key` without `array` is
    /// tolerated and ignored.
    pub fn from_spec(name: &str, spec: CheckSpec) -> Result<Self, ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidCheck {
            name: name.to_owned(),
            reason: reason.to_owned(),
        };

        let expect = match (spec.json, spec.array) {
            (Some(_), Some(_)) => {
                return Err(invalid("'json' and 'array' are mutually exclusive"));
            }
            (Some(Value::Object(fields)), None) => Expectation::Subset(fields),
            (Some(_), None) => return Err(invalid("'json' must be a mapping")),
            (None, Some(values)) => {
                let key = spec
                    .key
                    .ok_or_else(|| invalid("'array' requires a 'key' to compare elements by"))?;
                Expectation::Members { key, values }
            }
            (None, None) => Expectation::Exists,
        };

        Ok(Check {
            name: name.to_owned(),
            path: spec.path,
            expect,
            select: spec.select,
            hints: spec.hints,
            ignore: spec.ignore,
        })
    }
}

// ---------------------------------------------------------------------------
// Settings document
// ---------------------------------------------------------------------------

/// The parsed desired-state document: a defaults tree for placeholder
/// substitution plus the checks in declared order. Loaded once per
/// invocation, read-only thereafter.
#[derive(Debug, Clone)]
pub struct SettingsDoc {
    /// Nested mapping of scalar substitution values (`repo.default_branch` etc.).
    pub defaults: Value,
    /// Checks in the order the document declares them.
    pub checks: Vec<Check>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
