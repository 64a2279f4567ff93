//! Settings document discovery, loading and merging.
//!
//! # File layout
//!
//! ```text
//! $GITHUB_WORKSPACE/.repository-settings.yaml          (repository file)
//! $CONFIGDIR/default-repository-settings.yaml          (optional site defaults)
//! ```
//!
//! `GITHUB_WORKSPACE` falls back to `.`, `CONFIGDIR` to
//! `/etc/repository-settings`. The site defaults file is merged underneath
//! the repository file: keys the repository declares always win, missing
//! subtrees are filled in recursively.
//!
//! # API pattern
//!
//! [`load`] takes explicit paths so tests can point it at a `TempDir`;
//! [`primary_path`]/[`site_defaults_path`] derive the conventional locations
//! from the environment and are only called from the binary's entry point.

use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value as Yaml};

use crate::error::ConfigError;
use crate::types::{Check, CheckSpec, SettingsDoc};

/// Well-known name of the per-repository settings file.
pub const SETTINGS_FILE_NAME: &str = ".repository-settings.yaml";

/// Well-known name of the optional site-wide defaults file.
pub const SITE_DEFAULTS_FILE_NAME: &str = "default-repository-settings.yaml";

/// Fallback directory for the site defaults file.
pub const DEFAULT_CONFIG_DIR: &str = "/etc/repository-settings";

/// `$GITHUB_WORKSPACE/.repository-settings.yaml` (workspace defaults to `.`).
pub fn primary_path() -> PathBuf {
    let workspace = std::env::var("GITHUB_WORKSPACE").unwrap_or_else(|_| ".".to_owned());
    Path::new(&workspace).join(SETTINGS_FILE_NAME)
}

/// `$CONFIGDIR/default-repository-settings.yaml`.
pub fn site_defaults_path() -> PathBuf {
    let dir = std::env::var("CONFIGDIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_owned());
    Path::new(&dir).join(SITE_DEFAULTS_FILE_NAME)
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

/// Load the settings document from `primary`, merging `site_defaults`
/// underneath it when that file exists.
///
/// Returns `ConfigError::SettingsNotFound` if `primary` is absent,
/// `ConfigError::Parse` (with path context) if either file is malformed, and
/// `ConfigError::InvalidCheck` for structurally invalid check declarations.
pub fn load(primary: &Path, site_defaults: Option<&Path>) -> Result<SettingsDoc, ConfigError> {
    if !primary.exists() {
        return Err(ConfigError::SettingsNotFound {
            path: primary.to_path_buf(),
        });
    }
    let mut root = read_mapping(primary)?;

    if let Some(path) = site_defaults {
        if path.exists() {
            let site = read_mapping(path)?;
            merge_missing(&mut root, site);
        }
    }

    parse_doc(root, primary)
}

fn read_mapping(path: &Path) -> Result<Mapping, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    let value: Yaml = serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    match value {
        Yaml::Mapping(mapping) => Ok(mapping),
        _ => Err(ConfigError::NotAMapping {
            path: path.to_path_buf(),
        }),
    }
}

/// Non-destructively merge `source` into `dest`: existing keys in `dest`
/// win, mappings on both sides are merged recursively.
fn merge_missing(dest: &mut Mapping, source: Mapping) {
    for (key, value) in source {
        match dest.get_mut(&key) {
            None => {
                dest.insert(key, value);
            }
            Some(existing) => {
                if let (Yaml::Mapping(dst), Yaml::Mapping(src)) = (existing, value) {
                    merge_missing(dst, src);
                }
            }
        }
    }
}

fn parse_doc(mut root: Mapping, path: &Path) -> Result<SettingsDoc, ConfigError> {
    let defaults = match root.remove("defaults") {
        Some(value) => {
            serde_yaml::from_value::<serde_json::Value>(value).map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                source: e,
            })?
        }
        None => serde_json::Value::Object(serde_json::Map::new()),
    };

    let mut checks = Vec::new();
    if let Some(tests) = root.remove("tests") {
        let Yaml::Mapping(tests) = tests else {
            return Err(ConfigError::InvalidCheck {
                name: "tests".to_owned(),
                reason: "'tests' must be a mapping of check name to definition".to_owned(),
            });
        };
        for (key, value) in tests {
            let Some(name) = key.as_str().map(str::to_owned) else {
                return Err(ConfigError::InvalidCheck {
                    name: format!("{key:?}"),
                    reason: "check names must be strings".to_owned(),
                });
            };
            let spec: CheckSpec =
                serde_yaml::from_value(value).map_err(|e| ConfigError::InvalidCheck {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            checks.push(Check::from_spec(&name, spec)?);
        }
    }

    Ok(SettingsDoc { defaults, checks })
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
