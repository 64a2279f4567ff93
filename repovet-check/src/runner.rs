//! Ordered single-pass check evaluation.
//!
//! Checks run strictly one at a time in document order. Per-check
//! mismatches become report rows and evaluation continues; template and
//! fetch-level failures abort the run immediately.

use serde_json::Value;
use tracing::debug;

use repovet_core::types::{Check, SettingsDoc};
use repovet_core::RunConfig;
use repovet_template::resolve;

use crate::compare::{evaluate, Outcome};
use crate::error::RunError;
use crate::fetch::Fetcher;
use crate::report::{CheckResult, Report};

/// Evaluate every check in `doc` against the live repository.
pub fn run(config: &RunConfig, doc: &SettingsDoc) -> Result<Report, RunError> {
    let fetcher = Fetcher::new(config);
    let mut results = Vec::with_capacity(doc.checks.len());
    for check in &doc.checks {
        results.push(run_check(config, &fetcher, &doc.defaults, check)?);
    }
    Ok(Report::new(results))
}

fn run_check(
    config: &RunConfig,
    fetcher: &Fetcher,
    defaults: &Value,
    check: &Check,
) -> Result<CheckResult, RunError> {
    let template = |input: &str| {
        resolve(input, defaults).map_err(|source| RunError::Template {
            name: check.name.clone(),
            source,
        })
    };

    let name = expand_coords(&template(&check.name)?, config);
    if check.ignore {
        debug!("skipping ignored check '{name}'");
        return Ok(CheckResult::ignored(name));
    }

    let path = expand_coords(&template(&check.path)?, config);
    let fetched = fetcher.get(&path)?;

    Ok(match evaluate(&check.expect, check.select.as_ref(), &fetched) {
        Outcome::Pass => CheckResult::passed(name),
        Outcome::Fail { detail, mismatches } => {
            CheckResult::failed(name, detail, mismatches, check.hints.clone())
        }
    })
}

/// Substitute the `{owner}` / `{repo}` coordinate placeholders.
fn expand_coords(input: &str, config: &RunConfig) -> String {
    input
        .replace("{owner}", &config.owner.0)
        .replace("{repo}", &config.repo.0)
}
