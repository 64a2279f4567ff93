//! Run the declared checks and render the report.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};
use tracing::info;

use repovet_check::compare::display_value;
use repovet_check::{runner, CheckResult, CheckStatus, Report};
use repovet_core::{settings, RunConfig};

/// Load the environment and settings, evaluate every check, print the
/// report. The caller maps the returned [`Report`] onto an exit code.
pub fn run(settings_override: Option<&Path>, json: bool, verbose: bool) -> Result<Report> {
    let config = RunConfig::from_env(verbose).context("incomplete run environment")?;

    let primary = settings_override
        .map(Path::to_path_buf)
        .unwrap_or_else(settings::primary_path);
    let site_defaults = settings::site_defaults_path();
    let doc = settings::load(&primary, Some(&site_defaults))
        .with_context(|| format!("failed to load settings from {}", primary.display()))?;

    info!(
        "validating settings for repository '{}/{}' ({} checks)",
        config.owner,
        config.repo,
        doc.checks.len()
    );

    let report = runner::run(&config, &doc).context("verification aborted")?;

    if json {
        print_json(&report)?;
    } else {
        print_table(&config, &report);
    }
    Ok(report)
}

// ---------------------------------------------------------------------------
// Table output
// ---------------------------------------------------------------------------

#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "check")]
    check: String,
    #[tabled(rename = "result")]
    result: String,
}

fn status_label(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Pass => "PASS",
        CheckStatus::Error => "ERROR",
        CheckStatus::Ignored => "IGNORED",
    }
}

fn status_key(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Pass => "pass",
        CheckStatus::Error => "error",
        CheckStatus::Ignored => "ignored",
    }
}

fn detail_rows(result: &CheckResult) -> Vec<ReportRow> {
    let sub = |text: String| ReportRow {
        check: format!("   - {text}"),
        result: String::new(),
    };

    let mut rows = Vec::new();
    if let Some(detail) = &result.detail {
        rows.push(sub(detail.clone()));
    }
    for mismatch in &result.mismatches {
        let current = mismatch
            .current
            .as_ref()
            .map(display_value)
            .unwrap_or_else(|| "none".to_owned());
        rows.push(sub(format!(
            "{} should be {} (currently {})",
            mismatch.field,
            display_value(&mismatch.desired),
            current,
        )));
    }
    for hint in &result.hints {
        rows.push(sub(hint.clone()));
    }
    rows
}

fn print_table(config: &RunConfig, report: &Report) {
    println!(
        "repovet v{} | {}/{} | {} passed | {} failed | {} ignored",
        env!("CARGO_PKG_VERSION"),
        config.owner,
        config.repo,
        report.passed(),
        report.failed(),
        report.ignored(),
    );

    if report.results.is_empty() {
        println!("No checks declared.");
        return;
    }

    let mut rows = Vec::new();
    for result in &report.results {
        rows.push(ReportRow {
            check: result.name.clone(),
            result: status_label(result.status).to_owned(),
        });
        rows.extend(detail_rows(result));
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");

    if report.all_passed() {
        println!("{}", "✓ repository settings match the declared state".green());
    } else {
        println!(
            "{}",
            format!("✗ {} check(s) failed", report.failed()).red().bold()
        );
    }
}

// ---------------------------------------------------------------------------
// JSON output
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ReportJson {
    summary: SummaryJson,
    checks: Vec<CheckJson>,
}

#[derive(Serialize)]
struct SummaryJson {
    passed: usize,
    failed: usize,
    ignored: usize,
}

#[derive(Serialize)]
struct CheckJson {
    name: String,
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
    mismatches: Vec<MismatchJson>,
    hints: Vec<String>,
}

#[derive(Serialize)]
struct MismatchJson {
    field: String,
    desired: serde_json::Value,
    current: Option<serde_json::Value>,
}

fn print_json(report: &Report) -> Result<()> {
    let payload = ReportJson {
        summary: SummaryJson {
            passed: report.passed(),
            failed: report.failed(),
            ignored: report.ignored(),
        },
        checks: report
            .results
            .iter()
            .map(|result| CheckJson {
                name: result.name.clone(),
                status: status_key(result.status).to_owned(),
                detail: result.detail.clone(),
                mismatches: result
                    .mismatches
                    .iter()
                    .map(|m| MismatchJson {
                        field: m.field.clone(),
                        desired: m.desired.clone(),
                        current: m.current.clone(),
                    })
                    .collect(),
                hints: result.hints.clone(),
            })
            .collect(),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("failed to serialize report JSON")?
    );
    Ok(())
}
