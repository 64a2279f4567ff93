//! repovet — assert that a repository's live settings match its declared ones.
//!
//! # Usage
//!
//! ```text
//! repovet [--settings <path>] [--json] [-v]
//! ```
//!
//! Repository coordinates come from `GITHUB_REPOSITORY` (`owner/repo`), the
//! credential from `INPUT_GITHUB_TOKEN`, and the API root from
//! `GITHUB_API_URL` (defaulting to the public GitHub API). Exit codes:
//! 0 — every check passed, 1 — at least one check failed, 2 — the run
//! itself could not be trusted (bad config, bad credential, API outage).

mod verify;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "repovet",
    version,
    about = "Verify repository settings against a declared desired state",
    long_about = None,
)]
struct Cli {
    /// Path to the settings document (defaults to
    /// $GITHUB_WORKSPACE/.repository-settings.yaml).
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Emit machine-readable JSON instead of a table.
    #[arg(long)]
    json: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match verify::run(cli.settings.as_deref(), cli.json, cli.verbose) {
        Ok(report) if report.all_passed() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
