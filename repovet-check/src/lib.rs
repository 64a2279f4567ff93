//! Check evaluation pipeline: fetch each declared resource, compare it to
//! the declared expectation, aggregate ordered results for reporting.
//!
//! The canonical entrypoint is [`runner::run`]; it returns a [`Report`] of
//! plain data for the CLI to render. Check failures are data; anything that
//! makes the run untrustworthy (bad template, bad credential, API outage)
//! is a [`RunError`].

pub mod compare;
pub mod error;
pub mod fetch;
pub mod report;
pub mod runner;

pub use compare::{Mismatch, Outcome};
pub use error::{FetchError, RunError};
pub use fetch::{Fetched, Fetcher};
pub use report::{CheckResult, CheckStatus, Report};
