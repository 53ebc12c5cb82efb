//! algotrace CLI - step-by-step algorithm traces
//!
//! Command-line interface for recording and replaying traces.

use algotrace::cli::{run_cli, Args};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Logs go to stderr so `run --json` output stays clean.
    let filter = EnvFilter::try_from_env("ALGOTRACE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    run_cli(Args::parse())
}
