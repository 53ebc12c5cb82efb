//! CLI module for algotrace.
//!
//! All CLI logic lives here rather than in main.rs so it can be tested. The
//! entry point `run_cli` is called from main.rs with parsed arguments.

mod args;
mod commands;
mod output;

pub use args::{Args, Command};
pub use commands::{fingerprint, play_lines, run_cli, verify_runs};
pub use output::{
    format_step_line, print_help, print_trace_summary, print_verify_summary, print_version,
    trace_summary_lines, VerifySummary,
};
