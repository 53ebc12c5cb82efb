//! CLI output formatting.
//!
//! Line builders return `String` so they can be tested without capturing
//! stdout; the `print_*` functions only write them out.

use crate::runner::Snapshot;
use crate::trace::{Step, Trace};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Result of running one instance several times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifySummary {
    /// Number of runs performed.
    pub runs: usize,
    /// Whether every run produced the reference checksum.
    pub identical: bool,
    /// Hex checksum of the first run.
    pub reference_hash: String,
    /// Hex checksum of every run, in order.
    pub run_hashes: Vec<String>,
    /// Steps in the reference trace.
    pub steps: usize,
}

impl VerifySummary {
    /// Verification passes when at least one run happened and all matched.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.runs > 0 && self.identical
    }
}

/// Print version information.
pub fn print_version() {
    println!("algotrace {}", env!("CARGO_PKG_VERSION"));
}

/// Print help message.
pub fn print_help() {
    println!(
        r"algotrace - Step-by-step traces of classic algorithms

USAGE:
    algotrace <COMMAND> [OPTIONS]

COMMANDS:
    run <instance.yaml>         Record a trace and play it back step by step
        --json                  Print the full trace as JSON instead
        -q, --quiet             Print only the summary
        --config <file.yaml>    Playback and size-limit settings

    verify <instance.yaml>      Check that repeated runs give identical traces
        --runs <N>              Number of verification runs (default: 3)
        --config <file.yaml>    Playback and size-limit settings

    help                        Show this help message
    version                     Show version information

INSTANCE FILES:
    YAML or JSON documents tagged by algorithm, for example:

        algorithm: quicksort
        array: [64, 34, 25, 12, 22, 11, 90]

    Algorithms: quicksort, heapsort, kruskal, bellman_ford, floyd_warshall,
    dfs, knapsack, coin_change_dp, lcs, fibonacci, coin_change_greedy,
    activity_selection, fractional_knapsack, subsets, permutations,
    combinations

EXAMPLES:
    algotrace run instances/kruskal.yaml
    algotrace run instances/lcs.json --json
    algotrace verify instances/knapsack.yaml --runs 5

LOGGING:
    Set ALGOTRACE_LOG (e.g. ALGOTRACE_LOG=debug) to see playback transitions.
"
    );
}

/// One playback line: `[index/last] kind: message`.
#[must_use]
pub fn format_step_line<S>(index: usize, total: usize, step: &Step<S>) -> String {
    let width = total.saturating_sub(1).to_string().len();
    format!(
        "  [{index:>width$}/{last}] {kind}: {message}",
        last = total.saturating_sub(1),
        kind = step.kind(),
        message = step.message(),
    )
}

/// Summary lines for a recorded trace.
#[must_use]
pub fn trace_summary_lines(trace: &Trace<Snapshot>, checksum: &str) -> Vec<String> {
    let outcome = trace
        .outcome()
        .map_or_else(|| "none".to_string(), |kind| kind.to_string());
    let final_message = trace.last().map_or("", Step::message);

    vec![
        format!("Algorithm: {}", trace.algorithm()),
        format!("Steps:     {}", trace.len()),
        format!("Outcome:   {outcome}"),
        format!("Result:    {final_message}"),
        format!("Checksum:  {checksum}"),
    ]
}

/// Print the summary block for a recorded trace.
pub fn print_trace_summary(trace: &Trace<Snapshot>, checksum: &str) {
    println!("{RULE}");
    for line in trace_summary_lines(trace, checksum) {
        println!("{line}");
    }
    println!("{RULE}\n");
}

/// Print a verification summary.
pub fn print_verify_summary(summary: &VerifySummary) {
    let status = if summary.passed() { "PASSED" } else { "FAILED" };
    let sym = if summary.passed() { "✓" } else { "✗" };

    println!("{RULE}");
    println!("Determinism Check");
    println!("{RULE}\n");

    println!("  Runs:      {}", summary.runs);
    println!("  Steps:     {}", summary.steps);
    println!("  Identical: {}", summary.identical);
    println!("\n  Reference Hash: {}", summary.reference_hash);

    if summary.run_hashes.len() > 1 {
        println!("\n  Run Hashes:");
        for (i, hash) in summary.run_hashes.iter().enumerate() {
            let match_sym = if hash == &summary.reference_hash {
                "="
            } else {
                "!"
            };
            println!("    Run {}: {} {}", i + 1, hash, match_sym);
        }
    }

    println!("\n{RULE}");
    println!("{sym} Result: {status}");
    println!("{RULE}\n");
}
