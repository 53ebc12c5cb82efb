//! CLI command handlers.

use std::cell::RefCell;
use std::path::Path;
use std::process::ExitCode;
use std::rc::Rc;
use tracing::debug;

use crate::config::{LimitsConfig, PlaybackConfig, VisualizerConfig};
use crate::error::TraceResult;
use crate::playback::{PlaybackController, VirtualScheduler};
use crate::runner::{self, Instance, Snapshot};
use crate::trace::Trace;

use super::output::{
    format_step_line, print_help, print_trace_summary, print_verify_summary, print_version,
    VerifySummary,
};
use super::{Args, Command};

/// Main CLI entry point.
///
/// Dispatches to the appropriate command handler based on parsed arguments.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    match args.command {
        Command::Run {
            instance_path,
            json,
            quiet,
            config_path,
        } => run_instance(&instance_path, json, quiet, config_path.as_deref()),
        Command::Verify {
            instance_path,
            runs,
            config_path,
        } => verify_instance(&instance_path, runs, config_path.as_deref()),
        Command::Help => {
            print_help();
            ExitCode::SUCCESS
        }
        Command::Version => {
            print_version();
            ExitCode::SUCCESS
        }
    }
}

/// Record a trace for an instance file and play it back.
///
/// With `json` the trace is written to stdout as JSON and nothing else is
/// printed, so the output can be piped.
#[must_use]
pub fn run_instance(path: &Path, json: bool, quiet: bool, config_path: Option<&Path>) -> ExitCode {
    let (instance, config) = match load_inputs(path, config_path) {
        Ok(inputs) => inputs,
        Err(e) => {
            eprintln!("✗ Error: {e}");
            return ExitCode::from(1);
        }
    };

    let trace = match runner::run_with_limits(&instance, &config.limits) {
        Ok(trace) => trace,
        Err(e) => {
            eprintln!("✗ Error: {e}");
            return ExitCode::from(1);
        }
    };

    if json {
        return match trace.to_json() {
            Ok(doc) => {
                println!("{doc}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("✗ Error: {e}");
                ExitCode::from(1)
            }
        };
    }

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              algotrace - Trace Recorder                       ║");
    println!("╚═══════════════════════════════════════════════════════════════╝\n");
    println!("Instance: {}\n", path.display());

    let checksum = match fingerprint(&trace) {
        Ok(hex) => hex,
        Err(e) => {
            eprintln!("✗ Error: {e}");
            return ExitCode::from(1);
        }
    };

    if !quiet {
        let (lines, elapsed_ms) = play_lines(trace.clone(), &config.playback);
        for line in &lines {
            println!("{line}");
        }
        println!("\nPlayback: {} frames, {elapsed_ms} ms virtual time\n", lines.len());
    }

    print_trace_summary(&trace, &checksum);
    ExitCode::SUCCESS
}

/// Run an instance several times and compare trace checksums.
#[must_use]
pub fn verify_instance(path: &Path, runs: usize, config_path: Option<&Path>) -> ExitCode {
    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║           algotrace - Determinism Verification                ║");
    println!("╚═══════════════════════════════════════════════════════════════╝\n");

    let (instance, config) = match load_inputs(path, config_path) {
        Ok(inputs) => inputs,
        Err(e) => {
            eprintln!("✗ Error: {e}");
            return ExitCode::from(1);
        }
    };

    println!("Verifying: {}", path.display());
    println!("Runs: {runs}\n");

    match verify_runs(&instance, &config.limits, runs) {
        Ok(summary) => {
            print_verify_summary(&summary);
            if summary.passed() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            eprintln!("✗ Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Hex blake3 checksum of a trace.
///
/// # Errors
///
/// Returns error if the trace fails to serialize.
pub fn fingerprint(trace: &Trace<Snapshot>) -> TraceResult<String> {
    let bytes = trace.checksum()?;
    Ok(blake3::Hash::from(bytes).to_hex().to_string())
}

/// Record `instance` `runs` times and compare the checksums.
///
/// # Errors
///
/// Returns the first run's error if the instance is rejected.
pub fn verify_runs(
    instance: &Instance,
    limits: &LimitsConfig,
    runs: usize,
) -> TraceResult<VerifySummary> {
    let mut run_hashes = Vec::with_capacity(runs);
    let mut steps = 0;
    for run in 0..runs {
        let trace = runner::run_with_limits(instance, limits)?;
        if run == 0 {
            steps = trace.len();
        }
        run_hashes.push(fingerprint(&trace)?);
    }

    let reference_hash = run_hashes.first().cloned().unwrap_or_default();
    let identical = run_hashes.iter().all(|h| *h == reference_hash);
    debug!(runs, identical, "verification finished");

    Ok(VerifySummary {
        runs,
        identical,
        reference_hash,
        run_hashes,
        steps,
    })
}

/// Drive `trace` through a playback controller in virtual time and collect
/// one line per frame. Returns the lines and the elapsed virtual time.
#[must_use]
pub fn play_lines(trace: Trace<Snapshot>, playback: &PlaybackConfig) -> (Vec<String>, u128) {
    let lines = Rc::new(RefCell::new(Vec::new()));
    let mut controller = PlaybackController::with_config(VirtualScheduler::new(), playback.clone());

    let sink = Rc::clone(&lines);
    let mut last_index = None;
    controller.set_observer(move |view| {
        if last_index != Some(view.index) {
            last_index = Some(view.index);
            sink.borrow_mut()
                .push(format_step_line(view.index, view.total, view.step));
        }
    });

    controller.load(trace);
    controller.play();
    controller.run_until_idle();
    controller.clear_observer();

    let elapsed = controller.scheduler().now().as_millis();
    let collected = lines.take();
    (collected, elapsed)
}

fn load_inputs(path: &Path, config_path: Option<&Path>) -> TraceResult<(Instance, VisualizerConfig)> {
    let config = match config_path {
        Some(p) => VisualizerConfig::load(p)?,
        None => VisualizerConfig::default(),
    };
    let instance = Instance::load(path)?;
    Ok((instance, config))
}
