//! CLI argument parsing.
//!
//! Hand-rolled so parsing stays testable from any iterator of strings.

use std::path::PathBuf;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Record a trace and play it back
    Run {
        /// Path to the instance file.
        instance_path: PathBuf,
        /// Print the trace as JSON instead of playing it.
        json: bool,
        /// Print only the summary.
        quiet: bool,
        /// Optional configuration file.
        config_path: Option<PathBuf>,
    },
    /// Check that repeated runs produce identical traces
    Verify {
        /// Path to the instance file.
        instance_path: PathBuf,
        /// Number of verification runs.
        runs: usize,
        /// Optional configuration file.
        config_path: Option<PathBuf>,
    },
    /// Show help
    Help,
    /// Show version
    Version,
}

impl Args {
    /// Parse command-line arguments from an iterator.
    ///
    /// Accepts any iterator of strings, not just `std::env::args()`.
    #[must_use]
    pub fn parse_from<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::parse_from_vec(&args)
    }

    /// Parse command-line arguments from the environment.
    #[must_use]
    pub fn parse() -> Self {
        Self::parse_from(std::env::args())
    }

    fn parse_from_vec(args: &[String]) -> Self {
        if args.len() < 2 {
            return Self {
                command: Command::Help,
            };
        }

        let command = match args[1].as_str() {
            "run" => Self::parse_run_command(args),
            "verify" => Self::parse_verify_command(args),
            "-h" | "--help" | "help" => Command::Help,
            "-V" | "--version" | "version" => Command::Version,
            unknown => {
                eprintln!("Unknown command: {unknown}");
                Command::Help
            }
        };

        Self { command }
    }

    /// Parse the 'run' command arguments.
    fn parse_run_command(args: &[String]) -> Command {
        if args.len() < 3 {
            eprintln!("Error: 'run' command requires an instance path");
            return Command::Help;
        }

        let mut json = false;
        let mut quiet = false;
        let mut config_path = None;

        let mut i = 3;
        while i < args.len() {
            match args[i].as_str() {
                "--json" => {
                    json = true;
                    i += 1;
                }
                "-q" | "--quiet" => {
                    quiet = true;
                    i += 1;
                }
                "--config" => {
                    if i + 1 < args.len() {
                        config_path = Some(PathBuf::from(&args[i + 1]));
                        i += 2;
                    } else {
                        i += 1;
                    }
                }
                _ => i += 1,
            }
        }

        Command::Run {
            instance_path: PathBuf::from(&args[2]),
            json,
            quiet,
            config_path,
        }
    }

    /// Parse the 'verify' command arguments.
    fn parse_verify_command(args: &[String]) -> Command {
        if args.len() < 3 {
            eprintln!("Error: 'verify' command requires an instance path");
            return Command::Help;
        }

        let mut runs = 3;
        let mut config_path = None;

        let mut i = 3;
        while i < args.len() {
            match args[i].as_str() {
                "--runs" => {
                    if let Some(n) = args.get(i + 1).and_then(|s| s.parse().ok()) {
                        runs = n;
                    }
                    i += 2;
                }
                "--config" => {
                    config_path = args.get(i + 1).map(PathBuf::from);
                    i += 2;
                }
                _ => i += 1,
            }
        }

        Command::Verify {
            instance_path: PathBuf::from(&args[2]),
            runs,
            config_path,
        }
    }
}
