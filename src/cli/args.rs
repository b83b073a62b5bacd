//! CLI argument parsing.
//!
//! Hand-rolled parser over any iterator of strings so that every branch
//! can be exercised from tests without touching `std::env`.

use std::path::PathBuf;

use crate::experiment::EstimatorKind;

/// Sample count used when `--samples` is absent.
pub const DEFAULT_SAMPLES: &str = "1000";
/// Seed used when `--seed` is absent.
pub const DEFAULT_SEED: u64 = 42;
/// Verification runs used when `--runs` is absent.
pub const DEFAULT_RUNS: usize = 3;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run one estimator with its default domain.
    Estimate {
        /// Which estimator to run.
        kind: EstimatorKind,
        /// Raw sample-count text, validated before running.
        samples: String,
        /// Generator seed.
        seed: u64,
        /// Where to write the scene JSON, if anywhere.
        scene: Option<PathBuf>,
        /// Enable verbose output.
        verbose: bool,
    },
    /// Run all four estimators.
    All {
        /// Raw sample-count text, validated before running.
        samples: String,
        /// Generator seed.
        seed: u64,
    },
    /// Run an experiment
    Run {
        /// Path to the experiment YAML file.
        experiment_path: PathBuf,
        /// Optional seed override.
        seed_override: Option<u64>,
        /// Enable verbose output.
        verbose: bool,
    },
    /// Verify reproducibility of an experiment
    Verify {
        /// Path to the experiment YAML file.
        experiment_path: PathBuf,
        /// Number of verification runs.
        runs: usize,
    },
    /// Arguments that could not be parsed.
    Invalid {
        /// What was wrong.
        message: String,
    },
    /// Show help
    Help,
    /// Show version
    Version,
}

impl Args {
    /// Parse command-line arguments from an iterator.
    ///
    /// This method is testable as it accepts any iterator of strings,
    /// not just `std::env::args()`.
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

    /// Whether the parsed command asked for verbose output.
    #[must_use]
    pub const fn verbose(&self) -> bool {
        matches!(
            self.command,
            Command::Estimate { verbose: true, .. } | Command::Run { verbose: true, .. }
        )
    }

    /// Internal parsing from a vector of strings.
    fn parse_from_vec(args: &[String]) -> Self {
        if args.len() < 2 {
            return Self {
                command: Command::Help,
            };
        }

        let command = match args[1].as_str() {
            "all" => Self::parse_all_command(args),
            "run" => Self::parse_run_command(args),
            "verify" => Self::parse_verify_command(args),
            "-h" | "--help" | "help" => Command::Help,
            "-V" | "--version" | "version" => Command::Version,
            other => EstimatorKind::from_command(other).map_or_else(
                || {
                    eprintln!("Unknown command: {other}");
                    Command::Help
                },
                |kind| Self::parse_estimate_command(kind, args),
            ),
        };

        Self { command }
    }

    /// Parse `pi`, `buffon`, `area` and `integral` arguments.
    fn parse_estimate_command(kind: EstimatorKind, args: &[String]) -> Command {
        let mut samples = DEFAULT_SAMPLES.to_string();
        let mut seed = DEFAULT_SEED;
        let mut scene = None;
        let mut verbose = false;

        let mut i = 2;
        while i < args.len() {
            match args[i].as_str() {
                "--samples" | "-n" => {
                    if let Some(value) = args.get(i + 1) {
                        samples.clone_from(value);
                        i += 2;
                    } else {
                        i += 1;
                    }
                }
                "--seed" => {
                    if let Some(value) = args.get(i + 1) {
                        match Self::parse_seed(value) {
                            Ok(s) => seed = s,
                            Err(invalid) => return invalid,
                        }
                        i += 2;
                    } else {
                        i += 1;
                    }
                }
                "--scene" => {
                    if let Some(value) = args.get(i + 1) {
                        scene = Some(PathBuf::from(value));
                        i += 2;
                    } else {
                        i += 1;
                    }
                }
                "-v" | "--verbose" => {
                    verbose = true;
                    i += 1;
                }
                _ => i += 1,
            }
        }

        Command::Estimate {
            kind,
            samples,
            seed,
            scene,
            verbose,
        }
    }

    /// Parse a `--seed` value, or describe why it is unusable.
    fn parse_seed(value: &str) -> Result<u64, Command> {
        value.parse().map_err(|_| Command::Invalid {
            message: format!("invalid seed '{value}': expected an unsigned 64-bit integer"),
        })
    }

    /// Parse the 'all' command arguments.
    fn parse_all_command(args: &[String]) -> Command {
        let mut samples = DEFAULT_SAMPLES.to_string();
        let mut seed = DEFAULT_SEED;

        let mut i = 2;
        while i < args.len() {
            match (args[i].as_str(), args.get(i + 1)) {
                ("--samples" | "-n", Some(value)) => {
                    samples.clone_from(value);
                    i += 2;
                }
                ("--seed", Some(value)) => {
                    match Self::parse_seed(value) {
                        Ok(s) => seed = s,
                        Err(invalid) => return invalid,
                    }
                    i += 2;
                }
                _ => i += 1,
            }
        }

        Command::All { samples, seed }
    }

    /// Parse the 'run' command arguments.
    fn parse_run_command(args: &[String]) -> Command {
        if args.len() < 3 {
            eprintln!("Error: 'run' command requires experiment path");
            return Command::Help;
        }

        let mut seed_override = None;
        let mut verbose = false;

        let mut i = 3;
        while i < args.len() {
            match args[i].as_str() {
                "--seed" => {
                    if i + 1 < args.len() {
                        match Self::parse_seed(&args[i + 1]) {
                            Ok(seed) => seed_override = Some(seed),
                            Err(invalid) => return invalid,
                        }
                        i += 2;
                    } else {
                        i += 1;
                    }
                }
                "-v" | "--verbose" => {
                    verbose = true;
                    i += 1;
                }
                _ => i += 1,
            }
        }

        Command::Run {
            experiment_path: PathBuf::from(&args[2]),
            seed_override,
            verbose,
        }
    }

    /// Parse the 'verify' command arguments.
    fn parse_verify_command(args: &[String]) -> Command {
        if args.len() < 3 {
            eprintln!("Error: 'verify' command requires experiment path");
            return Command::Help;
        }

        let mut runs = DEFAULT_RUNS;
        if args.len() > 4 && args[3] == "--runs" {
            if let Ok(n) = args[4].parse() {
                runs = n;
            }
        }

        Command::Verify {
            experiment_path: PathBuf::from(&args[2]),
            runs,
        }
    }
}
