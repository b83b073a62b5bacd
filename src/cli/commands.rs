//! CLI command handlers.
//!
//! Each handler prints its own output and maps the outcome to an exit code.

use std::path::Path;
use std::process::ExitCode;

use crate::config::ExperimentConfig;
use crate::engine::sample_count::SampleCount;
use crate::estimators::RunConfig;
use crate::experiment::{run_single, EstimatorKind, ExperimentRunner};
use crate::render::Surface;

use super::output::{
    print_banner, print_estimator_run, print_experiment_report, print_help,
    print_reproducibility, print_version,
};
use super::{Args, Command};

/// Main CLI entry point.
///
/// Dispatches to the appropriate command handler based on parsed arguments.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    match args.command {
        Command::Estimate {
            kind,
            samples,
            seed,
            scene,
            verbose,
        } => run_estimate(kind, &samples, seed, scene.as_deref(), verbose),
        Command::All { samples, seed } => run_all(&samples, seed),
        Command::Run {
            experiment_path,
            seed_override,
            verbose,
        } => run_experiment(&experiment_path, seed_override, verbose),
        Command::Verify {
            experiment_path,
            runs,
        } => verify_reproducibility(&experiment_path, runs),
        Command::Invalid { message } => {
            eprintln!("Error: {message}");
            ExitCode::from(1)
        }
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

/// Validate sample-count text, printing the error on failure.
fn parse_samples(text: &str) -> Option<SampleCount> {
    match SampleCount::parse(text) {
        Ok(count) => Some(count),
        Err(e) => {
            eprintln!("Error: {e}");
            None
        }
    }
}

fn run_config(count: SampleCount, seed: u64) -> RunConfig {
    RunConfig::new(i64::try_from(count.get()).unwrap_or(i64::MAX), seed)
}

/// Run one estimator with its default domain.
///
/// # Arguments
///
/// * `kind` - Which estimator to run
/// * `samples` - Raw sample-count text
/// * `seed` - Generator seed
/// * `scene` - Optional path for the scene JSON
/// * `verbose` - Whether to enable verbose output
#[must_use]
pub fn run_estimate(
    kind: EstimatorKind,
    samples: &str,
    seed: u64,
    scene: Option<&Path>,
    verbose: bool,
) -> ExitCode {
    print_banner(&format!("estimar - {kind}"));

    let Some(count) = parse_samples(samples) else {
        return ExitCode::from(1);
    };

    let surface = scene.map(|_| Surface::default());
    let run = match run_single(kind, &run_config(count, seed), surface) {
        Ok(run) => run,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    print_estimator_run(&run, verbose);

    if let (Some(path), Some(scene)) = (scene, run.scene.as_ref()) {
        if let Err(e) = scene.write_json(path) {
            eprintln!("Error writing scene: {e}");
            return ExitCode::from(1);
        }
        println!("\nScene written to {}", path.display());
    }

    ExitCode::SUCCESS
}

/// Run all four estimators, continuing past individual failures.
///
/// # Arguments
///
/// * `samples` - Raw sample-count text
/// * `seed` - Generator seed
#[must_use]
pub fn run_all(samples: &str, seed: u64) -> ExitCode {
    print_banner("estimar - All Estimators");

    let Some(count) = parse_samples(samples) else {
        return ExitCode::from(1);
    };
    let config = run_config(count, seed);

    let mut failed = false;
    for kind in EstimatorKind::ALL {
        match run_single(kind, &config, None) {
            Ok(run) => print_estimator_run(&run, false),
            Err(e) => {
                println!("{kind}");
                eprintln!("  Error: {e}");
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

/// Run an experiment from a YAML file.
///
/// # Arguments
///
/// * `path` - Path to the experiment YAML file
/// * `seed_override` - Optional seed to override the experiment's configured seed
/// * `verbose` - Whether to enable verbose output
#[must_use]
pub fn run_experiment(path: &Path, seed_override: Option<u64>, verbose: bool) -> ExitCode {
    print_banner("estimar - Experiment Runner");

    println!("Running experiment: {}\n", path.display());

    let runner = ExperimentRunner::new().with_seed_override(seed_override);

    match runner.run_file(path) {
        Ok(report) => {
            print_experiment_report(&report, verbose);
            if report.passed() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Verify reproducibility of an experiment across multiple runs.
///
/// # Arguments
///
/// * `path` - Path to the experiment YAML file
/// * `runs` - Number of verification runs to perform
#[must_use]
pub fn verify_reproducibility(path: &Path, runs: usize) -> ExitCode {
    print_banner("estimar - Reproducibility Verification");

    println!("Verifying reproducibility: {}", path.display());
    println!("Runs: {runs}\n");

    let summary = ExperimentConfig::load(path)
        .and_then(|config| ExperimentRunner::new().verify(&config, runs));

    match summary {
        Ok(summary) => {
            print_reproducibility(&summary);
            if summary.passed {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}
