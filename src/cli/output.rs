//! CLI output formatting.
//!
//! All printing lives here so command handlers stay testable.

use crate::experiment::{EstimatorRun, ExperimentReport, ReproducibilitySummary};
use crate::report::RunSummary;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";
const BANNER_WIDTH: usize = 63;

/// Print version information.
pub fn print_version() {
    let version = option_env!("ESTIMAR_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    println!("estimar {version}");
    if let Some(hash) = option_env!("GIT_HASH") {
        if !hash.is_empty() {
            println!("commit {hash}");
        }
    }
}

/// Print help message.
pub fn print_help() {
    println!(
        r"estimar - Monte Carlo estimation of π, areas and integrals

USAGE:
    estimar <COMMAND> [OPTIONS]

COMMANDS:
    pi                          Estimate π from a circular quadrant
    buffon                      Estimate π by dropping needles on ruled lines
    area                        Estimate the area enclosed by the heart curve
    integral                    Estimate ∫(sin(x) + 1)dx from 0 to π
        -n, --samples <N>       Number of samples (default: 1000)
        --seed <S>              Generator seed (default: 42)
        --scene <out.json>      Write the display list as JSON
        -v, --verbose           Enable verbose output

    all                         Run all four estimators
        -n, --samples <N>       Number of samples (default: 1000)
        --seed <S>              Generator seed (default: 42)

    run <experiment.yaml>       Run an experiment file
        --seed <S>              Override the experiment seed
        -v, --verbose           Enable verbose output

    verify <experiment.yaml>    Verify reproducibility across multiple runs
        --runs <R>              Number of verification runs (default: 3)

    help                        Show this help message
    version                     Show version information

ENVIRONMENT:
    ESTIMAR_LOG                 Log filter, e.g. estimar=debug

EXAMPLES:
    estimar pi --samples 100000
    estimar buffon --seed 7 --scene needles.json
    estimar run experiments/pi.yaml --seed 12345
    estimar verify experiments/pi.yaml --runs 5
"
    );
}

/// Print a boxed title.
pub fn print_banner(title: &str) {
    let bar = "═".repeat(BANNER_WIDTH);
    println!("╔{bar}╗");
    println!("║{:^width$}║", title, width = BANNER_WIDTH);
    println!("╚{bar}╝\n");
}

fn print_summary_details(summary: &RunSummary) {
    println!("  Samples (N):  {}", summary.samples);
    println!("  Hits (K):     {}", summary.hits);
    println!(
        "  Hit ratio:    {:.6} ± {:.6}",
        summary.hit_ratio, summary.ratio_std_error
    );
    println!("  Seed:         {}", summary.seed);
    if let Some(err) = summary.pi_error() {
        println!("  |π̂ − π|:      {err:.6}");
    }
}

/// Print one estimator run.
///
/// # Arguments
///
/// * `run` - The finished run
/// * `verbose` - Whether to show counts, ratio and digest
pub fn print_estimator_run(run: &EstimatorRun, verbose: bool) {
    println!("{}", run.kind);
    println!("  {}", run.summary.display);
    if verbose {
        print_summary_details(&run.summary);
        println!("  Digest:       {}", run.digest);
    }
}

/// Print experiment report.
///
/// # Arguments
///
/// * `report` - The experiment report to display
/// * `verbose` - Whether to show verbose output
pub fn print_experiment_report(report: &ExperimentReport, verbose: bool) {
    let passed = report.passed();
    let status = if passed { "PASSED" } else { "FAILED" };
    let status_symbol = if passed { "✓" } else { "✗" };

    println!("{RULE}");
    if !report.name.is_empty() {
        println!("Experiment: {}", report.name);
    }
    println!("Seed: {}", report.seed);
    println!("{RULE}\n");

    for outcome in &report.outcomes {
        let sym = if outcome.passed() { "✓" } else { "✗" };
        println!("{sym} {}", outcome.kind);
        if let Some(ref summary) = outcome.summary {
            println!("    {}", summary.display);
            if verbose {
                print_summary_details(summary);
            }
        }
        if let Some(ref err) = outcome.error {
            println!("    Error: {err}");
        }
        if verbose {
            if let Some(ref digest) = outcome.digest {
                println!("    Digest: {digest}");
            }
        }
    }

    println!("\nExecution:");
    println!("  Duration:   {} ms", report.duration_ms);
    println!("  Estimators: {}", report.outcomes.len());
    println!("  Fingerprint: {}", report.fingerprint());

    println!("\n{RULE}");
    println!("{status_symbol} Result: {status}");
    println!("{RULE}\n");
}

/// Print reproducibility verification results.
pub fn print_reproducibility(summary: &ReproducibilitySummary) {
    let status = if summary.passed { "PASSED" } else { "FAILED" };
    let sym = if summary.passed { "✓" } else { "✗" };

    println!("{RULE}");
    println!("Reproducibility Check");
    println!("{RULE}\n");

    println!("  Runs:      {}", summary.runs);
    println!("  Identical: {}", summary.passed);
    println!("  Platform:  {}", summary.platform);
    println!("\n  Reference Hash: {}", summary.reference_hash);

    if summary.run_hashes.len() > 1 {
        println!("\n  Run Hashes:");
        for (i, hash) in summary.run_hashes.iter().enumerate() {
            let match_sym = if *hash == summary.reference_hash {
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
