//! estimar CLI - Monte Carlo estimators
//!
//! Command-line interface for running estimators and experiment files.

use std::process::ExitCode;

use estimar::cli::{run_cli, Args};
use estimar::telemetry::init_tracing;

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose());
    run_cli(args)
}
