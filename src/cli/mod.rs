//! CLI module for estimar.
//!
//! All CLI logic lives here rather than in main.rs so it can be tested.
//! The entry point `run_cli` is called from main.rs with parsed arguments.

mod args;
mod commands;
mod output;

pub use args::{Args, Command, DEFAULT_RUNS, DEFAULT_SAMPLES, DEFAULT_SEED};
pub use commands::{run_all, run_cli, run_estimate, run_experiment, verify_reproducibility};
pub use output::{
    print_banner, print_estimator_run, print_experiment_report, print_help,
    print_reproducibility, print_version,
};

#[cfg(test)]
mod tests;
