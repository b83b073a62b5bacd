//! CLI module tests.

use super::args::{Args, Command, DEFAULT_RUNS, DEFAULT_SAMPLES, DEFAULT_SEED};
use super::commands::{run_all, run_cli, run_estimate, run_experiment, verify_reproducibility};
use super::output::{
    print_banner, print_estimator_run, print_experiment_report, print_help,
    print_reproducibility, print_version,
};
use crate::config::ExperimentConfig;
use crate::estimators::RunConfig;
use crate::experiment::{run_single, EstimatorKind, ExperimentRunner};
use crate::render::Scene;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

// ============================================================================
// Args parsing tests
// ============================================================================

#[test]
fn test_parse_no_args_shows_help() {
    let args = Args::parse_from(["estimar"]);
    assert_eq!(args.command, Command::Help);
}

#[test]
fn test_parse_help_variants() {
    for flag in ["-h", "--help", "help"] {
        assert_eq!(Args::parse_from(["estimar", flag]).command, Command::Help);
    }
}

#[test]
fn test_parse_version_variants() {
    for flag in ["-V", "--version", "version"] {
        assert_eq!(
            Args::parse_from(["estimar", flag]).command,
            Command::Version
        );
    }
}

#[test]
fn test_parse_unknown_command() {
    let args = Args::parse_from(["estimar", "tau"]);
    assert_eq!(args.command, Command::Help);
}

#[test]
fn test_parse_estimate_defaults() {
    let args = Args::parse_from(["estimar", "pi"]);
    assert_eq!(
        args.command,
        Command::Estimate {
            kind: EstimatorKind::Quadrant,
            samples: DEFAULT_SAMPLES.to_string(),
            seed: DEFAULT_SEED,
            scene: None,
            verbose: false,
        }
    );
    assert!(!args.verbose());
}

#[test]
fn test_parse_estimate_each_kind() {
    let cases = [
        ("pi", EstimatorKind::Quadrant),
        ("buffon", EstimatorKind::Needle),
        ("area", EstimatorKind::Region),
        ("integral", EstimatorKind::Integral),
    ];
    for (cmd, expected) in cases {
        match Args::parse_from(["estimar", cmd]).command {
            Command::Estimate { kind, .. } => assert_eq!(kind, expected),
            other => panic!("Expected Estimate for {cmd}, got {other:?}"),
        }
    }
}

#[test]
fn test_parse_estimate_all_options() {
    let args = Args::parse_from([
        "estimar",
        "buffon",
        "--samples",
        "5000",
        "--seed",
        "7",
        "--scene",
        "needles.json",
        "-v",
    ]);
    assert!(args.verbose());
    match args.command {
        Command::Estimate {
            kind,
            samples,
            seed,
            scene,
            verbose,
        } => {
            assert_eq!(kind, EstimatorKind::Needle);
            assert_eq!(samples, "5000");
            assert_eq!(seed, 7);
            assert_eq!(scene, Some(PathBuf::from("needles.json")));
            assert!(verbose);
        }
        other => panic!("Expected Estimate, got {other:?}"),
    }
}

#[test]
fn test_parse_estimate_keeps_raw_sample_text() {
    match Args::parse_from(["estimar", "area", "-n", "-5"]).command {
        Command::Estimate { samples, .. } => assert_eq!(samples, "-5"),
        other => panic!("Expected Estimate, got {other:?}"),
    }
}

#[test]
fn test_parse_invalid_seed_rejected() {
    for args in [
        vec!["estimar", "pi", "--seed", "abc"],
        vec!["estimar", "all", "--seed", "-1"],
        vec!["estimar", "run", "experiment.yaml", "--seed", "1.5"],
    ] {
        match Args::parse_from(&args).command {
            Command::Invalid { message } => assert!(message.contains("invalid seed"), "{message}"),
            other => panic!("Expected Invalid for {args:?}, got {other:?}"),
        }
    }
}

#[test]
fn test_run_cli_invalid_arguments_fail() {
    let args = Args::parse_from(["estimar", "buffon", "--seed", "forty-two"]);
    assert_ne!(run_cli(args), ExitCode::SUCCESS);
}

#[test]
fn test_parse_estimate_trailing_flag_without_value() {
    match Args::parse_from(["estimar", "pi", "--samples"]).command {
        Command::Estimate { samples, .. } => assert_eq!(samples, DEFAULT_SAMPLES),
        other => panic!("Expected Estimate, got {other:?}"),
    }
}

#[test]
fn test_parse_all_command() {
    let args = Args::parse_from(["estimar", "all", "--samples", "200", "--seed", "9"]);
    assert_eq!(
        args.command,
        Command::All {
            samples: "200".to_string(),
            seed: 9,
        }
    );
}

#[test]
fn test_parse_run_command() {
    let args = Args::parse_from(["estimar", "run", "experiment.yaml", "--seed", "12", "-v"]);
    assert_eq!(
        args.command,
        Command::Run {
            experiment_path: PathBuf::from("experiment.yaml"),
            seed_override: Some(12),
            verbose: true,
        }
    );
    assert!(args.verbose());
}

#[test]
fn test_parse_run_without_path() {
    assert_eq!(Args::parse_from(["estimar", "run"]).command, Command::Help);
}

#[test]
fn test_parse_verify_command() {
    let args = Args::parse_from(["estimar", "verify", "exp.yaml"]);
    assert_eq!(
        args.command,
        Command::Verify {
            experiment_path: PathBuf::from("exp.yaml"),
            runs: DEFAULT_RUNS,
        }
    );

    let args = Args::parse_from(["estimar", "verify", "exp.yaml", "--runs", "5"]);
    assert_eq!(
        args.command,
        Command::Verify {
            experiment_path: PathBuf::from("exp.yaml"),
            runs: 5,
        }
    );
}

#[test]
fn test_parse_verify_without_path() {
    assert_eq!(Args::parse_from(["estimar", "verify"]).command, Command::Help);
}

// ============================================================================
// Output tests
// ============================================================================

#[test]
fn test_print_functions_do_not_panic() {
    print_help();
    print_version();
    print_banner("estimar - Test");

    let run = run_single(EstimatorKind::Integral, &RunConfig::new(100, 1), None).unwrap();
    print_estimator_run(&run, false);
    print_estimator_run(&run, true);

    let config = ExperimentConfig::builder().samples(100).build();
    let report = ExperimentRunner::new().run(&config);
    print_experiment_report(&report, false);
    print_experiment_report(&report, true);

    let summary = ExperimentRunner::new().verify(&config, 2).unwrap();
    print_reproducibility(&summary);
}

// ============================================================================
// Command tests
// ============================================================================

fn write_experiment(dir: &Path, yaml: &str) -> PathBuf {
    let path = dir.join("experiment.yaml");
    std::fs::write(&path, yaml).unwrap();
    path
}

#[test]
fn test_run_cli_help_and_version() {
    assert_eq!(
        run_cli(Args {
            command: Command::Help
        }),
        ExitCode::SUCCESS
    );
    assert_eq!(
        run_cli(Args {
            command: Command::Version
        }),
        ExitCode::SUCCESS
    );
}

#[test]
fn test_run_estimate_success() {
    for kind in EstimatorKind::ALL {
        assert_eq!(
            run_estimate(kind, "500", 42, None, false),
            ExitCode::SUCCESS
        );
    }
}

#[test]
fn test_run_estimate_invalid_samples() {
    for text in ["0", "-5", "abc", "1.5", ""] {
        assert_ne!(
            run_estimate(EstimatorKind::Quadrant, text, 42, None, false),
            ExitCode::SUCCESS,
            "{text:?} should be rejected"
        );
    }
}

#[test]
fn test_run_estimate_writes_scene() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scene.json");
    let exit = run_estimate(EstimatorKind::Quadrant, "50", 3, Some(&path), true);
    assert_eq!(exit, ExitCode::SUCCESS);

    let json = std::fs::read_to_string(&path).unwrap();
    let scene: Scene = serde_json::from_str(&json).unwrap();
    assert_eq!(scene.sample_shape_count(), 50);
}

#[test]
fn test_run_estimate_scene_write_failure() {
    let exit = run_estimate(
        EstimatorKind::Quadrant,
        "10",
        1,
        Some(Path::new("/nonexistent/dir/scene.json")),
        false,
    );
    assert_ne!(exit, ExitCode::SUCCESS);
}

#[test]
fn test_run_all() {
    assert_eq!(run_all("1000", 42), ExitCode::SUCCESS);
    assert_ne!(run_all("0", 42), ExitCode::SUCCESS);
}

#[test]
fn test_run_experiment_success() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_experiment(dir.path(), "quadrant:\n  samples: 200\n");
    assert_eq!(run_experiment(&path, None, true), ExitCode::SUCCESS);
    assert_eq!(run_experiment(&path, Some(5), false), ExitCode::SUCCESS);
}

#[test]
fn test_run_experiment_missing_file() {
    let exit = run_experiment(Path::new("/nonexistent/experiment.yaml"), None, false);
    assert_ne!(exit, ExitCode::SUCCESS);
}

#[test]
fn test_run_experiment_degenerate_fails() {
    let dir = tempfile::tempdir().unwrap();
    let yaml = "needle:\n  samples: 3\n  line_spacing: 1000\n  needle_length: 1\n  field_height: 10\n";
    let path = write_experiment(dir.path(), yaml);
    assert_ne!(run_experiment(&path, None, false), ExitCode::SUCCESS);
}

#[test]
fn test_verify_reproducibility_command() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_experiment(dir.path(), "integral:\n  samples: 100\n");
    assert_eq!(verify_reproducibility(&path, 3), ExitCode::SUCCESS);
    assert_ne!(verify_reproducibility(&path, 0), ExitCode::SUCCESS);
}

#[test]
fn test_verify_invalid_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_experiment(dir.path(), "quadrant:\n  samples: 0\n");
    assert_ne!(verify_reproducibility(&path, 2), ExitCode::SUCCESS);
}
