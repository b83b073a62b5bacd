//! Experiment runner: configuration-driven estimator execution.
//!
//! This module provides the execution layer shared by the CLI:
//! - Running a single default estimator (optionally producing a scene)
//! - Running every enabled section of an [`ExperimentConfig`]
//! - Verifying reproducibility by comparing run digests
//!
//! # CLI Commands Supported
//!
//! ```bash
//! estimar run experiments/pi.yaml
//! estimar run experiments/pi.yaml --seed 12345
//! estimar verify experiments/pi.yaml --runs 5
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Instant;

use crate::config::ExperimentConfig;
use crate::error::{EstimateError, EstimateResult};
use crate::estimators::{
    Estimator, FunctionIntegralEstimator, NeedleEstimator, QuadrantEstimator,
    RegionAreaEstimator, RunConfig,
};
use crate::render::{Palette, Scene, SceneBuilder, Surface};
use crate::report::{Quantity, RunSummary};

/// The four estimators the crate ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimatorKind {
    /// Circular-quadrant π estimator.
    Quadrant,
    /// Needle-crossing π estimator.
    Needle,
    /// Implicit-region area estimator.
    Region,
    /// Definite-integral estimator.
    Integral,
}

impl EstimatorKind {
    /// All kinds, in display order.
    pub const ALL: [Self; 4] = [Self::Quadrant, Self::Needle, Self::Region, Self::Integral];

    /// Estimator display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Quadrant => "Circular-Quadrant",
            Self::Needle => "Needle-Crossing",
            Self::Region => "Region-Area",
            Self::Integral => "Function-Integral",
        }
    }

    /// Quantity estimated by this kind.
    #[must_use]
    pub const fn quantity(self) -> Quantity {
        match self {
            Self::Quadrant | Self::Needle => Quantity::Pi,
            Self::Region => Quantity::Area,
            Self::Integral => Quantity::Integral,
        }
    }

    /// CLI subcommand selecting this kind.
    #[must_use]
    pub const fn command(self) -> &'static str {
        match self {
            Self::Quadrant => "pi",
            Self::Needle => "buffon",
            Self::Region => "area",
            Self::Integral => "integral",
        }
    }

    /// Look up a kind by its CLI subcommand.
    #[must_use]
    pub fn from_command(command: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.command() == command)
    }
}

impl fmt::Display for EstimatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A finished run of one estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatorRun {
    /// Which estimator ran.
    pub kind: EstimatorKind,
    /// Summary without the sample log.
    pub summary: RunSummary,
    /// blake3 digest of the full result.
    pub digest: String,
    /// Display list, when one was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene: Option<Scene>,
}

fn execute<E: SceneBuilder>(
    estimator: &E,
    kind: EstimatorKind,
    config: &RunConfig,
    surface: Option<Surface>,
) -> EstimateResult<EstimatorRun> {
    let result = estimator.run(config)?;
    let caption = estimator.caption();
    let summary = RunSummary::from_result(&result, kind.quantity(), caption.as_deref());
    let digest = result.digest()?;
    let scene = surface.map(|s| estimator.scene(&result, s, &Palette::default()));
    Ok(EstimatorRun {
        kind,
        summary,
        digest,
        scene,
    })
}

/// Run the default instance of one estimator.
///
/// A scene for `surface` is built alongside the summary when requested.
///
/// # Errors
///
/// Returns any error raised by the estimator run.
pub fn run_single(
    kind: EstimatorKind,
    config: &RunConfig,
    surface: Option<Surface>,
) -> EstimateResult<EstimatorRun> {
    match kind {
        EstimatorKind::Quadrant => execute(&QuadrantEstimator::default(), kind, config, surface),
        EstimatorKind::Needle => execute(&NeedleEstimator::default(), kind, config, surface),
        EstimatorKind::Region => execute(&RegionAreaEstimator::default(), kind, config, surface),
        EstimatorKind::Integral => {
            execute(&FunctionIntegralEstimator::default(), kind, config, surface)
        }
    }
}

/// Outcome of one estimator inside an experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatorOutcome {
    /// Which estimator ran.
    pub kind: EstimatorKind,
    /// Summary, if the run succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<RunSummary>,
    /// Result digest, if the run succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    /// Error message, if the run failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Display list, when the runner captures scenes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene: Option<Scene>,
}

impl EstimatorOutcome {
    fn from_run(kind: EstimatorKind, run: EstimateResult<EstimatorRun>) -> Self {
        match run {
            Ok(run) => Self {
                kind,
                summary: Some(run.summary),
                digest: Some(run.digest),
                error: None,
                scene: run.scene,
            },
            Err(err) => Self {
                kind,
                summary: None,
                digest: None,
                error: Some(err.to_string()),
                scene: None,
            },
        }
    }

    /// Whether the estimator produced an estimate.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.error.is_none()
    }

    /// Token used when fingerprinting a whole experiment run.
    fn fingerprint(&self) -> &str {
        self.digest
            .as_deref()
            .or(self.error.as_deref())
            .unwrap_or_default()
    }
}

/// Result of running an experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentReport {
    /// Experiment name
    pub name: String,
    /// Seed used for this run
    pub seed: u64,
    /// Per-estimator outcomes, in display order
    pub outcomes: Vec<EstimatorOutcome>,
    /// Total execution time in milliseconds
    pub duration_ms: u64,
}

impl ExperimentReport {
    /// Whether every enabled estimator produced an estimate.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.outcomes.iter().all(EstimatorOutcome::passed)
    }

    /// blake3 fingerprint over every outcome, independent of timing.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.seed.to_le_bytes());
        for outcome in &self.outcomes {
            hasher.update(outcome.kind.name().as_bytes());
            hasher.update(outcome.fingerprint().as_bytes());
        }
        hasher.finalize().to_hex().to_string()
    }
}

/// Summary of reproducibility verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReproducibilitySummary {
    /// Whether all runs produced identical results
    pub passed: bool,
    /// Number of runs performed
    pub runs: usize,
    /// Fingerprint of the first run
    pub reference_hash: String,
    /// Fingerprints of all runs
    pub run_hashes: Vec<String>,
    /// Platform information
    pub platform: String,
}

/// Runs experiments described by [`ExperimentConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ExperimentRunner {
    seed_override: Option<u64>,
    capture_scenes: bool,
}

impl ExperimentRunner {
    /// Create a runner that uses each configuration's own seed.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            seed_override: None,
            capture_scenes: false,
        }
    }

    /// Replace the configured seed for every run.
    #[must_use]
    pub const fn with_seed_override(mut self, seed: Option<u64>) -> Self {
        self.seed_override = seed;
        self
    }

    /// Build a scene on the configured render surface for every estimator.
    #[must_use]
    pub const fn with_scenes(mut self, capture: bool) -> Self {
        self.capture_scenes = capture;
        self
    }

    /// Seed a run of `config` will use.
    #[must_use]
    pub fn effective_seed(&self, config: &ExperimentConfig) -> u64 {
        self.seed_override.unwrap_or_else(|| config.seed())
    }

    /// Load and run an experiment file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be loaded or validated.
    pub fn run_file<P: AsRef<Path>>(&self, path: P) -> EstimateResult<ExperimentReport> {
        let config = ExperimentConfig::load(path)?;
        Ok(self.run(&config))
    }

    /// Run every enabled estimator of `config`.
    ///
    /// Estimator failures are recorded in the report rather than aborting
    /// the remaining estimators.
    #[must_use]
    pub fn run(&self, config: &ExperimentConfig) -> ExperimentReport {
        let start = Instant::now();
        let seed = self.effective_seed(config);

        tracing::debug!(name = %config.name, seed, "running experiment");

        let surface = self.capture_scenes.then(|| config.render.surface());

        let mut outcomes = Vec::with_capacity(config.enabled_count());
        for kind in EstimatorKind::ALL {
            let run = match kind {
                EstimatorKind::Quadrant => config.quadrant().map(|s| {
                    execute(&s.estimator(), kind, &RunConfig::new(s.samples, seed), surface)
                }),
                EstimatorKind::Needle => config.needle().map(|s| {
                    execute(&s.estimator(), kind, &RunConfig::new(s.samples, seed), surface)
                }),
                EstimatorKind::Region => config.region().map(|s| {
                    execute(&s.estimator(), kind, &RunConfig::new(s.samples, seed), surface)
                }),
                EstimatorKind::Integral => config.integral().map(|s| {
                    execute(&s.estimator(), kind, &RunConfig::new(s.samples, seed), surface)
                }),
            };
            if let Some(run) = run {
                outcomes.push(EstimatorOutcome::from_run(kind, run));
            }
        }

        let duration = start.elapsed();

        ExperimentReport {
            name: config.name.clone(),
            seed,
            outcomes,
            duration_ms: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Run `config` `runs` times and compare fingerprints.
    ///
    /// # Errors
    ///
    /// Returns [`EstimateError::Config`] if `runs` is zero.
    pub fn verify(
        &self,
        config: &ExperimentConfig,
        runs: usize,
    ) -> EstimateResult<ReproducibilitySummary> {
        if runs == 0 {
            return Err(EstimateError::config(
                "reproducibility verification needs at least one run",
            ));
        }

        let run_hashes: Vec<String> = (0..runs).map(|_| self.run(config).fingerprint()).collect();
        let reference_hash = run_hashes.first().cloned().unwrap_or_default();
        let passed = run_hashes.iter().all(|h| *h == reference_hash);

        if !passed {
            tracing::warn!(runs, "experiment runs diverged");
        }

        Ok(ReproducibilitySummary {
            passed,
            runs,
            reference_hash,
            run_hashes,
            platform: std::env::consts::ARCH.to_string(),
        })
    }
}
