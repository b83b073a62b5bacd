//! Monte Carlo estimators.
//!
//! All four estimators share one shape: draw `N` samples uniformly from a
//! fixed domain, classify each one with a pure predicate, and map the
//! positive count `K` and the total `N` to an estimate.
//!
//! ```text
//! Quadrant:  π̂    = 4 · K / N
//! Needle:    π̂    = 2 · ℓ · N / (K · L)
//! Region:    Â    = (K / N) · S²
//! Integral:  Î    = (K / N) · (b − a) · M
//! ```
//!
//! The sampling loop lives in [`Estimator::run_with_rng`]; concrete
//! estimators only supply the domain, the predicate and the formula.

pub mod integral;
pub mod needle;
pub mod quadrant;
pub mod region;

pub use integral::{FunctionIntegralEstimator, Integrand, IntegrandKind, SinPlusOne};
pub use needle::{Needle, NeedleEstimator};
pub use quadrant::QuadrantEstimator;
pub use region::{Disk, HeartCurve, ImplicitRegion, RegionAreaEstimator, RegionShape};

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::engine::rng::SampleRng;
use crate::engine::sample_count::SampleCount;
use crate::error::{EstimateError, EstimateResult};

/// Upper bound on the sample log reserved up front; larger logs grow on demand.
const PREALLOCATE_LIMIT: usize = 1 << 20;

/// A point drawn from a planar sampling domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal domain coordinate.
    pub x: f64,
    /// Vertical domain coordinate.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance from the origin.
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// One sample paired with its classification, in draw order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classified<S> {
    /// The drawn sample.
    pub sample: S,
    /// Whether the sample satisfied the estimator's predicate.
    pub hit: bool,
}

/// Per-run parameters supplied by the caller.
///
/// The sample count is signed on purpose: zero and negative counts are
/// representable and rejected before any generator is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Requested number of samples `N`.
    pub sample_count: i64,
    /// Seed for the run's private generator.
    pub seed: u64,
}

impl RunConfig {
    /// Create a run configuration.
    #[must_use]
    pub const fn new(sample_count: i64, seed: u64) -> Self {
        Self { sample_count, seed }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            sample_count: 1000,
            seed: 42,
        }
    }
}

/// Output of one estimation run.
///
/// Owned and immutable in spirit: every call to [`Estimator::run`]
/// produces a fresh value with its own sample log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult<S> {
    /// Name of the estimator that produced this result.
    pub estimator: String,
    /// Master seed of the generator used for the run.
    pub seed: u64,
    /// Total samples drawn (`N`).
    pub sample_count: u64,
    /// Positively classified samples (`K`).
    pub hits: u64,
    /// Derived estimate.
    pub estimate: f64,
    /// Every sample with its classification, in generation order.
    pub samples: Vec<Classified<S>>,
}

impl<S> RunResult<S> {
    /// Samples that failed the predicate (`N − K`).
    #[must_use]
    pub const fn misses(&self) -> u64 {
        self.sample_count - self.hits
    }

    /// Fraction of positively classified samples, `K / N`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_ratio(&self) -> f64 {
        self.hits as f64 / self.sample_count as f64
    }

    /// Binomial standard error of the hit ratio, `sqrt(p(1 − p) / N)`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ratio_std_error(&self) -> f64 {
        let p = self.hit_ratio();
        (p * (1.0 - p) / self.sample_count as f64).sqrt()
    }
}

impl<S: Serialize> RunResult<S> {
    /// Hex-encoded blake3 digest of the result's canonical JSON form.
    ///
    /// Two runs with the same estimator, configuration and seed have the
    /// same digest.
    ///
    /// # Errors
    ///
    /// Returns [`EstimateError::Serialization`] if the result cannot be encoded.
    pub fn digest(&self) -> EstimateResult<String> {
        let bytes = serde_json::to_vec(self)?;
        Ok(blake3::hash(&bytes).to_hex().to_string())
    }
}

/// Common contract for every Monte Carlo estimator.
///
/// Implementors supply the domain ([`draw`](Self::draw)), the predicate
/// ([`classify`](Self::classify)) and the formula
/// ([`aggregate`](Self::aggregate)); the provided [`run`](Self::run)
/// drives the sampling loop.
pub trait Estimator {
    /// One draw from the estimator's domain.
    type Sample: Clone + Debug + Serialize;

    /// Human-readable estimator name.
    fn name(&self) -> &'static str;

    /// Caption for the estimated quantity when it depends on the parameters.
    fn caption(&self) -> Option<String> {
        None
    }

    /// Check domain parameters before sampling.
    ///
    /// # Errors
    ///
    /// Returns [`EstimateError::DomainParameterInvalid`] on misconfiguration.
    fn validate(&self) -> EstimateResult<()> {
        Ok(())
    }

    /// Draw one sample uniformly from the domain.
    fn draw(&self, rng: &mut SampleRng) -> Self::Sample;

    /// Pure predicate deciding whether a sample counts towards `K`.
    fn classify(&self, sample: &Self::Sample) -> bool;

    /// Per-sample domain check run before classification.
    ///
    /// # Errors
    ///
    /// Returns [`EstimateError::DomainParameterInvalid`] when a sample
    /// exposes a precondition violation.
    fn check_sample(&self, _sample: &Self::Sample) -> EstimateResult<()> {
        Ok(())
    }

    /// Map the classification counts to the final estimate.
    ///
    /// # Errors
    ///
    /// Returns [`EstimateError::DegenerateEstimate`] when the formula is
    /// undefined for the observed counts.
    fn aggregate(&self, hits: u64, total: SampleCount) -> EstimateResult<f64>;

    /// Run the estimator with a fresh generator seeded from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`EstimateError::InvalidSampleCount`] for `N <= 0` before any
    /// sampling, or any error from [`run_with_rng`](Self::run_with_rng).
    fn run(&self, config: &RunConfig) -> EstimateResult<RunResult<Self::Sample>> {
        let count = SampleCount::new(config.sample_count)?;
        let mut rng = SampleRng::new(config.seed);
        self.run_with_rng(count, &mut rng)
    }

    /// Run the estimator drawing from a caller-supplied generator.
    ///
    /// # Errors
    ///
    /// Returns domain, per-sample, or degenerate-estimate errors.
    fn run_with_rng(
        &self,
        count: SampleCount,
        rng: &mut SampleRng,
    ) -> EstimateResult<RunResult<Self::Sample>> {
        self.validate()?;

        tracing::debug!(
            estimator = self.name(),
            samples = count.get(),
            seed = rng.master_seed(),
            "starting run"
        );

        let total = count.get();
        let capacity = usize::try_from(total).map_or(PREALLOCATE_LIMIT, |n| n.min(PREALLOCATE_LIMIT));
        let mut samples = Vec::with_capacity(capacity);
        let mut hits = 0_u64;

        for _ in 0..total {
            let sample = self.draw(rng);
            self.check_sample(&sample)?;
            let hit = self.classify(&sample);
            if hit {
                hits += 1;
            }
            samples.push(Classified { sample, hit });
        }

        debug_assert!(hits <= total);

        let estimate = match self.aggregate(hits, count) {
            Ok(estimate) => estimate,
            Err(err) => {
                tracing::warn!(estimator = self.name(), samples = total, error = %err, "run produced no estimate");
                return Err(err);
            }
        };

        if !estimate.is_finite() {
            return Err(EstimateError::DegenerateEstimate {
                estimator: self.name().to_string(),
                samples: total,
            });
        }

        tracing::debug!(
            estimator = self.name(),
            hits,
            estimate,
            "run complete"
        );

        Ok(RunResult {
            estimator: self.name().to_string(),
            seed: rng.master_seed(),
            sample_count: total,
            hits,
            estimate,
            samples,
        })
    }
}

/// Check that a domain parameter is finite and strictly positive.
pub(crate) fn require_positive(parameter: &str, value: f64) -> EstimateResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EstimateError::domain(
            parameter,
            format!("must be finite and positive, got {value}"),
        ))
    }
}

/// Check that a pair of bounds forms a non-empty finite interval.
pub(crate) fn require_interval(parameter: &str, lower: f64, upper: f64) -> EstimateResult<()> {
    if lower.is_finite() && upper.is_finite() && lower < upper {
        Ok(())
    } else {
        Err(EstimateError::domain(
            parameter,
            format!("expected finite bounds with lower < upper, got [{lower}, {upper}]"),
        ))
    }
}
