//! # estimar
//!
//! Seeded Monte Carlo estimators for π, planar areas and definite integrals.
//!
//! Four estimators share one sampling contract:
//! - Circular quadrant: π from the area ratio of a quarter circle
//! - Needle crossing: π from Buffon's needle-drop experiment
//! - Region area: area enclosed by an implicit curve
//! - Function integral: definite integral from an under-curve ratio
//!
//! Every run owns its generator, so results are reproducible from the seed
//! and independent of any other run.
//!
//! ## Example
//!
//! ```rust
//! use estimar::prelude::*;
//!
//! let result = QuadrantEstimator::default()
//!     .run(&RunConfig::new(10_000, 42))
//!     .unwrap();
//! assert_eq!(result.sample_count, 10_000);
//! assert!((result.estimate - std::f64::consts::PI).abs() < 0.1);
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::suboptimal_flops,
    clippy::imprecise_flops,
    clippy::missing_const_for_fn,
)]

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod estimators;
pub mod experiment;
pub mod render;
pub mod report;
pub mod telemetry;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{ExperimentConfig, ExperimentConfigBuilder};
    pub use crate::engine::rng::SampleRng;
    pub use crate::engine::sample_count::SampleCount;
    pub use crate::error::{EstimateError, EstimateResult};
    pub use crate::estimators::{
        Classified, Estimator, FunctionIntegralEstimator, ImplicitRegion, Integrand,
        NeedleEstimator, Point, QuadrantEstimator, RegionAreaEstimator, RunConfig, RunResult,
    };
    pub use crate::experiment::{EstimatorKind, ExperimentRunner};
    pub use crate::render::{Scene, SceneBuilder, Surface};
    pub use crate::report::RunSummary;
}

/// Re-export for public API
pub use error::{EstimateError, EstimateResult};
