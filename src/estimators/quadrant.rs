//! Circular-quadrant estimator: π from an area ratio.
//!
//! # Governing Equations
//!
//! ```text
//! Domain:     (x, y) ~ U([0, S) × [0, S))
//! Predicate:  √(x² + y²) ≤ S
//! Estimator:  π̂ = 4 · K / N
//! ```
//!
//! The quarter disc of radius `S` covers `π/4` of the square, so the
//! inside ratio converges to `π/4` at `O(n^{-1/2})`.

use serde::{Deserialize, Serialize};

use super::{require_positive, Estimator, Point};
use crate::engine::rng::SampleRng;
use crate::engine::sample_count::SampleCount;
use crate::error::EstimateResult;

/// Default square side (and quarter-circle radius) in domain units.
pub const DEFAULT_SIDE: f64 = 200.0;

/// Estimates π by counting points inside a quarter circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadrantEstimator {
    /// Side of the sampling square; also the quarter-circle radius.
    pub side: f64,
}

impl Default for QuadrantEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_SIDE)
    }
}

impl QuadrantEstimator {
    /// Create an estimator over `[0, side)²`.
    #[must_use]
    pub const fn new(side: f64) -> Self {
        Self { side }
    }
}

impl Estimator for QuadrantEstimator {
    type Sample = Point;

    fn name(&self) -> &'static str {
        "Circular-Quadrant"
    }

    fn validate(&self) -> EstimateResult<()> {
        require_positive("side", self.side)
    }

    fn draw(&self, rng: &mut SampleRng) -> Point {
        let x = rng.gen_range_f64(0.0, self.side);
        let y = rng.gen_range_f64(0.0, self.side);
        Point::new(x, y)
    }

    fn classify(&self, sample: &Point) -> bool {
        sample.norm() <= self.side
    }

    fn aggregate(&self, hits: u64, total: SampleCount) -> EstimateResult<f64> {
        Ok(4.0 * hits as f64 / total.as_f64())
    }
}
