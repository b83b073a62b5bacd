//! Region-area estimator for implicitly defined planar regions.
//!
//! # Governing Equations
//!
//! ```text
//! Domain:     (u, v) ~ U([0, S) × [0, S))
//! Mapping:    x = lo + (u / S)·(hi − lo),  y likewise
//! Predicate:  f(x, y) ≤ 0
//! Estimator:  Â = (K / N) · S²
//! ```
//!
//! The region is a strategy: anything implementing [`ImplicitRegion`],
//! including plain closures `Fn(f64, f64) -> bool`.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{require_interval, require_positive, Estimator, Point};
use crate::engine::rng::SampleRng;
use crate::engine::sample_count::SampleCount;
use crate::error::EstimateResult;

/// Default bounding-square side in domain units.
pub const DEFAULT_SIDE: f64 = 400.0;
/// Default logical coordinate range both axes are mapped onto.
pub const DEFAULT_LOGICAL_RANGE: (f64, f64) = (-10.0, 10.0);

/// A closed planar region given by an implicit inequality.
///
/// Implementations must be pure: the same point always yields the same answer.
pub trait ImplicitRegion {
    /// Whether the logical point `(x, y)` lies inside the region.
    fn contains(&self, x: f64, y: f64) -> bool;
}

impl<F> ImplicitRegion for F
where
    F: Fn(f64, f64) -> bool,
{
    fn contains(&self, x: f64, y: f64) -> bool {
        self(x, y)
    }
}

/// The quartic heart curve `(x² + y² − 1)³ − x²y³ ≤ 0`.
///
/// The region spans roughly `[-1.14, 1.14] × [-1, 1.25]` in logical units
/// and encloses an area of about 3.66.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartCurve;

impl ImplicitRegion for HeartCurve {
    fn contains(&self, x: f64, y: f64) -> bool {
        let x2 = x * x;
        (x2 + y * y - 1.0).powi(3) - x2 * y.powi(3) <= 0.0
    }
}

/// A disc `x² + y² − r² ≤ 0` centred on the logical origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Disk {
    /// Disc radius in logical units.
    pub radius: f64,
}

impl ImplicitRegion for Disk {
    fn contains(&self, x: f64, y: f64) -> bool {
        x.mul_add(x, y * y) - self.radius * self.radius <= 0.0
    }
}

/// Named region presets, selectable from configuration files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegionShape {
    /// [`HeartCurve`].
    #[default]
    Heart,
    /// [`Disk`] with the given radius.
    Disk {
        /// Disc radius in logical units.
        radius: f64,
    },
}

impl ImplicitRegion for RegionShape {
    fn contains(&self, x: f64, y: f64) -> bool {
        match *self {
            Self::Heart => HeartCurve.contains(x, y),
            Self::Disk { radius } => Disk { radius }.contains(x, y),
        }
    }
}

/// Estimates the area of an implicit region inside a bounding square.
#[derive(Clone)]
pub struct RegionAreaEstimator<R> {
    /// Side `S` of the bounding square.
    pub side: f64,
    /// Logical coordinate at domain position 0.
    pub logical_min: f64,
    /// Logical coordinate approached at domain position `S`.
    pub logical_max: f64,
    /// The region strategy.
    pub region: R,
}

impl<R> fmt::Debug for RegionAreaEstimator<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegionAreaEstimator")
            .field("side", &self.side)
            .field("logical_min", &self.logical_min)
            .field("logical_max", &self.logical_max)
            .finish_non_exhaustive()
    }
}

impl Default for RegionAreaEstimator<HeartCurve> {
    fn default() -> Self {
        Self::new(DEFAULT_SIDE, HeartCurve)
    }
}

impl<R: ImplicitRegion> RegionAreaEstimator<R> {
    /// Create an estimator mapping `[0, side)` onto the default logical range.
    #[must_use]
    pub const fn new(side: f64, region: R) -> Self {
        Self {
            side,
            logical_min: DEFAULT_LOGICAL_RANGE.0,
            logical_max: DEFAULT_LOGICAL_RANGE.1,
            region,
        }
    }

    /// Override the logical coordinate range.
    #[must_use]
    pub const fn with_logical_range(mut self, min: f64, max: f64) -> Self {
        self.logical_min = min;
        self.logical_max = max;
        self
    }

    /// Map a domain coordinate onto the logical axis.
    #[must_use]
    pub fn to_logical(&self, v: f64) -> f64 {
        (v / self.side).mul_add(self.logical_max - self.logical_min, self.logical_min)
    }

    /// Whether a domain-space point falls inside the region.
    #[must_use]
    pub fn contains_domain_point(&self, point: &Point) -> bool {
        self.region
            .contains(self.to_logical(point.x), self.to_logical(point.y))
    }
}

impl<R: ImplicitRegion> Estimator for RegionAreaEstimator<R> {
    type Sample = Point;

    fn name(&self) -> &'static str {
        "Region-Area"
    }

    fn validate(&self) -> EstimateResult<()> {
        require_positive("side", self.side)?;
        require_interval("logical_range", self.logical_min, self.logical_max)
    }

    fn draw(&self, rng: &mut SampleRng) -> Point {
        let x = rng.gen_range_f64(0.0, self.side);
        let y = rng.gen_range_f64(0.0, self.side);
        Point::new(x, y)
    }

    fn classify(&self, sample: &Point) -> bool {
        self.contains_domain_point(sample)
    }

    fn aggregate(&self, hits: u64, total: SampleCount) -> EstimateResult<f64> {
        Ok(hits as f64 / total.as_f64() * self.side * self.side)
    }
}
