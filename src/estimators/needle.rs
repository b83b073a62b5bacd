//! Needle-crossing estimator (Buffon's needle).
//!
//! # Governing Equations
//!
//! ```text
//! Needle:     y ~ U[0, H),  θ ~ U[0, π),  y₂ = y + ℓ·sin θ
//! Predicate:  ⌊y / L⌋ ≠ ⌊y₂ / L⌋
//! P(cross) =  2ℓ / (πL)              for ℓ ≤ L
//! Estimator:  π̂ = 2·ℓ·N / (K·L)
//! ```
//!
//! The estimator divides by the crossing count, so a run without a single
//! crossing is reported as [`EstimateError::DegenerateEstimate`].

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use super::{require_positive, Estimator};
use crate::engine::rng::SampleRng;
use crate::engine::sample_count::SampleCount;
use crate::error::{EstimateError, EstimateResult};

/// Default distance between guide lines.
pub const DEFAULT_LINE_SPACING: f64 = 50.0;
/// Default needle length.
pub const DEFAULT_NEEDLE_LENGTH: f64 = 40.0;
/// Default field width and height.
pub const DEFAULT_FIELD_SIZE: f64 = 400.0;

/// One dropped needle.
///
/// `(x, y)` is the anchor end, `(x2, y2)` the far end. Only the vertical
/// coordinates take part in classification; `x` places the needle on the
/// field for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Needle {
    /// Horizontal anchor position.
    pub x: f64,
    /// Vertical anchor position.
    pub y: f64,
    /// Orientation in radians, `[0, π)`.
    pub angle: f64,
    /// Horizontal far-end position.
    pub x2: f64,
    /// Vertical far-end position.
    pub y2: f64,
}

/// Estimates π from the probability that a needle crosses a guide line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NeedleEstimator {
    /// Distance `L` between parallel guide lines.
    pub line_spacing: f64,
    /// Needle length `ℓ`; must not exceed `line_spacing`.
    pub needle_length: f64,
    /// Width of the field needles land on.
    pub field_width: f64,
    /// Height `H` of the field needles land on.
    pub field_height: f64,
}

impl Default for NeedleEstimator {
    fn default() -> Self {
        Self {
            line_spacing: DEFAULT_LINE_SPACING,
            needle_length: DEFAULT_NEEDLE_LENGTH,
            field_width: DEFAULT_FIELD_SIZE,
            field_height: DEFAULT_FIELD_SIZE,
        }
    }
}

impl NeedleEstimator {
    /// Create an estimator on the default 400×400 field.
    #[must_use]
    pub fn new(line_spacing: f64, needle_length: f64) -> Self {
        Self {
            line_spacing,
            needle_length,
            ..Self::default()
        }
    }

    /// Set the field dimensions.
    #[must_use]
    pub const fn with_field(mut self, width: f64, height: f64) -> Self {
        self.field_width = width;
        self.field_height = height;
        self
    }

    /// Theoretical crossing probability `2ℓ / (πL)`.
    #[must_use]
    pub fn crossing_probability(&self) -> f64 {
        2.0 * self.needle_length / (PI * self.line_spacing)
    }

    /// Index of the line-spacing band containing `y`.
    fn band(&self, y: f64) -> f64 {
        (y / self.line_spacing).floor()
    }
}

impl Estimator for NeedleEstimator {
    type Sample = Needle;

    fn name(&self) -> &'static str {
        "Needle-Crossing"
    }

    fn validate(&self) -> EstimateResult<()> {
        require_positive("line_spacing", self.line_spacing)?;
        require_positive("needle_length", self.needle_length)?;
        require_positive("field_width", self.field_width)?;
        require_positive("field_height", self.field_height)?;
        if self.needle_length > self.line_spacing {
            return Err(EstimateError::domain(
                "needle_length",
                format!(
                    "needle length {} exceeds line spacing {}",
                    self.needle_length, self.line_spacing
                ),
            ));
        }
        Ok(())
    }

    fn draw(&self, rng: &mut SampleRng) -> Needle {
        let x = rng.gen_range_f64(0.0, self.field_width);
        let y = rng.gen_range_f64(0.0, self.field_height);
        let angle = rng.gen_range_f64(0.0, PI);
        Needle {
            x,
            y,
            angle,
            x2: self.needle_length.mul_add(angle.cos(), x),
            y2: self.needle_length.mul_add(angle.sin(), y),
        }
    }

    #[allow(clippy::float_cmp)]
    fn classify(&self, sample: &Needle) -> bool {
        self.band(sample.y) != self.band(sample.y2)
    }

    fn aggregate(&self, hits: u64, total: SampleCount) -> EstimateResult<f64> {
        if hits == 0 {
            return Err(EstimateError::DegenerateEstimate {
                estimator: self.name().to_string(),
                samples: total.get(),
            });
        }
        Ok((2.0 * self.needle_length * total.as_f64()) / (hits as f64 * self.line_spacing))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::estimators::RunConfig;

    #[test]
    fn test_equation_buffon_identity() {
        // ℓ = 40, L = 50, N = 1000, K = 509 → π̂ = 80000 / 25450
        let est = NeedleEstimator::default();
        let pi = est.aggregate(509, SampleCount::new(1000).unwrap()).unwrap();
        assert!((pi - 80_000.0 / 25_450.0).abs() < 1e-12);
    }

    #[test]
    fn test_classifier_crossing() {
        let est = NeedleEstimator::default();
        let crossing = Needle {
            x: 0.0,
            y: 45.0,
            angle: PI / 2.0,
            x2: 0.0,
            y2: 85.0,
        };
        let inside_band = Needle {
            x: 0.0,
            y: 55.0,
            angle: PI / 6.0,
            x2: 34.6,
            y2: 75.0,
        };
        assert!(est.classify(&crossing));
        assert!(!est.classify(&inside_band));
    }

    #[test]
    fn test_needle_geometry() {
        let est = NeedleEstimator::default();
        let result = est.run(&RunConfig::new(500, 8)).unwrap();
        for c in &result.samples {
            let n = c.sample;
            let len = (n.x2 - n.x).hypot(n.y2 - n.y);
            assert!((len - 40.0).abs() < 1e-9, "needle length {len}");
            assert!((0.0..PI).contains(&n.angle));
            assert!(n.y2 >= n.y);
            assert!((0.0..400.0).contains(&n.x));
            assert!((0.0..400.0).contains(&n.y));
        }
    }

    #[test]
    fn test_zero_crossings_is_degenerate() {
        // Field far thinner than the spacing: no needle can reach a line.
        let est = NeedleEstimator::new(1000.0, 1.0).with_field(100.0, 10.0);
        let err = est.run(&RunConfig::new(200, 1)).unwrap_err();
        assert!(
            matches!(err, EstimateError::DegenerateEstimate { samples: 200, .. }),
            "unexpected {err:?}"
        );
    }

    #[test]
    fn test_aggregate_zero_hits() {
        let est = NeedleEstimator::default();
        let err = est.aggregate(0, SampleCount::new(5).unwrap()).unwrap_err();
        assert!(err.is_degenerate());
    }

    #[test]
    fn test_needle_longer_than_spacing_rejected() {
        let est = NeedleEstimator::new(50.0, 60.0);
        let err = est.run(&RunConfig::new(100, 1)).unwrap_err();
        assert!(matches!(
            err,
            EstimateError::DomainParameterInvalid { ref parameter, .. } if parameter == "needle_length"
        ));
    }

    #[test]
    fn test_needle_equal_to_spacing_allowed() {
        assert!(NeedleEstimator::new(50.0, 50.0).validate().is_ok());
    }

    #[test]
    fn test_non_positive_parameters_rejected() {
        assert!(NeedleEstimator::new(0.0, 0.0).validate().is_err());
        assert!(NeedleEstimator::new(50.0, -1.0).validate().is_err());
        assert!(NeedleEstimator::default()
            .with_field(0.0, 100.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_verification_estimate_accuracy() {
        let result = NeedleEstimator::default()
            .run(&RunConfig::new(10_000, 42))
            .unwrap();
        assert!(
            (result.estimate - PI).abs() < 0.15,
            "Estimate {} too far from π",
            result.estimate
        );
    }

    #[test]
    fn test_crossing_ratio_matches_probability() {
        let est = NeedleEstimator::default();
        let result = est.run(&RunConfig::new(20_000, 7)).unwrap();
        let p = est.crossing_probability();
        assert!(
            (result.hit_ratio() - p).abs() < 5.0 * result.ratio_std_error(),
            "ratio {} vs p {p}",
            result.hit_ratio()
        );
    }
}
