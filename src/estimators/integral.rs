//! Function-integral estimator: a definite integral from an under-curve ratio.
//!
//! # Governing Equations
//!
//! ```text
//! Domain:     x ~ U[a, b),  y ~ U[0, M)
//! Predicate:  y ≤ g(x)
//! Estimator:  Î = (K / N) · (b − a) · M
//! ```
//!
//! Valid for integrands with `0 ≤ g(x) ≤ M` on `[a, b]`. Every drawn `x`
//! is checked against that bound, so a ceiling that fails to dominate
//! the integrand surfaces as an error instead of a silently biased estimate.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

use super::{require_interval, require_positive, Estimator, Point};
use crate::engine::rng::SampleRng;
use crate::engine::sample_count::SampleCount;
use crate::error::{EstimateError, EstimateResult};
use crate::report::integral_label;

/// A pure real function of one variable.
pub trait Integrand {
    /// Evaluate `g(x)`.
    fn eval(&self, x: f64) -> f64;

    /// Right-hand side of `g(x) = ...`, used in display labels.
    fn expression(&self) -> &str {
        "g(x)"
    }
}

impl<F> Integrand for F
where
    F: Fn(f64) -> f64,
{
    fn eval(&self, x: f64) -> f64 {
        self(x)
    }
}

/// `g(x) = sin(x) + 1`, bounded by `[0, 2]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinPlusOne;

impl SinPlusOne {
    /// Exact integral over `[0, π]`.
    pub const INTEGRAL_0_PI: f64 = PI + 2.0;
}

impl Integrand for SinPlusOne {
    fn eval(&self, x: f64) -> f64 {
        x.sin() + 1.0
    }

    fn expression(&self) -> &str {
        "sin(x) + 1"
    }
}

/// Named integrand presets, selectable from configuration files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrandKind {
    /// [`SinPlusOne`].
    #[default]
    SinPlusOne,
}

impl Integrand for IntegrandKind {
    fn eval(&self, x: f64) -> f64 {
        match self {
            Self::SinPlusOne => SinPlusOne.eval(x),
        }
    }

    fn expression(&self) -> &str {
        match self {
            Self::SinPlusOne => "sin(x) + 1",
        }
    }
}

/// Estimates `∫ₐᵇ g(x) dx` by sampling the rectangle `[a, b) × [0, M)`.
#[derive(Clone)]
pub struct FunctionIntegralEstimator<G> {
    /// Lower integration bound `a`.
    pub lower: f64,
    /// Upper integration bound `b`.
    pub upper: f64,
    /// Vertical bound `M`; must dominate the integrand on `[a, b]`.
    pub ceiling: f64,
    /// The integrand strategy.
    pub integrand: G,
}

impl<G> fmt::Debug for FunctionIntegralEstimator<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionIntegralEstimator")
            .field("lower", &self.lower)
            .field("upper", &self.upper)
            .field("ceiling", &self.ceiling)
            .finish_non_exhaustive()
    }
}

impl Default for FunctionIntegralEstimator<SinPlusOne> {
    fn default() -> Self {
        Self::new(SinPlusOne, 0.0, PI, 2.0)
    }
}

impl<G: Integrand> FunctionIntegralEstimator<G> {
    /// Create an estimator for `integrand` over `[lower, upper]` with bound `ceiling`.
    #[must_use]
    pub const fn new(integrand: G, lower: f64, upper: f64, ceiling: f64) -> Self {
        Self {
            lower,
            upper,
            ceiling,
            integrand,
        }
    }

    /// Area of the sampling rectangle, `(b − a) · M`.
    #[must_use]
    pub fn bounding_area(&self) -> f64 {
        (self.upper - self.lower) * self.ceiling
    }

    /// `∫(g(x))dx from a to b` for this integrand and interval.
    #[must_use]
    pub fn label(&self) -> String {
        integral_label(self.integrand.expression(), self.lower, self.upper)
    }
}

impl<G: Integrand> Estimator for FunctionIntegralEstimator<G> {
    type Sample = Point;

    fn name(&self) -> &'static str {
        "Function-Integral"
    }

    fn caption(&self) -> Option<String> {
        Some(self.label())
    }

    fn validate(&self) -> EstimateResult<()> {
        require_interval("interval", self.lower, self.upper)?;
        require_positive("ceiling", self.ceiling)
    }

    fn draw(&self, rng: &mut SampleRng) -> Point {
        let x = rng.gen_range_f64(self.lower, self.upper);
        let y = rng.gen_range_f64(0.0, self.ceiling);
        Point::new(x, y)
    }

    fn check_sample(&self, sample: &Point) -> EstimateResult<()> {
        let g = self.integrand.eval(sample.x);
        if !g.is_finite() {
            return Err(EstimateError::domain(
                "integrand",
                format!("g({}) is not finite", sample.x),
            ));
        }
        if g < 0.0 || g > self.ceiling {
            return Err(EstimateError::domain(
                "ceiling",
                format!(
                    "g({}) = {g} lies outside [0, {}]",
                    sample.x, self.ceiling
                ),
            ));
        }
        Ok(())
    }

    fn classify(&self, sample: &Point) -> bool {
        sample.y <= self.integrand.eval(sample.x)
    }

    fn aggregate(&self, hits: u64, total: SampleCount) -> EstimateResult<f64> {
        Ok(hits as f64 / total.as_f64() * self.bounding_area())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::estimators::RunConfig;

    #[test]
    fn test_equation_bounding_area() {
        let est = FunctionIntegralEstimator::default();
        assert!((est.bounding_area() - 2.0 * PI).abs() < 1e-12);
        let value = est.aggregate(500, SampleCount::new(1000).unwrap()).unwrap();
        assert!((value - PI).abs() < 1e-12);
    }

    #[test]
    fn test_classifier_under_curve() {
        let est = FunctionIntegralEstimator::default();
        assert!(est.classify(&Point::new(PI / 2.0, 1.99)));
        assert!(est.classify(&Point::new(0.0, 1.0)));
        assert!(!est.classify(&Point::new(0.0, 1.01)));
    }

    #[test]
    fn test_verification_sin_plus_one() {
        for seed in [1, 42, 777] {
            let result = FunctionIntegralEstimator::default()
                .run(&RunConfig::new(10_000, seed))
                .unwrap();
            let exact = SinPlusOne::INTEGRAL_0_PI;
            assert!(
                (result.estimate - exact).abs() / exact < 0.05,
                "seed {seed}: estimate {} vs {exact}",
                result.estimate
            );
        }
    }

    #[test]
    fn test_closure_integrand() {
        // ∫₀¹ x² dx = 1/3
        let est = FunctionIntegralEstimator::new(|x: f64| x * x, 0.0, 1.0, 1.0);
        let result = est.run(&RunConfig::new(20_000, 42)).unwrap();
        assert!((result.estimate - 1.0 / 3.0).abs() < 0.02, "{}", result.estimate);
    }

    #[test]
    fn test_samples_in_rectangle() {
        let est = FunctionIntegralEstimator::new(SinPlusOne, 1.0, 2.0, 2.0);
        let result = est.run(&RunConfig::new(1000, 5)).unwrap();
        for c in &result.samples {
            assert!((1.0..2.0).contains(&c.sample.x));
            assert!((0.0..2.0).contains(&c.sample.y));
        }
    }

    #[test]
    fn test_ceiling_not_dominating() {
        let est = FunctionIntegralEstimator::new(SinPlusOne, 0.0, PI, 1.5);
        let err = est.run(&RunConfig::new(1000, 1)).unwrap_err();
        assert!(matches!(
            err,
            EstimateError::DomainParameterInvalid { ref parameter, .. } if parameter == "ceiling"
        ));
    }

    #[test]
    fn test_negative_integrand_rejected() {
        let est = FunctionIntegralEstimator::new(|x: f64| x.sin(), PI, 2.0 * PI, 1.0);
        assert!(est.run(&RunConfig::new(100, 1)).is_err());
    }

    #[test]
    fn test_non_finite_integrand_rejected() {
        let est = FunctionIntegralEstimator::new(|_x: f64| f64::NAN, 0.0, 1.0, 1.0);
        let err = est.run(&RunConfig::new(10, 1)).unwrap_err();
        assert!(err.to_string().contains("not finite"));
    }

    #[test]
    fn test_integrand_kind() {
        let kind: IntegrandKind = serde_yaml::from_str("sin_plus_one").unwrap();
        assert_eq!(kind, IntegrandKind::SinPlusOne);
        assert!((kind.eval(0.0) - 1.0).abs() < 1e-12);
        assert_eq!(kind.expression(), "sin(x) + 1");
    }

    #[test]
    fn test_label_follows_interval() {
        assert_eq!(
            FunctionIntegralEstimator::default().label(),
            "∫(sin(x) + 1)dx from 0 to π"
        );
        let est = FunctionIntegralEstimator::new(IntegrandKind::SinPlusOne, 1.0, 2.5, 2.0);
        assert_eq!(est.label(), "∫(sin(x) + 1)dx from 1 to 2.5");
        assert_eq!(est.caption().as_deref(), Some(est.label().as_str()));

        let est = FunctionIntegralEstimator::new(|x: f64| x * x, -1.0, 1.0, 1.0);
        assert_eq!(est.label(), "∫(g(x))dx from -1 to 1");
    }

    #[test]
    fn test_invalid_interval() {
        let est = FunctionIntegralEstimator::new(SinPlusOne, 2.0, 1.0, 2.0);
        assert!(est.validate().is_err());
        let est = FunctionIntegralEstimator::new(SinPlusOne, 0.0, 1.0, 0.0);
        assert!(est.validate().is_err());
    }

    #[test]
    fn test_invalid_sample_count_draws_nothing() {
        let est = FunctionIntegralEstimator::default();
        assert!(matches!(
            est.run(&RunConfig::new(-5, 1)),
            Err(EstimateError::InvalidSampleCount { .. })
        ));
    }
}
