//! Display formatting for estimates.
//!
//! π and integral estimates are shown with six decimals, areas with two.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

use crate::estimators::RunResult;

/// Decimal places for π and integral estimates.
pub const PRECISE_DECIMALS: usize = 6;
/// Decimal places for area estimates.
pub const AREA_DECIMALS: usize = 2;

/// `Estimated π: 3.141600 (Actual: 3.141593)`
#[must_use]
pub fn format_pi(estimate: f64) -> String {
    format!(
        "Estimated π: {:.*} (Actual: {:.*})",
        PRECISE_DECIMALS, estimate, PRECISE_DECIMALS, PI
    )
}

/// `Estimated Area: 1234.56 square units`
#[must_use]
pub fn format_area(estimate: f64) -> String {
    format!("Estimated Area: {:.*} square units", AREA_DECIMALS, estimate)
}

/// `∫(sin(x) + 1)dx from 0 to π ≈ 5.141593`
#[must_use]
pub fn format_integral(label: &str, estimate: f64) -> String {
    format!("{label} ≈ {:.*}", PRECISE_DECIMALS, estimate)
}

/// Label for an integral without a known integrand or interval.
pub const UNLABELLED_INTEGRAL: &str = "∫g(x)dx";

/// Integration bound as shown in labels: `π` for π, otherwise the shortest
/// decimal form.
fn format_bound(value: f64) -> String {
    if (value - PI).abs() < 1e-12 {
        "π".to_string()
    } else {
        // Adding zero folds -0 into 0.
        (value + 0.0).to_string()
    }
}

/// `∫(sin(x) + 1)dx from 0 to π`
#[must_use]
pub fn integral_label(expression: &str, lower: f64, upper: f64) -> String {
    format!(
        "∫({expression})dx from {} to {}",
        format_bound(lower),
        format_bound(upper)
    )
}

/// What kind of quantity a run estimates; selects the formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    /// The constant π.
    Pi,
    /// A planar area.
    Area,
    /// A definite integral.
    Integral,
}

/// Compact, serializable description of a run without its sample log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Estimator name.
    pub estimator: String,
    /// Quantity being estimated.
    pub quantity: Quantity,
    /// Seed used for the run.
    pub seed: u64,
    /// Total samples `N`.
    pub samples: u64,
    /// Positive classifications `K`.
    pub hits: u64,
    /// `K / N`.
    pub hit_ratio: f64,
    /// Binomial standard error of `K / N`.
    pub ratio_std_error: f64,
    /// Derived estimate.
    pub estimate: f64,
    /// Pre-formatted display line.
    pub display: String,
}

impl RunSummary {
    /// Summarize a run.
    ///
    /// `caption` labels integral estimates, see [`Estimator::caption`].
    ///
    /// [`Estimator::caption`]: crate::estimators::Estimator::caption
    #[must_use]
    pub fn from_result<S>(
        result: &RunResult<S>,
        quantity: Quantity,
        caption: Option<&str>,
    ) -> Self {
        let display = match quantity {
            Quantity::Pi => format_pi(result.estimate),
            Quantity::Area => format_area(result.estimate),
            Quantity::Integral => {
                format_integral(caption.unwrap_or(UNLABELLED_INTEGRAL), result.estimate)
            }
        };
        Self {
            estimator: result.estimator.clone(),
            quantity,
            seed: result.seed,
            samples: result.sample_count,
            hits: result.hits,
            hit_ratio: result.hit_ratio(),
            ratio_std_error: result.ratio_std_error(),
            estimate: result.estimate,
            display,
        }
    }

    /// Absolute error against π, for π estimates.
    #[must_use]
    pub fn pi_error(&self) -> Option<f64> {
        (self.quantity == Quantity::Pi).then(|| (self.estimate - PI).abs())
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<18} N={:<8} K={:<8} {}",
            self.estimator, self.samples, self.hits, self.display
        )
    }
}
