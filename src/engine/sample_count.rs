//! Validated sample counts.
//!
//! A [`SampleCount`] can only hold a strictly positive integer, so an
//! estimator that receives one can never divide by zero samples.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

use crate::error::{EstimateError, EstimateResult};

/// Number of samples `N` for one estimation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u64")]
pub struct SampleCount(NonZeroU64);

impl SampleCount {
    /// Validate a signed count.
    ///
    /// # Errors
    ///
    /// Returns [`EstimateError::InvalidSampleCount`] for zero or negative values.
    pub fn new(value: i64) -> EstimateResult<Self> {
        u64::try_from(value)
            .ok()
            .and_then(NonZeroU64::new)
            .map(Self)
            .ok_or_else(|| EstimateError::invalid_sample_count(value))
    }

    /// Parse a count from user-supplied text.
    ///
    /// Surrounding whitespace is ignored. Anything other than a positive
    /// base-10 integer (`"0"`, `"-5"`, `"1.5"`, `"abc"`, `""`) is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`EstimateError::InvalidSampleCount`] carrying the original text.
    pub fn parse(text: &str) -> EstimateResult<Self> {
        let trimmed = text.trim();
        trimmed
            .parse::<u64>()
            .ok()
            .and_then(NonZeroU64::new)
            .map(Self)
            .ok_or_else(|| EstimateError::invalid_sample_count(text))
    }

    /// The count as a `u64`.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }

    /// The count as an `f64` for ratio arithmetic.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(self) -> f64 {
        self.0.get() as f64
    }
}

impl TryFrom<i64> for SampleCount {
    type Error = EstimateError;

    fn try_from(value: i64) -> EstimateResult<Self> {
        Self::new(value)
    }
}

impl From<SampleCount> for u64 {
    fn from(count: SampleCount) -> Self {
        count.get()
    }
}

impl FromStr for SampleCount {
    type Err = EstimateError;

    fn from_str(s: &str) -> EstimateResult<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for SampleCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
