//! Error types for estimar.
//!
//! Every estimator returns `Result<T, EstimateError>`; nothing in the
//! library panics or leaks a `NaN`/`Infinity` estimate to the caller.

use thiserror::Error;

/// Result type alias for estimar operations.
pub type EstimateResult<T> = Result<T, EstimateError>;

/// Unified error type for all estimar operations.
///
/// # Design
///
/// Errors fall into two groups:
/// 1. Caller errors, detected before any sample is drawn
///    (sample count, domain parameters, configuration files)
/// 2. Run outcomes, detected after sampling when the aggregation
///    formula is undefined for the observed counts
#[derive(Debug, Error)]
pub enum EstimateError {
    // ===== Input Errors =====
    /// Sample count is zero, negative, or not an integer.
    #[error("Invalid sample count '{value}': expected a positive integer")]
    InvalidSampleCount {
        /// The rejected value as supplied by the caller.
        value: String,
    },

    /// Domain-specific misconfiguration.
    #[error("Invalid domain parameter '{parameter}': {reason}")]
    DomainParameterInvalid {
        /// Name of the offending parameter.
        parameter: String,
        /// Why the value was rejected.
        reason: String,
    },

    // ===== Run Outcomes =====
    /// The aggregation formula divides by a classification count of zero.
    #[error("{estimator}: no crossings observed in {samples} trials; increase sample count")]
    DegenerateEstimate {
        /// Estimator that produced the degenerate run.
        estimator: String,
        /// Number of trials performed.
        samples: u64,
    },

    // ===== Configuration Errors =====
    /// Invalid experiment configuration.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== I/O Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl EstimateError {
    /// Create an invalid sample count error from any displayable value.
    #[must_use]
    pub fn invalid_sample_count(value: impl ToString) -> Self {
        Self::InvalidSampleCount {
            value: value.to_string(),
        }
    }

    /// Create a domain parameter error.
    #[must_use]
    pub fn domain(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DomainParameterInvalid {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Check if this error stems from caller input rather than the run itself.
    #[must_use]
    pub const fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidSampleCount { .. }
                | Self::DomainParameterInvalid { .. }
                | Self::Config { .. }
                | Self::YamlParse(_)
                | Self::Validation(_)
        )
    }

    /// Check if this error reports an undefined estimate.
    #[must_use]
    pub const fn is_degenerate(&self) -> bool {
        matches!(self, Self::DegenerateEstimate { .. })
    }
}

impl From<serde_json::Error> for EstimateError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
