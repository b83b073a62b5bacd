//! Experiment configuration with YAML schema and validation.
//!
//! Implements Poka-Yoke (mistake-proofing) through:
//! - Type-safe configuration structs
//! - Structural validation via `validator`
//! - Semantic validation of cross-field constraints
//!
//! # Example
//!
//! ```yaml
//! schema_version: "1.0"
//! reproducibility:
//!   seed: 42
//! quadrant:
//!   samples: 10000
//! needle:
//!   samples: 5000
//!   line_spacing: 50
//!   needle_length: 40
//! ```

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::path::Path;
use validator::Validate;

use crate::error::{EstimateError, EstimateResult};
use crate::estimators::{
    needle, quadrant, region, FunctionIntegralEstimator, IntegrandKind, NeedleEstimator,
    QuadrantEstimator, RegionAreaEstimator, RegionShape,
};
use crate::render::Surface;

/// Top-level experiment configuration.
///
/// Each estimator section is optional; a missing section is disabled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ExperimentConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Free-form experiment name.
    #[serde(default)]
    pub name: String,

    /// Reproducibility settings.
    #[serde(default)]
    pub reproducibility: ReproducibilityConfig,

    /// Circular-quadrant estimator.
    #[validate(nested)]
    #[serde(default)]
    pub quadrant: Option<QuadrantSection>,

    /// Needle-crossing estimator.
    #[validate(nested)]
    #[serde(default)]
    pub needle: Option<NeedleSection>,

    /// Region-area estimator.
    #[validate(nested)]
    #[serde(default)]
    pub region: Option<RegionSection>,

    /// Function-integral estimator.
    #[validate(nested)]
    #[serde(default)]
    pub integral: Option<IntegralSection>,

    /// Scene output settings.
    #[validate(nested)]
    #[serde(default)]
    pub render: RenderConfig,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

const fn default_true() -> bool {
    true
}

const fn default_samples() -> i64 {
    1000
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            name: String::new(),
            reproducibility: ReproducibilityConfig::default(),
            quadrant: Some(QuadrantSection::default()),
            needle: Some(NeedleSection::default()),
            region: Some(RegionSection::default()),
            integral: Some(IntegralSection::default()),
            render: RenderConfig::default(),
        }
    }
}

impl ExperimentConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> EstimateResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> EstimateResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;

        // Poka-Yoke: validate all constraints
        config.validate()?;

        // Additional semantic validation
        config.validate_semantic()?;

        Ok(config)
    }

    /// Serialize configuration back to YAML.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_yaml(&self) -> EstimateResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> ExperimentConfigBuilder {
        ExperimentConfigBuilder::default()
    }

    /// Master seed for every estimator in the experiment.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.reproducibility.seed
    }

    /// Enabled quadrant section, if any.
    #[must_use]
    pub fn quadrant(&self) -> Option<&QuadrantSection> {
        self.quadrant.as_ref().filter(|s| s.enabled)
    }

    /// Enabled needle section, if any.
    #[must_use]
    pub fn needle(&self) -> Option<&NeedleSection> {
        self.needle.as_ref().filter(|s| s.enabled)
    }

    /// Enabled region section, if any.
    #[must_use]
    pub fn region(&self) -> Option<&RegionSection> {
        self.region.as_ref().filter(|s| s.enabled)
    }

    /// Enabled integral section, if any.
    #[must_use]
    pub fn integral(&self) -> Option<&IntegralSection> {
        self.integral.as_ref().filter(|s| s.enabled)
    }

    /// Number of enabled estimator sections.
    #[must_use]
    pub fn enabled_count(&self) -> usize {
        usize::from(self.quadrant().is_some())
            + usize::from(self.needle().is_some())
            + usize::from(self.region().is_some())
            + usize::from(self.integral().is_some())
    }

    /// Validate semantic constraints beyond schema.
    fn validate_semantic(&self) -> EstimateResult<()> {
        if self.enabled_count() == 0 {
            return Err(EstimateError::config("no estimator section is enabled"));
        }

        if let Some(needle) = self.needle() {
            if needle.needle_length > needle.line_spacing {
                return Err(EstimateError::config(format!(
                    "needle_length {} must not exceed line_spacing {}",
                    needle.needle_length, needle.line_spacing
                )));
            }
        }

        if let Some(region) = self.region() {
            if region.logical_min >= region.logical_max {
                return Err(EstimateError::config(format!(
                    "region logical_min {} must be below logical_max {}",
                    region.logical_min, region.logical_max
                )));
            }
        }

        if let Some(integral) = self.integral() {
            if integral.lower >= integral.upper {
                return Err(EstimateError::config(format!(
                    "integral lower bound {} must be below upper bound {}",
                    integral.lower, integral.upper
                )));
            }
        }

        Ok(())
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct ExperimentConfigBuilder {
    seed: Option<u64>,
    samples: Option<i64>,
    name: Option<String>,
}

impl ExperimentConfigBuilder {
    /// Set the master seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the sample count for every estimator.
    #[must_use]
    pub const fn samples(mut self, samples: i64) -> Self {
        self.samples = Some(samples);
        self
    }

    /// Set the experiment name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Build the configuration with all four estimators enabled.
    #[must_use]
    pub fn build(self) -> ExperimentConfig {
        let mut config = ExperimentConfig::default();

        if let Some(seed) = self.seed {
            config.reproducibility.seed = seed;
        }

        if let Some(name) = self.name {
            config.name = name;
        }

        if let Some(samples) = self.samples {
            if let Some(s) = config.quadrant.as_mut() {
                s.samples = samples;
            }
            if let Some(s) = config.needle.as_mut() {
                s.samples = samples;
            }
            if let Some(s) = config.region.as_mut() {
                s.samples = samples;
            }
            if let Some(s) = config.integral.as_mut() {
                s.samples = samples;
            }
        }

        config
    }
}

/// Reproducibility settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReproducibilityConfig {
    /// Master seed for all generators.
    pub seed: u64,
}

impl Default for ReproducibilityConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// Circular-quadrant section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct QuadrantSection {
    /// Whether the estimator runs.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Sample count.
    #[validate(range(min = 1))]
    #[serde(default = "default_samples")]
    pub samples: i64,
    /// Square side and quarter-circle radius.
    #[validate(range(exclusive_min = 0.0))]
    #[serde(default = "default_quadrant_side")]
    pub side: f64,
}

const fn default_quadrant_side() -> f64 {
    quadrant::DEFAULT_SIDE
}

impl Default for QuadrantSection {
    fn default() -> Self {
        Self {
            enabled: true,
            samples: default_samples(),
            side: default_quadrant_side(),
        }
    }
}

impl QuadrantSection {
    /// Construct the estimator.
    #[must_use]
    pub const fn estimator(&self) -> QuadrantEstimator {
        QuadrantEstimator::new(self.side)
    }
}

/// Needle-crossing section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct NeedleSection {
    /// Whether the estimator runs.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Sample count.
    #[validate(range(min = 1))]
    #[serde(default = "default_samples")]
    pub samples: i64,
    /// Distance between guide lines.
    #[validate(range(exclusive_min = 0.0))]
    #[serde(default = "default_line_spacing")]
    pub line_spacing: f64,
    /// Needle length.
    #[validate(range(exclusive_min = 0.0))]
    #[serde(default = "default_needle_length")]
    pub needle_length: f64,
    /// Field width.
    #[validate(range(exclusive_min = 0.0))]
    #[serde(default = "default_field_size")]
    pub field_width: f64,
    /// Field height.
    #[validate(range(exclusive_min = 0.0))]
    #[serde(default = "default_field_size")]
    pub field_height: f64,
}

const fn default_line_spacing() -> f64 {
    needle::DEFAULT_LINE_SPACING
}

const fn default_needle_length() -> f64 {
    needle::DEFAULT_NEEDLE_LENGTH
}

const fn default_field_size() -> f64 {
    needle::DEFAULT_FIELD_SIZE
}

impl Default for NeedleSection {
    fn default() -> Self {
        Self {
            enabled: true,
            samples: default_samples(),
            line_spacing: default_line_spacing(),
            needle_length: default_needle_length(),
            field_width: default_field_size(),
            field_height: default_field_size(),
        }
    }
}

impl NeedleSection {
    /// Construct the estimator.
    #[must_use]
    pub fn estimator(&self) -> NeedleEstimator {
        NeedleEstimator::new(self.line_spacing, self.needle_length)
            .with_field(self.field_width, self.field_height)
    }
}

/// Region-area section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct RegionSection {
    /// Whether the estimator runs.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Sample count.
    #[validate(range(min = 1))]
    #[serde(default = "default_samples")]
    pub samples: i64,
    /// Bounding-square side.
    #[validate(range(exclusive_min = 0.0))]
    #[serde(default = "default_region_side")]
    pub side: f64,
    /// Logical coordinate at domain position 0.
    #[serde(default = "default_logical_min")]
    pub logical_min: f64,
    /// Logical coordinate at domain position `side`.
    #[serde(default = "default_logical_max")]
    pub logical_max: f64,
    /// Region preset.
    #[serde(default)]
    pub shape: RegionShape,
}

const fn default_region_side() -> f64 {
    region::DEFAULT_SIDE
}

const fn default_logical_min() -> f64 {
    region::DEFAULT_LOGICAL_RANGE.0
}

const fn default_logical_max() -> f64 {
    region::DEFAULT_LOGICAL_RANGE.1
}

impl Default for RegionSection {
    fn default() -> Self {
        Self {
            enabled: true,
            samples: default_samples(),
            side: default_region_side(),
            logical_min: default_logical_min(),
            logical_max: default_logical_max(),
            shape: RegionShape::default(),
        }
    }
}

impl RegionSection {
    /// Construct the estimator.
    #[must_use]
    pub const fn estimator(&self) -> RegionAreaEstimator<RegionShape> {
        RegionAreaEstimator::new(self.side, self.shape)
            .with_logical_range(self.logical_min, self.logical_max)
    }
}

/// Function-integral section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct IntegralSection {
    /// Whether the estimator runs.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Sample count.
    #[validate(range(min = 1))]
    #[serde(default = "default_samples")]
    pub samples: i64,
    /// Integrand preset.
    #[serde(default)]
    pub integrand: IntegrandKind,
    /// Lower integration bound.
    #[serde(default)]
    pub lower: f64,
    /// Upper integration bound.
    #[serde(default = "default_upper")]
    pub upper: f64,
    /// Vertical bound dominating the integrand.
    #[validate(range(exclusive_min = 0.0))]
    #[serde(default = "default_ceiling")]
    pub ceiling: f64,
}

const fn default_upper() -> f64 {
    PI
}

const fn default_ceiling() -> f64 {
    2.0
}

impl Default for IntegralSection {
    fn default() -> Self {
        Self {
            enabled: true,
            samples: default_samples(),
            integrand: IntegrandKind::default(),
            lower: 0.0,
            upper: default_upper(),
            ceiling: default_ceiling(),
        }
    }
}

impl IntegralSection {
    /// Construct the estimator.
    #[must_use]
    pub const fn estimator(&self) -> FunctionIntegralEstimator<IntegrandKind> {
        FunctionIntegralEstimator::new(self.integrand, self.lower, self.upper, self.ceiling)
    }
}

/// Scene output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    /// Surface width in pixels.
    #[validate(range(min = 1, max = 8192))]
    #[serde(default = "default_surface_size")]
    pub width: u32,
    /// Surface height in pixels.
    #[validate(range(min = 1, max = 8192))]
    #[serde(default = "default_surface_size")]
    pub height: u32,
}

const fn default_surface_size() -> u32 {
    400
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_surface_size(),
            height: default_surface_size(),
        }
    }
}

impl RenderConfig {
    /// Surface described by this section.
    #[must_use]
    pub const fn surface(&self) -> Surface {
        Surface::new(self.width, self.height)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::estimators::{Estimator, RunConfig};

    #[test]
    fn test_default_config() {
        let config = ExperimentConfig::default();
        assert_eq!(config.schema_version, "1.0");
        assert_eq!(config.seed(), 42);
        assert_eq!(config.enabled_count(), 4);
    }

    #[test]
    fn test_builder() {
        let config = ExperimentConfig::builder()
            .seed(7)
            .samples(250)
            .name("smoke")
            .build();
        assert_eq!(config.seed(), 7);
        assert_eq!(config.name, "smoke");
        assert_eq!(config.quadrant().unwrap().samples, 250);
        assert_eq!(config.integral().unwrap().samples, 250);
    }

    #[test]
    fn test_minimal_yaml() {
        let yaml = r"
quadrant:
  samples: 500
";
        let config = ExperimentConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.enabled_count(), 1);
        let section = config.quadrant().unwrap();
        assert_eq!(section.samples, 500);
        assert!((section.side - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_full_yaml() {
        let yaml = r#"
schema_version: "1.0"
name: "full"
reproducibility:
  seed: 1234
quadrant:
  samples: 100
  side: 1.0
needle:
  samples: 200
  line_spacing: 2.0
  needle_length: 1.0
  field_width: 10.0
  field_height: 10.0
region:
  samples: 300
  side: 20.0
  shape:
    kind: disk
    radius: 4.0
integral:
  enabled: false
render:
  width: 200
  height: 100
"#;
        let config = ExperimentConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.seed(), 1234);
        assert_eq!(config.enabled_count(), 3);
        assert!(config.integral().is_none());
        assert_eq!(
            config.region().unwrap().shape,
            RegionShape::Disk { radius: 4.0 }
        );
        assert_eq!(config.render.surface(), Surface::new(200, 100));

        let needle = config.needle().unwrap().estimator();
        assert!((needle.line_spacing - 2.0).abs() < f64::EPSILON);
        assert!((needle.field_height - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "quadrant:\n  samples: 10\n  radius: 3\n";
        assert!(matches!(
            ExperimentConfig::from_yaml(yaml),
            Err(EstimateError::YamlParse(_))
        ));
    }

    #[test]
    fn test_zero_samples_rejected() {
        let yaml = "quadrant:\n  samples: 0\n";
        assert!(matches!(
            ExperimentConfig::from_yaml(yaml),
            Err(EstimateError::Validation(_))
        ));
    }

    #[test]
    fn test_negative_side_rejected() {
        let yaml = "quadrant:\n  side: -1.0\n";
        assert!(ExperimentConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_long_needle_rejected() {
        let yaml = "needle:\n  line_spacing: 10\n  needle_length: 20\n";
        let err = ExperimentConfig::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("needle_length"));
    }

    #[test]
    fn test_nothing_enabled_rejected() {
        let yaml = "quadrant:\n  enabled: false\n";
        let err = ExperimentConfig::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, EstimateError::Config { .. }));
    }

    #[test]
    fn test_bad_integral_interval_rejected() {
        let yaml = "integral:\n  lower: 2.0\n  upper: 1.0\n";
        assert!(ExperimentConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = ExperimentConfig::builder().seed(99).build();
        let yaml = config.to_yaml().unwrap();
        let back = ExperimentConfig::from_yaml(&yaml).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("experiment.yaml");
        std::fs::write(&path, "integral:\n  samples: 50\n").unwrap();

        let config = ExperimentConfig::load(&path).unwrap();
        assert_eq!(config.integral().unwrap().samples, 50);
    }

    #[test]
    fn test_load_missing_file() {
        let err = ExperimentConfig::load("/nonexistent/experiment.yaml").unwrap_err();
        assert!(matches!(err, EstimateError::Io(_)));
    }

    #[test]
    fn test_sections_build_working_estimators() {
        let config = ExperimentConfig::default();
        let run = RunConfig::new(100, 1);
        assert!(config.quadrant().unwrap().estimator().run(&run).is_ok());
        assert!(config.needle().unwrap().estimator().run(&run).is_ok());
        assert!(config.region().unwrap().estimator().run(&run).is_ok());
        assert!(config.integral().unwrap().estimator().run(&run).is_ok());
    }
}
