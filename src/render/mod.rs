//! Renderer-agnostic scene description.
//!
//! Estimators produce a [`RunResult`](crate::estimators::RunResult); this
//! module turns it into a [`Scene`], a serializable display list that any
//! drawing backend (canvas, terminal, SVG) can replay. No pixels are
//! rasterized here.
//!
//! # Architecture
//!
//! ```text
//! Estimator::run ──► RunResult ──► SceneBuilder::scene ──► Scene (JSON)
//!                                        │
//!                                    Viewport
//!                             (domain → surface pixels)
//! ```

mod scenes;
mod viewport;

pub use scenes::SceneBuilder;
pub use viewport::{Surface, Viewport};

use serde::{Deserialize, Serialize};

use crate::error::EstimateResult;

/// Colours used when building scenes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// Surface fill.
    pub background: String,
    /// Reference geometry: arcs, guide lines, curves, region masks.
    pub outline: String,
    /// Markers for samples that satisfied the predicate.
    pub hit: String,
    /// Markers for samples that failed the predicate.
    pub miss: String,
    /// Needles that cross a guide line.
    pub needle_crossing: String,
    /// Needles that stay within one band.
    pub needle_clear: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: "#1F2937".to_string(),
            outline: "#93C5FD".to_string(),
            hit: "rgba(96, 165, 250, 0.6)".to_string(),
            miss: "rgba(248, 113, 113, 0.6)".to_string(),
            needle_crossing: "rgba(248, 113, 113, 0.8)".to_string(),
            needle_clear: "rgba(96, 165, 250, 0.8)".to_string(),
        }
    }
}

/// Sample marker radius in surface pixels.
pub const MARKER_RADIUS: f64 = 2.0;
/// Stroke width for outlines and needles.
pub const STROKE_WIDTH: f64 = 2.0;
/// Stroke width for needle guide lines.
pub const GUIDE_WIDTH: f64 = 1.0;

/// One drawing primitive, in surface pixel coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    /// Full-width horizontal line.
    GuideLine {
        /// Vertical position.
        y: f64,
        /// Stroke colour.
        color: String,
        /// Stroke width.
        width: f64,
    },
    /// Circular arc stroke; angles in radians, surface orientation.
    Arc {
        /// Centre x.
        cx: f64,
        /// Centre y.
        cy: f64,
        /// Radius in pixels.
        radius: f64,
        /// Start angle.
        start: f64,
        /// End angle.
        end: f64,
        /// Stroke colour.
        color: String,
        /// Stroke width.
        width: f64,
    },
    /// Open polyline stroke.
    Polyline {
        /// Vertices in drawing order.
        points: Vec<[f64; 2]>,
        /// Stroke colour.
        color: String,
        /// Stroke width.
        width: f64,
    },
    /// Set of unit pixel cells, used to outline implicit regions.
    Mask {
        /// `[column, row]` of every cell inside the region.
        cells: Vec<[u32; 2]>,
        /// Stroke colour.
        color: String,
    },
    /// Filled dot for one point sample.
    Marker {
        /// Centre x.
        x: f64,
        /// Centre y.
        y: f64,
        /// Radius in pixels.
        radius: f64,
        /// Fill colour.
        color: String,
    },
    /// Line segment for one needle sample.
    Segment {
        /// Start x.
        x1: f64,
        /// Start y.
        y1: f64,
        /// End x.
        x2: f64,
        /// End y.
        y2: f64,
        /// Stroke colour.
        color: String,
        /// Stroke width.
        width: f64,
    },
}

/// Complete display list for one estimator run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Estimator that produced the run.
    pub title: String,
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// Background fill colour.
    pub background: String,
    /// Primitives in painting order: reference geometry first, samples after.
    pub shapes: Vec<Shape>,
}

impl Scene {
    /// Create an empty scene for a surface.
    #[must_use]
    pub fn new(title: impl Into<String>, surface: Surface, palette: &Palette) -> Self {
        Self {
            title: title.into(),
            width: surface.width,
            height: surface.height,
            background: palette.background.clone(),
            shapes: Vec::new(),
        }
    }

    /// Number of per-sample primitives (markers and segments).
    #[must_use]
    pub fn sample_shape_count(&self) -> usize {
        self.shapes
            .iter()
            .filter(|s| matches!(s, Shape::Marker { .. } | Shape::Segment { .. }))
            .count()
    }

    /// Serialize the scene as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if encoding fails.
    pub fn to_json(&self) -> EstimateResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the scene as JSON to a file.
    ///
    /// # Errors
    ///
    /// Returns an I/O or serialization error.
    pub fn write_json<P: AsRef<std::path::Path>>(&self, path: P) -> EstimateResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
