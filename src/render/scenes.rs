//! Scene builders for each estimator.

use std::f64::consts::FRAC_PI_2;

use super::{
    Palette, Scene, Shape, Surface, Viewport, GUIDE_WIDTH, MARKER_RADIUS, STROKE_WIDTH,
};
use crate::estimators::{
    Classified, Estimator, FunctionIntegralEstimator, ImplicitRegion, Integrand, Needle,
    NeedleEstimator, Point, QuadrantEstimator, RegionAreaEstimator, RunResult,
};

/// Builds a display list for a finished run.
pub trait SceneBuilder: Estimator {
    /// Transform from this estimator's domain to `surface`.
    fn viewport(&self, surface: Surface) -> Viewport;

    /// Reference geometry drawn beneath the samples.
    fn backdrop(&self, viewport: &Viewport, palette: &Palette) -> Vec<Shape>;

    /// Primitive for one classified sample.
    fn sample_shape(
        &self,
        sample: &Classified<Self::Sample>,
        viewport: &Viewport,
        palette: &Palette,
    ) -> Shape;

    /// Assemble the complete scene: backdrop first, then samples in draw order.
    fn scene(
        &self,
        result: &RunResult<Self::Sample>,
        surface: Surface,
        palette: &Palette,
    ) -> Scene {
        let viewport = self.viewport(surface);
        let mut scene = Scene::new(self.name(), surface, palette);
        scene.shapes = self.backdrop(&viewport, palette);
        scene.shapes.reserve(result.samples.len());
        scene.shapes.extend(
            result
                .samples
                .iter()
                .map(|s| self.sample_shape(s, &viewport, palette)),
        );
        scene
    }
}

fn marker(point: &Classified<Point>, viewport: &Viewport, palette: &Palette) -> Shape {
    let p = viewport.to_surface(point.sample);
    Shape::Marker {
        x: p.x,
        y: p.y,
        radius: MARKER_RADIUS,
        color: if point.hit {
            palette.hit.clone()
        } else {
            palette.miss.clone()
        },
    }
}

impl SceneBuilder for QuadrantEstimator {
    /// The sampling square fills the bottom-left quarter of the surface,
    /// with the quarter circle anchored at the bottom-left corner.
    fn viewport(&self, surface: Surface) -> Viewport {
        let extent = 2.0 * self.side;
        Viewport::new(
            Point::new(0.0, 0.0),
            Point::new(extent, extent),
            surface,
            true,
        )
    }

    fn backdrop(&self, viewport: &Viewport, palette: &Palette) -> Vec<Shape> {
        let centre = viewport.to_surface(Point::new(0.0, 0.0));
        vec![Shape::Arc {
            cx: centre.x,
            cy: centre.y,
            radius: self.side * viewport.scale_x(),
            start: -FRAC_PI_2,
            end: 0.0,
            color: palette.outline.clone(),
            width: STROKE_WIDTH,
        }]
    }

    fn sample_shape(
        &self,
        sample: &Classified<Point>,
        viewport: &Viewport,
        palette: &Palette,
    ) -> Shape {
        marker(sample, viewport, palette)
    }
}

impl SceneBuilder for NeedleEstimator {
    fn viewport(&self, surface: Surface) -> Viewport {
        Viewport::new(
            Point::new(0.0, 0.0),
            Point::new(self.field_width, self.field_height),
            surface,
            false,
        )
    }

    /// Band floors at `0, L, 2L, ...`, thinned to at most one line per
    /// surface pixel row.
    fn backdrop(&self, viewport: &Viewport, palette: &Palette) -> Vec<Shape> {
        let pixels_per_band = self.line_spacing * viewport.scale_y();
        if !pixels_per_band.is_finite() || pixels_per_band <= 0.0 {
            return Vec::new();
        }
        let stride = pixels_per_band.recip().ceil().max(1.0) as usize;
        let bands = (self.field_height / self.line_spacing).floor() as u64;
        (0..=bands)
            .step_by(stride)
            .map(|k| Shape::GuideLine {
                y: viewport
                    .to_surface(Point::new(0.0, k as f64 * self.line_spacing))
                    .y,
                color: palette.outline.clone(),
                width: GUIDE_WIDTH,
            })
            .collect()
    }

    fn sample_shape(
        &self,
        sample: &Classified<Needle>,
        viewport: &Viewport,
        palette: &Palette,
    ) -> Shape {
        let n = sample.sample;
        let a = viewport.to_surface(Point::new(n.x, n.y));
        let b = viewport.to_surface(Point::new(n.x2, n.y2));
        Shape::Segment {
            x1: a.x,
            y1: a.y,
            x2: b.x,
            y2: b.y,
            color: if sample.hit {
                palette.needle_crossing.clone()
            } else {
                palette.needle_clear.clone()
            },
            width: STROKE_WIDTH,
        }
    }
}

impl<R: ImplicitRegion> SceneBuilder for RegionAreaEstimator<R> {
    fn viewport(&self, surface: Surface) -> Viewport {
        Viewport::new(
            Point::new(0.0, 0.0),
            Point::new(self.side, self.side),
            surface,
            false,
        )
    }

    /// Every surface pixel whose corner lies inside the region.
    fn backdrop(&self, viewport: &Viewport, palette: &Palette) -> Vec<Shape> {
        let surface = viewport.surface;
        let cells: Vec<[u32; 2]> = (0..surface.width)
            .flat_map(|col| (0..surface.height).map(move |row| [col, row]))
            .filter(|&[col, row]| {
                let domain = viewport.to_domain(Point::new(f64::from(col), f64::from(row)));
                self.contains_domain_point(&domain)
            })
            .collect();
        vec![Shape::Mask {
            cells,
            color: palette.outline.clone(),
        }]
    }

    fn sample_shape(
        &self,
        sample: &Classified<Point>,
        viewport: &Viewport,
        palette: &Palette,
    ) -> Shape {
        marker(sample, viewport, palette)
    }
}

impl<G: Integrand> SceneBuilder for FunctionIntegralEstimator<G> {
    fn viewport(&self, surface: Surface) -> Viewport {
        Viewport::new(
            Point::new(self.lower, 0.0),
            Point::new(self.upper, self.ceiling),
            surface,
            true,
        )
    }

    /// The integrand sampled once per pixel column, starting from the
    /// bottom-left corner.
    fn backdrop(&self, viewport: &Viewport, palette: &Palette) -> Vec<Shape> {
        let width = viewport.surface.width;
        let mut points = Vec::with_capacity(width as usize + 2);
        points.push([0.0, f64::from(viewport.surface.height)]);
        for col in 0..=width {
            let x = (f64::from(col) / f64::from(width)).mul_add(self.upper - self.lower, self.lower);
            let p = viewport.to_surface(Point::new(x, self.integrand.eval(x)));
            points.push([p.x, p.y]);
        }
        vec![Shape::Polyline {
            points,
            color: palette.outline.clone(),
            width: STROKE_WIDTH,
        }]
    }

    fn sample_shape(
        &self,
        sample: &Classified<Point>,
        viewport: &Viewport,
        palette: &Palette,
    ) -> Shape {
        marker(sample, viewport, palette)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::estimators::{HeartCurve, RunConfig};

    #[test]
    fn test_quadrant_scene() {
        let est = QuadrantEstimator::default();
        let result = est.run(&RunConfig::new(300, 42)).unwrap();
        let scene = est.scene(&result, Surface::default(), &Palette::default());

        assert_eq!(scene.sample_shape_count(), 300);
        match &scene.shapes[0] {
            Shape::Arc { cx, cy, radius, .. } => {
                assert!(cx.abs() < 1e-12);
                assert!((cy - 400.0).abs() < 1e-12);
                assert!((radius - 200.0).abs() < 1e-12);
            }
            other => panic!("expected arc, got {other:?}"),
        }
    }

    #[test]
    fn test_quadrant_markers_flip_y() {
        let est = QuadrantEstimator::default();
        let result = est.run(&RunConfig::new(50, 1)).unwrap();
        let scene = est.scene(&result, Surface::default(), &Palette::default());

        for (shape, c) in scene.shapes[1..].iter().zip(&result.samples) {
            let Shape::Marker { x, y, .. } = shape else {
                panic!("expected marker");
            };
            assert!((x - c.sample.x).abs() < 1e-9);
            assert!((y - (400.0 - c.sample.y)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_needle_scene_guides_and_colours() {
        let est = NeedleEstimator::default();
        let result = est.run(&RunConfig::new(100, 42)).unwrap();
        let palette = Palette::default();
        let scene = est.scene(&result, Surface::default(), &palette);

        let guides = scene
            .shapes
            .iter()
            .filter(|s| matches!(s, Shape::GuideLine { .. }))
            .count();
        // Lines at 0, 50, ..., 400
        assert_eq!(guides, 9);

        let crossing_segments = scene
            .shapes
            .iter()
            .filter(|s| matches!(s, Shape::Segment { color, .. } if *color == palette.needle_crossing))
            .count() as u64;
        assert_eq!(crossing_segments, result.hits);
    }

    #[test]
    fn test_needle_guides_bounded_by_surface() {
        let est = NeedleEstimator::new(1e-6, 1e-6);
        let result = est.run(&RunConfig::new(200, 3)).unwrap();
        let surface = Surface::default();
        let scene = est.scene(&result, surface, &Palette::default());

        let ys: Vec<f64> = scene
            .shapes
            .iter()
            .filter_map(|s| match s {
                Shape::GuideLine { y, .. } => Some(*y),
                _ => None,
            })
            .collect();
        assert!(!ys.is_empty());
        assert!(ys.len() <= surface.height as usize + 1, "{} lines", ys.len());
        for pair in ys.windows(2) {
            assert!(pair[1] - pair[0] >= 1.0 - 1e-9);
        }
        assert_eq!(scene.sample_shape_count(), 200);
    }

    #[test]
    fn test_region_mask_matches_predicate() {
        let est = RegionAreaEstimator::new(40.0, HeartCurve);
        let result = est.run(&RunConfig::new(10, 1)).unwrap();
        let scene = est.scene(&result, Surface::new(40, 40), &Palette::default());

        let Shape::Mask { cells, .. } = &scene.shapes[0] else {
            panic!("expected mask");
        };
        assert!(!cells.is_empty());
        for [col, row] in cells {
            assert!(est.contains_domain_point(&Point::new(f64::from(*col), f64::from(*row))));
        }
    }

    #[test]
    fn test_integral_curve_endpoints() {
        let est = FunctionIntegralEstimator::default();
        let result = est.run(&RunConfig::new(10, 1)).unwrap();
        let scene = est.scene(&result, Surface::new(200, 100), &Palette::default());

        let Shape::Polyline { points, .. } = &scene.shapes[0] else {
            panic!("expected polyline");
        };
        assert_eq!(points.len(), 202);
        assert_eq!(points[0], [0.0, 100.0]);
        // g(0) = 1 → half height
        assert!((points[1][1] - 50.0).abs() < 1e-9);
        // g(π/2) = 2 → top edge
        assert!(points[101][1].abs() < 1e-9);
    }
}
