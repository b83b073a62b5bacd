//! Affine mapping from estimator domains to surface pixels.

use serde::{Deserialize, Serialize};

use crate::estimators::Point;

/// Pixel dimensions of a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Surface {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Surface {
    /// Create a surface.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new(400, 400)
    }
}

/// Axis-aligned affine transform from a domain rectangle to a surface.
///
/// With `flip_y` the domain's upward y axis maps to the surface's downward
/// one: `surface_y = height − (y − min_y)·sy`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Domain corner mapped to the surface origin (or bottom-left when flipped).
    pub min: Point,
    /// Opposite domain corner.
    pub max: Point,
    /// Target surface.
    pub surface: Surface,
    /// Whether the y axis is inverted.
    pub flip_y: bool,
}

impl Viewport {
    /// Create a viewport for the domain rectangle `[min, max]`.
    #[must_use]
    pub const fn new(min: Point, max: Point, surface: Surface, flip_y: bool) -> Self {
        Self {
            min,
            max,
            surface,
            flip_y,
        }
    }

    /// Horizontal pixels per domain unit.
    #[must_use]
    pub fn scale_x(&self) -> f64 {
        f64::from(self.surface.width) / (self.max.x - self.min.x)
    }

    /// Vertical pixels per domain unit.
    #[must_use]
    pub fn scale_y(&self) -> f64 {
        f64::from(self.surface.height) / (self.max.y - self.min.y)
    }

    /// Map a domain point to surface pixels.
    #[must_use]
    pub fn to_surface(&self, p: Point) -> Point {
        let x = (p.x - self.min.x) * self.scale_x();
        let y = (p.y - self.min.y) * self.scale_y();
        if self.flip_y {
            Point::new(x, f64::from(self.surface.height) - y)
        } else {
            Point::new(x, y)
        }
    }

    /// Map surface pixels back to the domain.
    #[must_use]
    pub fn to_domain(&self, p: Point) -> Point {
        let y = if self.flip_y {
            f64::from(self.surface.height) - p.y
        } else {
            p.y
        };
        Point::new(
            p.x / self.scale_x() + self.min.x,
            y / self.scale_y() + self.min.y,
        )
    }
}
