//! Small shared geometry types.

use glam::{DVec2, DVec3};

/// An ordered pair of 3D points. Owned transiently by whichever component
/// produced it; consumed by projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment3 {
    pub a: DVec3,
    pub b: DVec3,
}

impl Segment3 {
    pub fn new(a: DVec3, b: DVec3) -> Self {
        Self { a, b }
    }
}

/// An axis-aligned rectangle, used for canvas bounds and clip regions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The full canvas rectangle for the given dimensions.
    pub fn canvas(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// This rectangle shrunk by `margin` on every side. A margin larger
    /// than half a dimension collapses that dimension to zero.
    pub fn inset(&self, margin: f64) -> Self {
        let w = (self.width - 2.0 * margin).max(0.0);
        let h = (self.height - 2.0 * margin).max(0.0);
        Self::new(self.x + margin, self.y + margin, w, h)
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    /// Clamps a point into the rectangle.
    pub fn clamp_point(&self, p: DVec2) -> DVec2 {
        DVec2::new(
            p.x.clamp(self.x, self.x + self.width),
            p.y.clamp(self.y, self.y + self.height),
        )
    }

    /// `contains` with a slack band of `margin` around the rectangle.
    pub fn contains_with_margin(&self, p: DVec2, margin: f64) -> bool {
        p.x >= self.x - margin
            && p.x <= self.x + self.width + margin
            && p.y >= self.y - margin
            && p.y <= self.y + self.height + margin
    }
}
