//! Pixel-space geometry primitives shared by all pipeline stages.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in video-pixel coordinates.
///
/// Invariant: `x1 <= x2`, `y1 <= y2`. Detection collaborators are expected to
/// emit well-ordered corners; [`Bbox::new`] normalizes swapped ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bbox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Bbox {
    /// Construct from two corners, normalizing the coordinate order.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x1: x1.min(x2),
            y1: y1.min(y2),
            x2: x1.max(x2),
            y2: y1.max(y2),
        }
    }

    /// Geometric center of the box.
    pub fn center(&self) -> [f64; 2] {
        [(self.x1 + self.x2) * 0.5, (self.y1 + self.y2) * 0.5]
    }

    /// Vertical coordinate of the box center.
    pub fn center_y(&self) -> f64 {
        (self.y1 + self.y2) * 0.5
    }

    /// Bottom-center of the box. For a standing player this approximates the
    /// ground-contact point, which is what court-plane projection needs.
    pub fn foot_point(&self) -> [f64; 2] {
        [(self.x1 + self.x2) * 0.5, self.y2]
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }
}

/// Euclidean distance between two points.
pub fn point_distance(a: [f64; 2], b: [f64; 2]) -> f64 {
    let pa = Point2::new(a[0], a[1]);
    let pb = Point2::new(b[0], b[1]);
    (pa - pb).norm()
}

/// Linear interpolation between two boxes: `t = 0` gives `a`, `t = 1` gives `b`.
pub fn lerp_bbox(a: &Bbox, b: &Bbox, t: f64) -> Bbox {
    let lerp = |u: f64, v: f64| u + (v - u) * t;
    Bbox {
        x1: lerp(a.x1, b.x1),
        y1: lerp(a.y1, b.y1),
        x2: lerp(a.x2, b.x2),
        y2: lerp(a.y2, b.y2),
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
