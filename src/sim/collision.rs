//! Collision detection kernel
//!
//! Pure overlap tests between points, circles and axis-aligned rectangles.
//! Every test is total: degenerate geometry (negative or NaN sizes) is a miss,
//! never a panic.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle, anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size centered on `center`
    pub fn centered(center: Vec2, w: f32, h: f32) -> Self {
        Self::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// True for zero, negative or NaN extents and NaN origins
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.w > 0.0 && self.h > 0.0) || self.x.is_nan() || self.y.is_nan()
    }
}

/// True iff `point` lies inside or on the circle
///
/// A zero radius is a valid circle containing only its center.
#[inline]
pub fn point_in_circle(point: Vec2, center: Vec2, radius: f32) -> bool {
    if !(radius >= 0.0) {
        return false;
    }
    point.distance_squared(center) <= radius * radius
}

/// True iff the circle touches or overlaps the rectangle
///
/// Clamps the circle center onto the rectangle and compares the distance to
/// the clamped point against the radius.
pub fn circle_intersects_rect(center: Vec2, radius: f32, rect: &Rect) -> bool {
    if !(radius > 0.0) || rect.is_degenerate() || center.is_nan() {
        return false;
    }
    let closest = Vec2::new(
        center.x.clamp(rect.x, rect.x + rect.w),
        center.y.clamp(rect.y, rect.y + rect.h),
    );
    center.distance_squared(closest) <= radius * radius
}

/// Standard AABB overlap test (touching edges do not overlap)
#[inline]
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    if a.is_degenerate() || b.is_degenerate() {
        return false;
    }
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}
