//! Axis-aligned geometry helpers

use glam::Vec2;
use serde::Serialize;

/// Restrict `v` to `[lo, hi]`. Callers guarantee `lo <= hi`.
#[inline]
pub fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    v.max(lo).min(hi)
}

/// Axis-aligned rectangle, top-left anchored (screen coordinates, y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Build a rect of the given size centered on `center`
    pub fn centered_at(center: Vec2, w: f32, h: f32) -> Self {
        Self::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// Rect-vs-circle overlap test
///
/// Clamps the circle center onto the rect to find the closest point, then
/// compares squared distance against the radius. Touching counts as overlap.
pub fn rect_circle_overlap(rect: &Rect, center: Vec2, radius: f32) -> bool {
    let closest = Vec2::new(
        clamp(center.x, rect.x, rect.right()),
        clamp(center.y, rect.y, rect.bottom()),
    );
    center.distance_squared(closest) <= radius * radius
}
