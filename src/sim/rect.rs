//! Axis-aligned rectangle geometry for obstacles and safe zones
//!
//! Screen-style coordinates: `x`/`y` is the top-left corner, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
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

    /// Square enclosing a circle
    pub fn around_circle(center: Vec2, radius: f32) -> Self {
        Self::new(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Corners in winding order: top-left, top-right, bottom-right, bottom-left
    pub fn corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.left(), self.top()),
            Vec2::new(self.right(), self.top()),
            Vec2::new(self.right(), self.bottom()),
            Vec2::new(self.left(), self.bottom()),
        ]
    }

    /// Strict overlap test (shared edges do not count)
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Point containment, inclusive of the top-left edges only
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x < self.right() && p.y >= self.top() && p.y < self.bottom()
    }

    /// Grow the rectangle by `margin` on every side
    pub fn inflate(&self, margin: f32) -> Rect {
        Rect::new(
            self.x - margin,
            self.y - margin,
            self.w + margin * 2.0,
            self.h + margin * 2.0,
        )
    }

    /// Euclidean distance from a point to the rectangle (0 when inside)
    pub fn distance_to_point(&self, p: Vec2) -> f32 {
        let dx = (self.left() - p.x).max(0.0).max(p.x - self.right());
        let dy = (self.top() - p.y).max(0.0).max(p.y - self.bottom());
        Vec2::new(dx, dy).length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlaps_is_strict() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        // Touching edge only
        assert!(!a.overlaps(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(20.0, 20.0, 5.0, 5.0)));
    }

    #[test]
    fn test_contains_point() {
        let r = Rect::new(40.0, 40.0, 20.0, 20.0);
        assert!(r.contains_point(Vec2::new(40.0, 40.0)));
        assert!(r.contains_point(Vec2::new(50.0, 59.9)));
        assert!(!r.contains_point(Vec2::new(60.0, 50.0)));
        assert!(!r.contains_point(Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn test_distance_to_point() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(r.distance_to_point(Vec2::new(5.0, 5.0)), 0.0);
        assert!((r.distance_to_point(Vec2::new(13.0, 14.0)) - 5.0).abs() < 1e-5);
        assert!((r.distance_to_point(Vec2::new(-2.0, 5.0)) - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_around_circle() {
        let r = Rect::around_circle(Vec2::new(100.0, 50.0), 25.0);
        assert_eq!(r, Rect::new(75.0, 25.0, 50.0, 50.0));
        assert_eq!(r.center(), Vec2::new(100.0, 50.0));
    }
}
