//! Axis-aligned bounding boxes for the collision sweeps
//!
//! Every entity is a rectangle for collision purposes. Boxes are stored as
//! center + full extents because that is how entities track their positions.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box, center + full width/height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    pub fn new(center: Vec2, width: f32, height: f32) -> Self {
        Self {
            center,
            width,
            height,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.width / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.width / 2.0
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y - self.height / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y + self.height / 2.0
    }

    /// Strict overlap test: boxes that merely touch along an edge do not
    /// count as intersecting.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_boxes_intersect() {
        let a = Aabb::new(Vec2::new(100.0, 100.0), 50.0, 50.0);
        let b = Aabb::new(Vec2::new(120.0, 110.0), 50.0, 50.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_separated_boxes_miss() {
        let a = Aabb::new(Vec2::new(100.0, 100.0), 50.0, 50.0);
        let b = Aabb::new(Vec2::new(200.0, 100.0), 50.0, 50.0);
        assert!(!a.intersects(&b));

        let c = Aabb::new(Vec2::new(100.0, 300.0), 50.0, 50.0);
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Aabb::new(Vec2::new(100.0, 100.0), 50.0, 50.0);
        let b = Aabb::new(Vec2::new(150.0, 100.0), 50.0, 50.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_containment_intersects() {
        let big = Aabb::new(Vec2::new(100.0, 100.0), 200.0, 200.0);
        let small = Aabb::new(Vec2::new(110.0, 90.0), 10.0, 10.0);
        assert!(big.intersects(&small));
        assert!(small.intersects(&big));
    }

    #[test]
    fn test_edge_accessors() {
        let b = Aabb::new(Vec2::new(10.0, 20.0), 4.0, 8.0);
        assert!((b.left() - 8.0).abs() < f32::EPSILON);
        assert!((b.right() - 12.0).abs() < f32::EPSILON);
        assert!((b.top() - 16.0).abs() < f32::EPSILON);
        assert!((b.bottom() - 24.0).abs() < f32::EPSILON);
    }
}
