//! Axis-aligned bounding-box collision
//!
//! Balls, pegs and slots are all tested through their bounding boxes. A peg's
//! box is the square circumscribing its circle.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned box anchored at its top-left corner (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square of side `2 * radius` centered on `center`
    #[inline]
    pub fn around(center: Vec2, radius: f32) -> Self {
        Self::new(center.x - radius, center.y - radius, 2.0 * radius, 2.0 * radius)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Strict overlap test; boxes that only share an edge do not collide
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// Free-function form of [`Aabb::overlaps`]
#[inline]
pub fn boxes_overlap(a: &Aabb, b: &Aabb) -> bool {
    a.overlaps(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlapping_unit_boxes() {
        let a = Aabb::new(0.0, 0.0, 1.0, 1.0);
        let b = Aabb::new(0.5, 0.5, 1.0, 1.0);
        assert!(boxes_overlap(&a, &b));
    }

    #[test]
    fn test_edge_touching_is_not_collision() {
        let a = Aabb::new(0.0, 0.0, 1.0, 1.0);
        let b = Aabb::new(1.0, 0.0, 1.0, 1.0);
        assert!(!boxes_overlap(&a, &b));

        let below = Aabb::new(0.0, 1.0, 1.0, 1.0);
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn test_around_circumscribes_circle() {
        let b = Aabb::around(Vec2::new(10.0, 20.0), 5.0);
        assert_eq!(b, Aabb::new(5.0, 15.0, 10.0, 10.0));
        assert_eq!(b.bottom(), 25.0);
    }

    #[test]
    fn test_contained_box_overlaps() {
        let outer = Aabb::new(0.0, 0.0, 100.0, 40.0);
        let inner = Aabb::new(10.0, 10.0, 5.0, 5.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(
            ax in -100.0f32..100.0, ay in -100.0f32..100.0,
            bx in -100.0f32..100.0, by in -100.0f32..100.0,
            aw in 0.1f32..50.0, ah in 0.1f32..50.0,
            bw in 0.1f32..50.0, bh in 0.1f32..50.0,
        ) {
            let a = Aabb::new(ax, ay, aw, ah);
            let b = Aabb::new(bx, by, bw, bh);
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn prop_box_overlaps_itself(
            x in -100.0f32..100.0,
            y in -100.0f32..100.0,
            r in 0.1f32..20.0,
        ) {
            let b = Aabb::around(Vec2::new(x, y), r);
            prop_assert!(b.overlaps(&b));
        }
    }
}
