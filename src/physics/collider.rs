//! Axis-aligned bounds used by the broad phase and the rectangle tests.

use glam::Vec2;

use crate::ecs::components::transform::Pose;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Test whether two boxes overlap.
    ///
    /// Intervals are half-open: boxes that only share an edge do not overlap,
    /// and a zero-area box never overlaps anything.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        if self.is_degenerate() || other.is_degenerate() {
            return false;
        }
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Zero (or negative) width or height.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.max.x <= self.min.x || self.max.y <= self.min.y
    }

    /// Closed containment test (points on the boundary are inside).
    #[inline]
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Closest point of the box to `point`.
    #[inline]
    pub fn clamp_point(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min, self.max)
    }

    #[inline]
    pub fn area(&self) -> f32 {
        let extent = (self.max - self.min).max(Vec2::ZERO);
        extent.x * extent.y
    }
}

impl Pose {
    /// World-space bounding box of this pose.
    #[inline]
    pub fn aabb(&self) -> Aabb {
        let half = self.size * 0.5;
        Aabb {
            min: self.position - half,
            max: self.position + half,
        }
    }
}
