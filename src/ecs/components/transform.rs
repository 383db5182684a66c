//! Pose component for ECS entities.

use glam::Vec2;

/// World-space placement of an entity: center position and full size.
///
/// The bounding box spans `position ± size * 0.5`. Written by the integrator
/// and the solver, read by the broad phase and the narrow phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec2,
    pub size: Vec2,
}

impl Pose {
    /// Create a pose centered at `position` with the given full size.
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }

    /// Create a square pose that tightly encloses a circle of `radius`.
    pub fn for_circle(position: Vec2, radius: f32) -> Self {
        Self {
            position,
            size: Vec2::splat(radius * 2.0),
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            size: Vec2::ONE,
        }
    }
}
