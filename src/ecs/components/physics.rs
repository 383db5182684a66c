//! Physics components for ECS entities.

use std::collections::HashSet;

use glam::Vec2;

/// Collision category used to look up the layer-compatibility matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionLayer {
    /// Walls, blocks and free-moving level props.
    Level,
    /// The player-controlled body.
    Player,
}

/// Circular rigid body component.
///
/// An entity carrying this component is a dynamic body. Entities without it
/// are immovable obstacles with an inverse mass of zero.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    /// Mass, strictly positive.
    pub mass: f32,
    /// Radius of the circular shape, strictly positive.
    pub radius: f32,
    pub velocity: Vec2,
}

impl RigidBody {
    /// Create a resting body with the given mass and radius.
    pub fn new(mass: f32, radius: f32) -> Self {
        Self {
            mass,
            radius,
            velocity: Vec2::ZERO,
        }
    }

    /// Builder-style initial velocity.
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    #[inline]
    pub fn inverse_mass(&self) -> f32 {
        if self.mass > 0.0 {
            1.0 / self.mass
        } else {
            0.0
        }
    }
}

/// Collision detection component.
///
/// The touching set is rebuilt by the broad phase on every tick; everything
/// else only gets a read-only view of it.
#[derive(Debug, Clone)]
pub struct Collider {
    pub layer: CollisionLayer,
    pub(crate) touching: HashSet<hecs::Entity>,
}

impl Collider {
    pub fn new(layer: CollisionLayer) -> Self {
        Self {
            layer,
            touching: HashSet::new(),
        }
    }

    /// Entities whose bounds overlapped this one during the last detection pass.
    ///
    /// Iteration order is unspecified.
    pub fn touching(&self) -> &HashSet<hecs::Entity> {
        &self.touching
    }

    pub fn is_touching(&self, other: hecs::Entity) -> bool {
        self.touching.contains(&other)
    }
}

impl Default for Collider {
    fn default() -> Self {
        Self::new(CollisionLayer::Level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverse_mass() {
        let rb = RigidBody::new(4.0, 1.0);
        assert!((rb.inverse_mass() - 0.25).abs() < 1e-6);

        let massless = RigidBody::new(0.0, 1.0);
        assert_eq!(massless.inverse_mass(), 0.0);
    }

    #[test]
    fn test_new_collider_touches_nothing() {
        let collider = Collider::new(CollisionLayer::Player);
        assert_eq!(collider.layer, CollisionLayer::Player);
        assert!(collider.touching().is_empty());
    }
}
