//! Rigid body classification and integration.

use glam::Vec2;

use crate::ecs::components::physics::{Collider, RigidBody};
use crate::ecs::components::transform::Pose;

use super::collider::Aabb;
use super::error::{PhysicsError, PhysicsResult};

/// How a touching entity takes part in contact resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyKind {
    /// Circular body with finite mass.
    Dynamic {
        position: Vec2,
        mass: f32,
        radius: f32,
        velocity: Vec2,
    },
    /// Immovable rectangle with infinite mass.
    Static { bounds: Aabb },
}

impl BodyKind {
    /// Classify `entity` through the store.
    ///
    /// `Pose` and `Collider` are required; a `RigidBody` makes the entity
    /// dynamic, its absence makes it static.
    pub fn resolve(world: &hecs::World, entity: hecs::Entity) -> PhysicsResult<Self> {
        if !world.satisfies::<&Collider>(entity).unwrap_or(false) {
            return Err(PhysicsError::missing::<Collider>(entity));
        }
        let pose = world
            .get::<&Pose>(entity)
            .map_err(|_| PhysicsError::missing::<Pose>(entity))?;

        Ok(match world.get::<&RigidBody>(entity) {
            Ok(rb) => BodyKind::Dynamic {
                position: pose.position,
                mass: rb.mass,
                radius: rb.radius,
                velocity: rb.velocity,
            },
            Err(_) => BodyKind::Static {
                bounds: pose.aabb(),
            },
        })
    }

    #[inline]
    pub fn inverse_mass(&self) -> f32 {
        match *self {
            BodyKind::Dynamic { mass, .. } if mass > 0.0 => 1.0 / mass,
            _ => 0.0,
        }
    }

    pub fn is_static(&self) -> bool {
        matches!(self, BodyKind::Static { .. })
    }
}

/// Apply gravity, then the per-tick drag decay.
///
/// Drag is a multiplicative factor applied once per call, independent of `dt`.
#[inline]
pub fn apply_base_forces(body: &mut RigidBody, gravity: Vec2, drag: f32, dt: f32) {
    body.velocity += gravity * dt;
    body.velocity *= 1.0 - drag;
}

/// Advance the pose by the body's velocity (explicit Euler step).
#[inline]
pub fn apply_movement(pose: &mut Pose, velocity: Vec2, dt: f32) {
    pose.position += velocity * dt;
}

/// Integrate one dynamic body in place.
pub fn integrate(
    world: &mut hecs::World,
    entity: hecs::Entity,
    gravity: Vec2,
    drag: f32,
    dt: f32,
) -> PhysicsResult<()> {
    if !world
        .satisfies::<(&Pose, &RigidBody)>(entity)
        .unwrap_or(false)
    {
        return Err(missing_body_part(world, entity));
    }
    let (pose, rb) = world
        .query_one_mut::<(&mut Pose, &mut RigidBody)>(entity)
        .map_err(|_| PhysicsError::missing::<RigidBody>(entity))?;

    apply_base_forces(rb, gravity, drag, dt);
    apply_movement(pose, rb.velocity, dt);
    Ok(())
}

fn missing_body_part(world: &hecs::World, entity: hecs::Entity) -> PhysicsError {
    if world.satisfies::<&Pose>(entity).unwrap_or(false) {
        PhysicsError::missing::<RigidBody>(entity)
    } else {
        PhysicsError::missing::<Pose>(entity)
    }
}
