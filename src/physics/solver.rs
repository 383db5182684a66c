//! Single-pass impulse solver with immediate positional correction.
//!
//! Each contact gets one restitution impulse along its normal and one direct
//! push out of penetration. There is no iteration, no friction and no contact
//! persistence between ticks.

use glam::Vec2;

use crate::ecs::components::physics::RigidBody;
use crate::ecs::components::transform::Pose;

use super::contact::ContactInfo;
use super::error::{PhysicsError, PhysicsResult};

/// Coefficient of restitution used by a default `PhysicsWorld`.
pub const DEFAULT_RESTITUTION: f32 = 0.9;

/// Scalar impulse for a contact, or `None` when A is not closing in on B.
///
/// The closing speed is A's velocity projected on the normal. An inverse mass
/// of zero marks an immovable body.
#[inline]
pub fn normal_impulse(
    velocity_a: Vec2,
    normal: Vec2,
    inv_mass_a: f32,
    inv_mass_b: f32,
    restitution: f32,
) -> Option<f32> {
    let closing_speed = velocity_a.dot(normal);
    if closing_speed <= 0.0 {
        return None;
    }
    let inv_mass_sum = inv_mass_a + inv_mass_b;
    if inv_mass_sum <= 0.0 {
        return None;
    }
    Some((1.0 + restitution) * closing_speed / inv_mass_sum)
}

/// Resolve a contact between two dynamic circles.
///
/// Both velocities receive the impulse; only A is moved out of penetration.
pub fn resolve_circle_circle(
    world: &mut hecs::World,
    entity_a: hecs::Entity,
    entity_b: hecs::Entity,
    contact: &ContactInfo,
    restitution: f32,
) -> PhysicsResult<()> {
    let normal = contact.normal;
    let (velocity_a, inv_mass_a) = body_state(world, entity_a)?;
    let (_, inv_mass_b) = body_state(world, entity_b)?;

    if let Some(impulse) = normal_impulse(velocity_a, normal, inv_mass_a, inv_mass_b, restitution)
    {
        apply_impulse(world, entity_a, -normal * impulse * inv_mass_a)?;
        apply_impulse(world, entity_b, normal * impulse * inv_mass_b)?;
        tracing::trace!(?entity_a, ?entity_b, impulse, "circle-circle impulse");
    }

    push_out(world, entity_a, normal * -contact.signed_distance.abs())
}

/// Resolve a contact between a dynamic circle and a static rectangle.
///
/// The rectangle has infinite mass, so only A changes.
pub fn resolve_circle_rectangle(
    world: &mut hecs::World,
    entity_a: hecs::Entity,
    contact: &ContactInfo,
    radius: f32,
    restitution: f32,
) -> PhysicsResult<()> {
    let normal = contact.normal;
    let (velocity_a, inv_mass_a) = body_state(world, entity_a)?;

    if let Some(impulse) = normal_impulse(velocity_a, normal, inv_mass_a, 0.0, restitution) {
        apply_impulse(world, entity_a, -normal * impulse * inv_mass_a)?;
        tracing::trace!(?entity_a, impulse, "circle-rectangle impulse");
    }

    push_out(
        world,
        entity_a,
        normal * (contact.signed_distance.abs() - radius),
    )
}

fn body_state(world: &hecs::World, entity: hecs::Entity) -> PhysicsResult<(Vec2, f32)> {
    let rb = world
        .get::<&RigidBody>(entity)
        .map_err(|_| PhysicsError::missing::<RigidBody>(entity))?;
    Ok((rb.velocity, rb.inverse_mass()))
}

fn apply_impulse(
    world: &mut hecs::World,
    entity: hecs::Entity,
    delta_velocity: Vec2,
) -> PhysicsResult<()> {
    let mut rb = world
        .get::<&mut RigidBody>(entity)
        .map_err(|_| PhysicsError::missing::<RigidBody>(entity))?;
    rb.velocity += delta_velocity;
    Ok(())
}

fn push_out(world: &mut hecs::World, entity: hecs::Entity, offset: Vec2) -> PhysicsResult<()> {
    let mut pose = world
        .get::<&mut Pose>(entity)
        .map_err(|_| PhysicsError::missing::<Pose>(entity))?;
    pose.position += offset;
    Ok(())
}
