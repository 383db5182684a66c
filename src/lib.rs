//! Sandbox 2D Physics Core
//!
//! Per-tick collision and response for circular bodies and static rectangles,
//! running against a hecs ECS world.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! 1. **ecs** - Components stored on hecs entities: pose, rigid body, collider (feature = "ecs")
//! 2. **physics** - Broadphase, narrowphase, impulse solver, integrator, scratch arena (feature = "physics")

#[cfg(feature = "ecs")]
pub mod ecs;

#[cfg(feature = "physics")]
pub mod physics;

#[cfg(feature = "ecs")]
pub use ecs::prelude::*;

#[cfg(feature = "physics")]
pub use physics::{
    broadphase::CollisionMatrix, contact::CollisionEvent, error::PhysicsError, PhysicsConfig,
    PhysicsWorld,
};

// Re-export glam for convenience
pub use glam;
