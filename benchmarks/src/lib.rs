//! Shared setup helpers for sandphys benchmarks.
//!
//! ## Running
//!
//!   cargo bench --manifest-path benchmarks/Cargo.toml --bench physics
//!
//! Filter by group:
//!   cargo bench --manifest-path benchmarks/Cargo.toml --bench physics -- broadphase

use glam::Vec2;
use sandphys::ecs::components::physics::{Collider, CollisionLayer, RigidBody};
use sandphys::ecs::components::transform::Pose;

/// Screen-sized box of four walls, matching a typical sandbox level.
pub const ARENA_SIZE: Vec2 = Vec2::new(1280.0, 720.0);
const WALL_THICKNESS: f32 = 96.0;

/// Spawn the four boundary walls.
pub fn spawn_walls(world: &mut hecs::World) {
    let w = ARENA_SIZE.x;
    let h = ARENA_SIZE.y;
    let walls = [
        (Vec2::new(w / 2.0, 0.0), Vec2::new(w, WALL_THICKNESS)),
        (Vec2::new(w / 2.0, h), Vec2::new(w, WALL_THICKNESS)),
        (Vec2::new(0.0, h / 2.0), Vec2::new(WALL_THICKNESS, h)),
        (Vec2::new(w, h / 2.0), Vec2::new(WALL_THICKNESS, h)),
    ];
    for (center, size) in walls {
        world.spawn((Pose::new(center, size), Collider::new(CollisionLayer::Level)));
    }
}

/// Spawn `n` circles in a grid so roughly half of the neighbours overlap.
pub fn setup_ball_world(n: usize) -> hecs::World {
    let mut world = hecs::World::new();
    spawn_walls(&mut world);

    let cols = (n as f32).sqrt().ceil() as usize;
    let radius = 10.0;
    for i in 0..n {
        let x = 100.0 + (i % cols) as f32 * radius * 1.8;
        let y = 100.0 + (i / cols) as f32 * radius * 1.8;
        world.spawn((
            Pose::for_circle(Vec2::new(x, y), radius),
            Collider::new(CollisionLayer::Level),
            RigidBody::new(1.0, radius),
        ));
    }
    world
}

/// Sparse scene: circles far apart, almost no overlaps.
pub fn setup_sparse_world(n: usize) -> hecs::World {
    let mut world = hecs::World::new();

    let cols = (n as f32).sqrt().ceil() as usize;
    let radius = 10.0;
    for i in 0..n {
        let x = (i % cols) as f32 * radius * 10.0;
        let y = (i / cols) as f32 * radius * 10.0;
        world.spawn((
            Pose::for_circle(Vec2::new(x, y), radius),
            Collider::new(CollisionLayer::Level),
            RigidBody::new(1.0, radius),
        ));
    }
    world
}
