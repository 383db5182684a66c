//! CPU-based 2D physics core with circle bodies and static rectangles.
//!
//! # Architecture
//!
//! Every call to [`PhysicsWorld::step`] runs one tick:
//!
//! 1. Broadphase: rebuild every collider's touching set (AABB overlap,
//!    filtered by the layer-compatibility matrix) and record enter/exit events
//! 2. For each dynamic body, in store order:
//!    1. Apply gravity and drag, advance the position
//!    2. For each entity in its touching set: narrowphase test, then one
//!       impulse and one positional correction
//!
//! Detection always completes for all entities before any body is integrated.
//! A pair of dynamic bodies is resolved once from each side within a tick.

pub mod arena;
pub mod broadphase;
pub mod collider;
pub mod contact;
pub mod error;
pub mod narrowphase;
pub mod rigid_body;
pub mod solver;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::ecs::components::physics::{Collider, RigidBody};
use crate::ecs::components::transform::Pose;

use self::arena::{ScratchArena, DEFAULT_ARENA_CAPACITY};
use self::broadphase::{BroadPhase, CollisionMatrix};
use self::contact::CollisionEvent;
use self::error::{PhysicsError, PhysicsResult};
use self::rigid_body::BodyKind;

/// Configuration for the physics simulation.
#[derive(Debug, Clone)]
pub struct PhysicsConfig {
    /// Constant acceleration in y-down screen space. Default: (0, 0.1).
    pub gravity: Vec2,
    /// Fraction of velocity removed on every tick. Default: 0.0001.
    pub drag: f32,
    /// Coefficient of restitution. Default: 0.9.
    pub restitution: f32,
    /// Number of scratch vectors available to one resolution call. Default: 256.
    pub arena_capacity: usize,
    /// Which collider layers are tested against which.
    pub collision_matrix: CollisionMatrix,
    /// Seed for the random normal used when two circle centers coincide.
    pub seed: u64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, 0.1),
            drag: 0.0001,
            restitution: solver::DEFAULT_RESTITUTION,
            arena_capacity: DEFAULT_ARENA_CAPACITY,
            collision_matrix: CollisionMatrix::default(),
            seed: 0x5eed_2d,
        }
    }
}

/// The main physics world managing simulation state.
pub struct PhysicsWorld {
    config: PhysicsConfig,
    broadphase: BroadPhase,
    arena: ScratchArena,
    rng: StdRng,
    bodies: Vec<hecs::Entity>,
    neighbours: Vec<hecs::Entity>,
    contacts_resolved: usize,
}

impl PhysicsWorld {
    /// Create a new physics world with the given configuration.
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            arena: ScratchArena::with_capacity(config.arena_capacity),
            rng: StdRng::seed_from_u64(config.seed),
            config,
            broadphase: BroadPhase::new(),
            bodies: Vec::new(),
            neighbours: Vec::new(),
            contacts_resolved: 0,
        }
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Step the physics simulation forward by one tick of `delta_time`.
    ///
    /// A contract violation aborts the tick where it happened; changes made
    /// before that point are kept.
    pub fn step(&mut self, world: &mut hecs::World, delta_time: f32) -> PhysicsResult<()> {
        self.detect(world);
        self.integrate_and_resolve(world, delta_time)
    }

    /// Broadphase only: rebuild touching sets and collision events.
    pub fn detect(&mut self, world: &mut hecs::World) {
        self.broadphase
            .detect(world, &self.config.collision_matrix);
    }

    /// Integrate every dynamic body and resolve its current contacts.
    ///
    /// Reads the touching sets left by the last [`detect`](Self::detect).
    pub fn integrate_and_resolve(
        &mut self,
        world: &mut hecs::World,
        delta_time: f32,
    ) -> PhysicsResult<()> {
        self.contacts_resolved = 0;

        let mut bodies = std::mem::take(&mut self.bodies);
        bodies.clear();
        bodies.extend(
            world
                .query_mut::<(&Pose, &Collider, &RigidBody)>()
                .into_iter()
                .map(|(entity, _)| entity),
        );

        let result = bodies
            .iter()
            .try_for_each(|&entity| self.step_body(world, entity, delta_time));
        self.bodies = bodies;

        tracing::debug!(
            bodies = self.bodies.len(),
            contacts = self.contacts_resolved,
            "integrate and resolve"
        );
        result.inspect_err(|err| tracing::error!(%err, "physics tick aborted"))
    }

    fn step_body(
        &mut self,
        world: &mut hecs::World,
        entity: hecs::Entity,
        delta_time: f32,
    ) -> PhysicsResult<()> {
        rigid_body::integrate(
            world,
            entity,
            self.config.gravity,
            self.config.drag,
            delta_time,
        )?;

        let mut neighbours = std::mem::take(&mut self.neighbours);
        neighbours.clear();
        {
            let collider = world
                .get::<&Collider>(entity)
                .map_err(|_| PhysicsError::missing::<Collider>(entity))?;
            neighbours.extend(collider.touching().iter().copied());
        }

        let result = neighbours
            .iter()
            .try_for_each(|&other| self.resolve_pair(world, entity, other));
        self.neighbours = neighbours;
        result
    }

    fn resolve_pair(
        &mut self,
        world: &mut hecs::World,
        entity: hecs::Entity,
        other: hecs::Entity,
    ) -> PhysicsResult<()> {
        let (center, radius) = {
            let pose = world
                .get::<&Pose>(entity)
                .map_err(|_| PhysicsError::missing::<Pose>(entity))?;
            let rb = world
                .get::<&RigidBody>(entity)
                .map_err(|_| PhysicsError::missing::<RigidBody>(entity))?;
            (pose.position, rb.radius)
        };
        let kind = BodyKind::resolve(world, other)?;

        let mut scope = self.arena.scope();
        let contact = match kind {
            BodyKind::Dynamic {
                position,
                radius: other_radius,
                ..
            } => narrowphase::circle_circle(
                center,
                radius,
                position,
                other_radius,
                &mut scope,
                &mut self.rng,
            )?,
            BodyKind::Static { bounds } => {
                narrowphase::circle_rectangle(center, radius, &bounds, &mut scope)?
            }
        };
        drop(scope);

        let Some(contact) = contact else {
            return Ok(());
        };
        tracing::trace!(?entity, ?other, ?contact, "contact");

        match kind {
            BodyKind::Dynamic { .. } => solver::resolve_circle_circle(
                world,
                entity,
                other,
                &contact,
                self.config.restitution,
            )?,
            BodyKind::Static { .. } => solver::resolve_circle_rectangle(
                world,
                entity,
                &contact,
                radius,
                self.config.restitution,
            )?,
        }
        self.contacts_resolved += 1;
        Ok(())
    }

    /// Collision enter/exit events produced by the last detection pass.
    pub fn events(&self) -> &[CollisionEvent] {
        self.broadphase.events()
    }

    pub fn broadphase(&self) -> &BroadPhase {
        &self.broadphase
    }

    /// Scratch arena; fully available between resolution calls.
    pub fn arena(&self) -> &ScratchArena {
        &self.arena
    }

    /// Number of contacts that produced a response during the last tick.
    pub fn contacts_resolved(&self) -> usize {
        self.contacts_resolved
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}
