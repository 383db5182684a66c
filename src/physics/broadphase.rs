//! Broadphase collision detection using AABB overlap tests.

use std::collections::{HashMap, HashSet};

use crate::ecs::components::physics::{Collider, CollisionLayer};
use crate::ecs::components::transform::Pose;

use super::collider::Aabb;
use super::contact::{pair_key, CollisionEvent};

type EntityPair = (hecs::Entity, hecs::Entity);

/// Static table declaring which collider layers are tested against which.
///
/// Entries are directional, but a pair is tested once no matter which
/// layer's list produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionMatrix {
    targets: HashMap<CollisionLayer, Vec<CollisionLayer>>,
}

impl CollisionMatrix {
    /// A matrix that tests nothing.
    pub fn empty() -> Self {
        Self {
            targets: HashMap::new(),
        }
    }

    /// Test entities on `from` against entities on `to`.
    pub fn allow(mut self, from: CollisionLayer, to: CollisionLayer) -> Self {
        let list = self.targets.entry(from).or_default();
        if !list.contains(&to) {
            list.push(to);
        }
        self
    }

    /// Layers tested against `layer`.
    pub fn targets(&self, layer: CollisionLayer) -> &[CollisionLayer] {
        self.targets.get(&layer).map_or(&[], Vec::as_slice)
    }

    /// Whether an entity on `a` and an entity on `b` are tested, in either direction.
    pub fn tests(&self, a: CollisionLayer, b: CollisionLayer) -> bool {
        self.targets(a).contains(&b) || self.targets(b).contains(&a)
    }
}

impl Default for CollisionMatrix {
    /// Players collide with the level, level bodies collide with each other.
    fn default() -> Self {
        Self::empty()
            .allow(CollisionLayer::Player, CollisionLayer::Level)
            .allow(CollisionLayer::Level, CollisionLayer::Level)
    }
}

/// Brute-force broad phase over layer groups (O(n^2) per compatible group pair).
///
/// Owns the touching sets: every call to [`BroadPhase::detect`] clears each
/// collider's set and repopulates it from scratch.
#[derive(Debug, Default)]
pub struct BroadPhase {
    groups: HashMap<CollisionLayer, Vec<(hecs::Entity, Aabb)>>,
    checked: HashSet<EntityPair>,
    pairs: HashSet<EntityPair>,
    previous: HashSet<EntityPair>,
    events: Vec<CollisionEvent>,
}

impl BroadPhase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild every collider's touching set and record enter/exit events.
    ///
    /// Returns the number of unordered pairs whose bounds were tested.
    pub fn detect(&mut self, world: &mut hecs::World, matrix: &CollisionMatrix) -> usize {
        for group in self.groups.values_mut() {
            group.clear();
        }
        // Colliders without a pose still drop their old contacts.
        for (_, collider) in world.query_mut::<&mut Collider>() {
            collider.touching.clear();
        }
        for (entity, (pose, collider)) in world.query_mut::<(&Pose, &Collider)>() {
            self.groups
                .entry(collider.layer)
                .or_default()
                .push((entity, pose.aabb()));
        }

        std::mem::swap(&mut self.previous, &mut self.pairs);
        self.pairs.clear();
        self.checked.clear();

        for (layer_a, group_a) in &self.groups {
            for layer_b in matrix.targets(*layer_a) {
                let Some(group_b) = self.groups.get(layer_b) else {
                    continue;
                };
                for (entity_a, aabb_a) in group_a {
                    for (entity_b, aabb_b) in group_b {
                        if entity_a == entity_b {
                            continue;
                        }
                        let key = pair_key(*entity_a, *entity_b);
                        if !self.checked.insert(key) {
                            continue;
                        }
                        if aabb_a.overlaps(aabb_b) {
                            self.pairs.insert(key);
                        }
                    }
                }
            }
        }

        for &(a, b) in &self.pairs {
            if let Ok(mut collider) = world.get::<&mut Collider>(a) {
                collider.touching.insert(b);
            }
            if let Ok(mut collider) = world.get::<&mut Collider>(b) {
                collider.touching.insert(a);
            }
        }

        self.events.clear();
        self.events.extend(
            self.pairs
                .difference(&self.previous)
                .map(|&(a, b)| CollisionEvent::Enter { a, b }),
        );
        self.events.extend(
            self.previous
                .difference(&self.pairs)
                .map(|&(a, b)| CollisionEvent::Exit { a, b }),
        );
        self.events
            .sort_unstable_by_key(|e| (matches!(e, CollisionEvent::Exit { .. }), e.entities()));

        tracing::debug!(
            tested = self.checked.len(),
            touching = self.pairs.len(),
            events = self.events.len(),
            "broad phase"
        );

        self.checked.len()
    }

    /// Unordered pairs found touching by the last detection pass.
    pub fn touching_pairs(&self) -> impl Iterator<Item = EntityPair> + '_ {
        self.pairs.iter().copied()
    }

    pub fn is_touching(&self, a: hecs::Entity, b: hecs::Entity) -> bool {
        self.pairs.contains(&pair_key(a, b))
    }

    /// Enter events first, then exit events, each in entity order.
    pub fn events(&self) -> &[CollisionEvent] {
        &self.events
    }
}
