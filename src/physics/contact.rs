//! Contact data structures for collision response.

use glam::Vec2;

/// Result of a narrow-phase test between a dynamic circle and another body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactInfo {
    /// Contact position in world space.
    pub position: Vec2,
    /// Unit contact normal, pointing from body A toward body B.
    pub normal: Vec2,
    /// Signed distance between the shapes; negative while overlapping.
    pub signed_distance: f32,
}

impl ContactInfo {
    #[inline]
    pub fn is_penetrating(&self) -> bool {
        self.signed_distance < 0.0
    }
}

/// Change in the touching state of an unordered entity pair.
///
/// `a` and `b` are in canonical order (`a < b`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionEvent {
    /// The pair started overlapping this tick.
    Enter { a: hecs::Entity, b: hecs::Entity },
    /// The pair stopped overlapping this tick.
    Exit { a: hecs::Entity, b: hecs::Entity },
}

impl CollisionEvent {
    pub fn entities(&self) -> (hecs::Entity, hecs::Entity) {
        match *self {
            CollisionEvent::Enter { a, b } | CollisionEvent::Exit { a, b } => (a, b),
        }
    }

    /// Whether `entity` is one side of this event.
    pub fn involves(&self, entity: hecs::Entity) -> bool {
        let (a, b) = self.entities();
        a == entity || b == entity
    }
}

/// Canonical pair key (smaller entity first).
#[inline]
pub fn pair_key(a: hecs::Entity, b: hecs::Entity) -> (hecs::Entity, hecs::Entity) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}
