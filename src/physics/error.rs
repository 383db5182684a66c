//! Contract violations raised by the physics pipeline.

use thiserror::Error;

/// Errors that abort the current physics tick.
///
/// Every variant signals a broken invariant between pipeline stages or misuse
/// of the scratch arena; none of them are recoverable within the tick.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PhysicsError {
    #[error("entity {entity:?} is missing required component `{component}`")]
    MissingComponent {
        entity: hecs::Entity,
        component: &'static str,
    },

    #[error("scratch arena exhausted (capacity {capacity})")]
    ArenaExhausted { capacity: usize },

    #[error("scratch arena over-release: returning {requested} with only {outstanding} outstanding")]
    ArenaOverRelease { requested: usize, outstanding: usize },
}

impl PhysicsError {
    pub(crate) fn missing<T>(entity: hecs::Entity) -> Self {
        let full = std::any::type_name::<T>();
        Self::MissingComponent {
            entity,
            component: full.rsplit("::").next().unwrap_or(full),
        }
    }
}

pub type PhysicsResult<T> = Result<T, PhysicsError>;
