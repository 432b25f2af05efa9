//! Error types for the ECS core.
//!
//! `NotFound`, `DuplicateRegistration`, `UnregisteredSystem` and
//! `EmptySignature` are contract violations: the caller is expected to have
//! checked first. `MalformedSpawnDescriptor` is reported per species while a
//! population spawn carries on with the remaining species.

use crate::signature::ComponentKind;
use crate::EntityId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EcsError {
    /// Component lookup on an entity that does not carry that component.
    #[error("{kind:?} component not found for entity {id}")]
    NotFound { kind: ComponentKind, id: EntityId },

    /// A system kind was registered twice.
    #[error("System already registered: {0}")]
    DuplicateRegistration(&'static str),

    /// A required signature was set for a system that was never registered.
    #[error("System not registered: {0}")]
    UnregisteredSystem(&'static str),

    /// A system was given a required signature with no bits set.
    #[error("Empty required signature for system: {0}")]
    EmptySignature(&'static str),

    /// A species definition was missing or unparsable during population spawn.
    #[error("Malformed spawn descriptor for species '{species}': {reason}")]
    MalformedSpawnDescriptor { species: String, reason: String },
}

pub type Result<T> = std::result::Result<T, EcsError>;

impl EcsError {
    #[must_use]
    pub fn not_found(kind: ComponentKind, id: EntityId) -> Self {
        Self::NotFound { kind, id }
    }

    #[must_use]
    pub fn malformed_spawn<S: Into<String>, R: ToString>(species: S, reason: R) -> Self {
        Self::MalformedSpawnDescriptor {
            species: species.into(),
            reason: reason.to_string(),
        }
    }
}
