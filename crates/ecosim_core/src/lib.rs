//! # Ecosim Core
//!
//! The entity-component-system core of the ecosystem simulation.
//!
//! This crate contains:
//! - Entity identity, liveness and deferred add/remove ([`entity`])
//! - Per-kind sparse-set component storage ([`storage`])
//! - Component signatures and incrementally maintained system interest sets
//!   ([`signature`], [`system`])
//! - The [`ecs::Ecs`] facade that keeps the three consistent
//! - A uniform-grid broad phase ([`spatial_hash`])
//! - A type-keyed event bus ([`events`])
//! - The AI and Movement passes ([`systems`]) and population spawning
//!   ([`lifecycle`])
//!
//! ## Example
//!
//! ```
//! use ecosim_core::ecs::Ecs;
//! use ecosim_core::systems::MovementSystem;
//! use ecosim_data::{Transform, Vec2};
//!
//! let mut ecs = Ecs::new();
//! ecs.register_system(MovementSystem::default()).unwrap();
//! ecs.set_required_signature::<MovementSystem>(MovementSystem::required_signature())
//!     .unwrap();
//!
//! let id = ecs.spawn("Rabbit");
//! ecs.add_component(id, Transform::moving(Vec2::new(10.0, 10.0), Vec2::new(1.0, 0.0)));
//! ecs.flush();
//!
//! ecs.run_system::<MovementSystem, _, _>(|movement, ids, _, storage| {
//!     movement.run(ids, storage, 1.0)
//! });
//! let t = ecs.get_component::<Transform>(id).unwrap();
//! assert_eq!(t.pos, Vec2::new(11.0, 10.0));
//! ```

/// Entity identifier. Issued in increasing order; reused only after a full reset.
pub type EntityId = u64;

/// Configuration management for simulation parameters
pub mod config;
/// The ECS facade
pub mod ecs;
/// Entity registry with pending and deferred-destroy buffers
pub mod entity;
pub mod error;
/// Type-keyed publish/subscribe bus and GUI event kinds
pub mod events;
/// Population spawning from simulation definitions
pub mod lifecycle;
/// Tick metrics and structured logging setup
pub mod metrics;
pub mod signature;
/// Spatial hashing for broad-phase neighbor queries
pub mod spatial_hash;
pub mod storage;
pub mod system;
/// AI and Movement passes
pub mod systems;

pub use ecs::Ecs;
pub use error::{EcsError, Result};
pub use events::{EventBus, GuiCommand, SceneRequest, Subscription};
pub use signature::{ComponentKind, Signature};
pub use spatial_hash::SpatialHash;
