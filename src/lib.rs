//! # Ecosim
//!
//! Ecosystem simulation built on the `ecosim_core` ECS. [`model::world::World`]
//! owns the ECS, the spatial hash and the event bus and runs the per-tick
//! update pipeline.

pub mod model;
