//! Per-tick update passes.
//!
//! Each pass is registered once with the [`crate::system::SystemRegistry`]
//! and iterates only its interest set. AI always runs before Movement.

pub mod ai;
pub mod movement;

pub use ai::AiSystem;
pub use movement::MovementSystem;
