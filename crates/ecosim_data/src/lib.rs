//! Plain data shared by the simulation crates: component payloads, the 2D
//! vector type, and the shapes of the spawn descriptors read from disk.

pub mod data;

pub use data::*;
