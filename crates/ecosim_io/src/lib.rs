//! # Ecosim IO
//!
//! Loading of spawn descriptors from disk.
//!
//! This crate provides:
//! - Structured error handling with custom error types
//! - Validated JSON reading helpers
//! - Simulation definition and per-species definition loading

/// Simulation and species definition loading
pub mod definitions;
/// Error types and result aliases for I/O operations
pub mod error;
/// Validated JSON deserialization helpers
pub mod serialization;

pub use definitions::{load_simulation, parse_simulation, SpeciesCatalog};
pub use error::{IoError, Result};
pub use serialization::{from_json, read_json_file};
