//! Shapes of the spawn descriptors.
//!
//! A simulation definition names the species to populate and the world size:
//!
//! ```json
//! {
//!   "simulation": {
//!     "world": { "size": { "width": 800, "height": 600 } },
//!     "initialPopulation": {
//!       "Rabbit": { "total": 3, "male": 2, "female": 1 }
//!     }
//!   }
//! }
//! ```
//!
//! Each species may additionally carry a [`SpeciesDefinition`] file whose
//! fields all fall back to defaults.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PopulationCount {
    pub total: u32,
    pub male: u32,
    pub female: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldSize {
    pub width: f64,
    pub height: f64,
}

impl Default for WorldSize {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldDefinition {
    #[serde(default)]
    pub size: WorldSize,
}

/// Population and world description for one simulation.
///
/// Species are kept in name order, which fixes the spawn order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationDefinition {
    #[serde(default)]
    pub world: WorldDefinition,
    #[serde(default)]
    pub initial_population: BTreeMap<String, PopulationCount>,
}

impl SimulationDefinition {
    /// Builds a single-species definition, mostly for tests and tools.
    #[must_use]
    pub fn single(species: &str, count: PopulationCount, width: f64, height: f64) -> Self {
        let mut initial_population = BTreeMap::new();
        initial_population.insert(species.to_string(), count);
        Self {
            world: WorldDefinition {
                size: WorldSize { width, height },
            },
            initial_population,
        }
    }
}

/// Top-level wrapper matching the on-disk layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationFile {
    pub simulation: SimulationDefinition,
}

/// Per-species default data applied to every spawned member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpeciesDefinition {
    pub max_health: f64,
    pub max_energy: f64,
    pub movement_speed: f64,
    pub max_speed: f64,
    pub can_swim: bool,
    pub can_fly: bool,
    pub reproduction_cooldown_max: f64,
    pub pregnancy_duration_max: f64,
    pub scale: f64,
}

impl Default for SpeciesDefinition {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            max_energy: 100.0,
            movement_speed: 8.0,
            max_speed: 10.0,
            can_swim: false,
            can_fly: false,
            reproduction_cooldown_max: 10.0,
            pregnancy_duration_max: 10.0,
            scale: 2.0,
        }
    }
}
