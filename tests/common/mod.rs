pub mod macros;

use ecosim_data::{
    Behavior, PopulationCount, SimulationDefinition, SpeciesDefinition, Transform, Vec2,
};
use ecosim_lib::model::config::AppConfig;
use ecosim_lib::model::world::World;
use std::collections::HashMap;

type ConfigMod = Box<dyn FnOnce(&mut AppConfig)>;

#[allow(dead_code)]
pub struct WorldBuilder {
    config: AppConfig,
    definition: SimulationDefinition,
    species: HashMap<String, SpeciesDefinition>,
    config_mods: Vec<ConfigMod>,
}

#[allow(dead_code)]
impl WorldBuilder {
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.world.seed = Some(42);
        config.world.width = 800.0;
        config.world.height = 600.0;
        Self {
            config,
            definition: SimulationDefinition::default(),
            species: HashMap::new(),
            config_mods: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.world.seed = Some(seed);
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig) + 'static,
    {
        self.config_mods.push(Box::new(modifier));
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.definition.world.size.width = width;
        self.definition.world.size.height = height;
        self
    }

    /// Adds `total` members of `name`, the first `male` of them male.
    pub fn with_population(mut self, name: &str, total: u32, male: u32) -> Self {
        self.definition.initial_population.insert(
            name.to_string(),
            PopulationCount {
                total,
                male,
                female: total.saturating_sub(male),
            },
        );
        self
    }

    pub fn with_species_data(mut self, name: &str, data: SpeciesDefinition) -> Self {
        self.species.insert(name.to_string(), data);
        self
    }

    /// Builds the world, spawns the population and flushes it so it is
    /// visible immediately.
    pub fn build(self) -> World {
        let mut config = self.config;
        for modifier in self.config_mods {
            modifier(&mut config);
        }
        let mut world = World::new(config).expect("Failed to create world");
        let species = self.species;
        world.load_population_with(&self.definition, |name| {
            Ok(species.get(name).cloned().unwrap_or_default())
        });
        world.ecs.flush();
        world
    }
}

/// Queues an entity with a Transform and a Behavior. Not flushed.
#[allow(dead_code)]
pub fn spawn_walker(world: &mut World, pos: Vec2, velocity: Vec2) -> ecosim_core::EntityId {
    let id = world.ecs.spawn("Walker");
    world.ecs.add_component(id, Transform::moving(pos, velocity));
    world.ecs.add_component(id, Behavior::default());
    id
}
