use crate::model::config::AppConfig;
use crate::model::definitions::SpeciesCatalog;
use crate::model::ecs::Ecs;
use crate::model::events::{EventBus, GuiCommand, SceneRequest};
use crate::model::lifecycle::{self, SpawnReport};
use crate::model::metrics::Metrics;
use crate::model::spatial_hash::SpatialHash;
use crate::model::systems::{AiSystem, MovementSystem};
use crate::model::world::{CommandInbox, World};
use ecosim_data::{SimulationDefinition, SpeciesDefinition};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::Path;
use std::rc::Rc;

impl World {
    /// Builds an empty world with its own event bus.
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        Self::with_event_bus(config, Rc::new(EventBus::new()))
    }

    /// Builds an empty world listening on a shared bus.
    pub fn with_event_bus(config: AppConfig, events: Rc<EventBus>) -> anyhow::Result<Self> {
        config.validate()?;

        let rng = if let Some(seed) = config.world.seed {
            ChaCha8Rng::seed_from_u64(seed)
        } else {
            ChaCha8Rng::from_entropy()
        };

        let mut ecs = Ecs::new();
        ecs.register_system(AiSystem::from_config(&config))?;
        ecs.set_required_signature::<AiSystem>(AiSystem::required_signature())?;
        ecs.register_system(MovementSystem::from_config(&config))?;
        ecs.set_required_signature::<MovementSystem>(MovementSystem::required_signature())?;

        let inbox: CommandInbox = Rc::new(RefCell::new(VecDeque::new()));
        let scene_requests = Rc::new(RefCell::new(VecDeque::new()));

        let commands = Rc::clone(&inbox);
        let on_command = events.subscribe(move |cmd: &GuiCommand| {
            commands.borrow_mut().push_back(*cmd);
        });
        let scenes = Rc::clone(&scene_requests);
        let on_scene = events.subscribe(move |req: &SceneRequest| {
            scenes.borrow_mut().push_back(req.key.clone());
        });

        tracing::info!(
            width = config.world.width,
            height = config.world.height,
            seed = ?config.world.seed,
            fingerprint = %config.fingerprint(),
            "World created"
        );

        Ok(Self {
            width: config.world.width,
            height: config.world.height,
            tick: 0,
            ecs,
            spatial_hash: SpatialHash::new(config.world.cell_size),
            metrics: Metrics::new(config.simulation.log_interval),
            rng,
            config,
            events,
            inbox,
            scene_requests,
            subscriptions: vec![on_command, on_scene],
            frame: 0,
            paused: false,
            running: true,
        })
    }

    /// Loads a simulation file and populates it from the species directory.
    pub fn from_files<P, Q>(
        config: AppConfig,
        simulation: P,
        species_dir: Q,
    ) -> anyhow::Result<(Self, SpawnReport)>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let definition = ecosim_io::load_simulation(simulation)?;
        let mut catalog = SpeciesCatalog::new(species_dir.as_ref());
        let mut world = Self::new(config)?;
        let report = world.load_population(&definition, &mut catalog);
        Ok((world, report))
    }

    /// Adopts the definition's world size and spawns its population with
    /// species data from `catalog`.
    ///
    /// Spawned entities appear after the next flush, which the next tick
    /// performs first.
    pub fn load_population(
        &mut self,
        definition: &SimulationDefinition,
        catalog: &mut SpeciesCatalog,
    ) -> SpawnReport {
        self.load_population_with(definition, |name| Ok(catalog.load(name)?))
    }

    /// Like [`World::load_population`] with a caller-supplied species lookup.
    pub fn load_population_with<F>(
        &mut self,
        definition: &SimulationDefinition,
        species_data: F,
    ) -> SpawnReport
    where
        F: FnMut(&str) -> anyhow::Result<SpeciesDefinition>,
    {
        let size = definition.world.size;
        if size.width > 0.0 && size.height > 0.0 {
            self.set_bounds(size.width, size.height);
        }
        let report =
            lifecycle::spawn_population(&mut self.ecs, definition, species_data, &mut self.rng);
        tracing::info!(
            spawned = report.total(),
            skipped = report.skipped.len(),
            "Population loaded"
        );
        report
    }

    /// Changes the world size used by bounds clamping.
    pub fn set_bounds(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        if let Some(movement) = self.ecs.get_system_mut::<MovementSystem>() {
            movement.set_bounds(width, height);
        }
    }
}
