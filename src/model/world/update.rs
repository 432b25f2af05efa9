use crate::model::systems::{AiSystem, MovementSystem};
use crate::model::world::World;
use ecosim_core::entity::FlushStats;
use rand::SeedableRng;
use std::time::Instant;

/// What one [`World::tick`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub flushed: FlushStats,
    /// Entities placed in the spatial hash.
    pub indexed: usize,
    /// Entities the AI pass gave a new heading.
    pub redirected: usize,
    /// Entities the Movement pass integrated.
    pub moved: usize,
    pub paused: bool,
}

impl World {
    /// Advances the simulation by one tick.
    ///
    /// In order:
    /// 1. Apply queued GUI commands
    /// 2. Flush pending spawns and destroys
    /// 3. Rebuild the spatial hash from every active Transform
    /// 4. AI pass, then Movement pass (skipped while paused)
    ///
    /// A non-positive `dt` makes Movement a no-op for this tick.
    pub fn tick(&mut self, dt: f64) -> TickSummary {
        let start = Instant::now();
        self.tick += 1;
        self.apply_commands();

        if self.config.world.deterministic {
            let seed = self
                .config
                .world
                .seed
                .unwrap_or(0)
                .wrapping_add(self.tick)
                .wrapping_add(0x5EED);
            self.rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
        }

        let mut summary = TickSummary {
            flushed: self.ecs.flush(),
            paused: self.is_paused(),
            ..TickSummary::default()
        };
        summary.indexed = self.pass_spatial_indexing();

        if !summary.paused {
            summary.redirected = self.pass_ai(dt);
            summary.moved = self.pass_movement(dt);
            self.frame += 1;
        }

        self.metrics.record_tick(start.elapsed(), self.population());
        summary
    }

    /// Runs one tick with the configured fixed step.
    pub fn step(&mut self) -> TickSummary {
        self.tick(self.config.simulation.fixed_dt)
    }

    fn pass_spatial_indexing(&mut self) -> usize {
        let ecs = &self.ecs;
        self.spatial_hash.rebuild(
            ecs.components()
                .transforms
                .iter()
                .filter(|&(id, _)| ecs.is_active(id))
                .map(|(id, t)| (id, t.pos.x, t.pos.y)),
        );
        self.spatial_hash.len()
    }

    fn pass_ai(&mut self, dt: f64) -> usize {
        let rng = &mut self.rng;
        self.ecs
            .run_system::<AiSystem, _, _>(|ai, ids, _, storage| ai.run(ids, storage, dt, rng))
            .unwrap_or(0)
    }

    fn pass_movement(&mut self, dt: f64) -> usize {
        self.ecs
            .run_system::<MovementSystem, _, _>(|movement, ids, _, storage| {
                movement.run(ids, storage, dt)
            })
            .unwrap_or(0)
    }
}
