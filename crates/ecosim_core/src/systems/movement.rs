use crate::config::AppConfig;
use crate::signature::{ComponentKind, Signature};
use crate::storage::ComponentStorage;
use crate::system::{InterestSet, System};
use ecosim_data::Transform;

/// Integrates velocity into position for every entity with a Transform.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementSystem {
    pub damping: f64,
    pub default_max_speed: f64,
    pub width: f64,
    pub height: f64,
}

impl System for MovementSystem {
    fn label() -> &'static str {
        "MovementSystem"
    }
}

impl Default for MovementSystem {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

impl MovementSystem {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            damping: config.movement.damping,
            default_max_speed: config.movement.default_max_speed,
            width: config.world.width,
            height: config.world.height,
        }
    }

    #[must_use]
    pub fn required_signature() -> Signature {
        ComponentKind::Transform.into()
    }

    pub fn set_bounds(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Runs one pass. A non-positive `dt` leaves every entity untouched.
    ///
    /// Returns the number of entities moved.
    pub fn run(&self, ids: &InterestSet, storage: &mut ComponentStorage, dt: f64) -> usize {
        if dt <= 0.0 || !dt.is_finite() {
            return 0;
        }

        let ComponentStorage {
            transforms,
            behavior,
            ..
        } = storage;

        let mut moved = 0;
        for &id in ids {
            let Some(transform) = transforms.get_mut(id) else {
                continue;
            };
            let max_speed = behavior
                .get(id)
                .map_or(self.default_max_speed, |b| b.max_speed);
            handle_movement(MovementContext {
                transform,
                max_speed,
                damping: self.damping,
                dt,
                width: self.width,
                height: self.height,
            });
            moved += 1;
        }
        moved
    }
}

pub struct MovementContext<'a> {
    pub transform: &'a mut Transform,
    pub max_speed: f64,
    pub damping: f64,
    pub dt: f64,
    pub width: f64,
    pub height: f64,
}

/// Clamp speed, integrate, damp, then keep the position inside the world.
pub fn handle_movement(ctx: MovementContext) {
    let t = ctx.transform;
    t.velocity = t.velocity.clamp_length(ctx.max_speed);
    t.pos += t.velocity * ctx.dt;
    t.velocity = t.velocity * ctx.damping;

    t.pos.x = t.pos.x.clamp(0.0, ctx.width.max(0.0));
    t.pos.y = t.pos.y.clamp(0.0, ctx.height.max(0.0));
}
