use crate::config::AppConfig;
use crate::signature::{ComponentKind, Signature};
use crate::storage::ComponentStorage;
use crate::system::{InterestSet, System};
use ecosim_data::{Behavior, BehaviorState, Transform, Vec2};
use rand::Rng;
use std::f64::consts::TAU;

/// Timer-driven wandering for entities with a Transform and a Behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct AiSystem {
    pub state_timer_min: f64,
    pub state_timer_max: f64,
    pub wander_speed_threshold: f64,
}

impl System for AiSystem {
    fn label() -> &'static str {
        "AiSystem"
    }
}

impl Default for AiSystem {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

impl AiSystem {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            state_timer_min: config.behavior.state_timer_min,
            state_timer_max: config.behavior.state_timer_max,
            wander_speed_threshold: config.behavior.wander_speed_threshold,
        }
    }

    #[must_use]
    pub fn required_signature() -> Signature {
        Signature::of(&[ComponentKind::Transform, ComponentKind::Behavior])
    }

    /// Runs one pass in ascending id order, drawing from `rng` as it goes.
    ///
    /// Returns the number of entities that picked a new heading.
    pub fn run<R: Rng>(
        &self,
        ids: &InterestSet,
        storage: &mut ComponentStorage,
        dt: f64,
        rng: &mut R,
    ) -> usize {
        let ComponentStorage {
            transforms,
            behavior,
            ..
        } = storage;

        let mut redirected = 0;
        for &id in ids {
            let (Some(b), Some(t)) = (behavior.get_mut(id), transforms.get_mut(id)) else {
                continue;
            };
            if self.think(b, t, dt, rng) {
                redirected += 1;
            }
        }
        redirected
    }

    /// Advances one entity's state machine. Returns true if a new wander
    /// velocity was assigned.
    pub fn think<R: Rng>(
        &self,
        behavior: &mut Behavior,
        transform: &mut Transform,
        dt: f64,
        rng: &mut R,
    ) -> bool {
        behavior.state_timer -= dt;
        if behavior.state_timer <= 0.0 {
            behavior.state_timer = self.draw_timer(rng);
            behavior.current = BehaviorState::Wander;
        }

        if behavior.current == BehaviorState::Wander
            && transform.velocity.length() < self.wander_speed_threshold
        {
            transform.velocity = random_unit_vector(rng) * behavior.movement_speed;
            return true;
        }
        false
    }

    fn draw_timer<R: Rng>(&self, rng: &mut R) -> f64 {
        let (lo, hi) = (self.state_timer_min, self.state_timer_max);
        if hi > lo {
            rng.gen_range(lo..=hi)
        } else {
            lo
        }
    }
}

pub fn random_unit_vector<R: Rng>(rng: &mut R) -> Vec2 {
    Vec2::from_angle(rng.gen_range(0.0..TAU))
}
