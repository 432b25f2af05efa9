use super::math::Vec2;
use serde::{Deserialize, Serialize};

/// Position, velocity and draw scale of an organism.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub pos: Vec2,
    pub velocity: Vec2,
    pub scale: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            velocity: Vec2::ZERO,
            scale: 2.0,
        }
    }
}

impl Transform {
    #[must_use]
    pub fn at(pos: Vec2) -> Self {
        Self {
            pos,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn moving(pos: Vec2, velocity: Vec2) -> Self {
        Self {
            pos,
            velocity,
            ..Self::default()
        }
    }
}

/// Species membership and static traits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    pub name: String,
    pub age: u32,
    pub can_swim: bool,
    pub can_fly: bool,
}

impl Default for Species {
    fn default() -> Self {
        Self {
            name: "Unknown".to_string(),
            age: 0,
            can_swim: false,
            can_fly: false,
        }
    }
}

impl Species {
    #[must_use]
    pub fn new(name: impl Into<String>, age: u32) -> Self {
        Self {
            name: name.into(),
            age,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub health: f64,
    pub max_health: f64,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl Health {
    /// Full health with the given ceiling.
    #[must_use]
    pub fn new(max_health: f64) -> Self {
        Self {
            health: max_health,
            max_health,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Energy {
    pub energy: f64,
    pub max_energy: f64,
}

impl Default for Energy {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl Energy {
    #[must_use]
    pub fn new(max_energy: f64) -> Self {
        Self {
            energy: max_energy,
            max_energy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Sex {
    #[default]
    Male,
    Female,
}

/// Reproduction timers and flags.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reproductive {
    pub sex: Sex,
    pub can_reproduce: bool,
    pub is_pregnant: bool,
    /// Seconds until the next reproduction may occur.
    pub reproduction_cooldown: f64,
    pub pregnancy_duration: f64,
    pub time_pregnant: f64,
    pub reproduction_cooldown_max: f64,
    pub pregnancy_duration_max: f64,
}

impl Default for Reproductive {
    fn default() -> Self {
        Self {
            sex: Sex::Male,
            can_reproduce: false,
            is_pregnant: false,
            reproduction_cooldown: 0.0,
            pregnancy_duration: 0.0,
            time_pregnant: 0.0,
            reproduction_cooldown_max: 10.0,
            pregnancy_duration_max: 10.0,
        }
    }
}

impl Reproductive {
    #[must_use]
    pub fn new(sex: Sex, reproduction_cooldown_max: f64, pregnancy_duration_max: f64) -> Self {
        Self {
            sex,
            reproduction_cooldown_max,
            pregnancy_duration_max,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BehaviorState {
    #[default]
    Idle,
    Wander,
}

/// Decision state driven by the AI pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Behavior {
    pub current: BehaviorState,
    /// Seconds left in the current state.
    pub state_timer: f64,
    pub movement_speed: f64,
    pub max_speed: f64,
}

impl Default for Behavior {
    fn default() -> Self {
        Self {
            current: BehaviorState::Idle,
            state_timer: 0.0,
            movement_speed: 8.0,
            max_speed: 10.0,
        }
    }
}

impl Behavior {
    #[must_use]
    pub fn new(movement_speed: f64, max_speed: f64) -> Self {
        Self {
            movement_speed,
            max_speed,
            ..Self::default()
        }
    }
}
