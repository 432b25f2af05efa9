//! Configuration for the simulation core.
//!
//! Maps onto `config.toml`. Every section has defaults, so a partial file
//! only overrides what it names.
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [world]
//! width = 800.0
//! height = 600.0
//! seed = 42
//! deterministic = true
//!
//! [movement]
//! damping = 0.98
//!
//! [behavior]
//! state_timer_min = 1.0
//! state_timer_max = 5.0
//! ```

use serde::{Deserialize, Serialize};

/// World dimensions, seeding and the broad-phase grid.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f64,
    pub height: f64,
    pub seed: Option<u64>,
    pub deterministic: bool,
    pub cell_size: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            seed: None,
            deterministic: false,
            cell_size: 120.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MovementConfig {
    /// Multiplier applied to velocity after every integration step.
    pub damping: f64,
    /// Speed cap for movers without a behavior component.
    pub default_max_speed: f64,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            damping: 0.98,
            default_max_speed: 10.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct BehaviorConfig {
    pub state_timer_min: f64,
    pub state_timer_max: f64,
    /// Below this speed a wandering entity picks a new heading.
    pub wander_speed_threshold: f64,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            state_timer_min: 1.0,
            state_timer_max: 5.0,
            wander_speed_threshold: 0.1,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Step used by `World::step` and as the default command-line delta.
    pub fixed_dt: f64,
    pub definitions_dir: String,
    pub default_simulation: String,
    /// Ticks between metric summaries in the log.
    pub log_interval: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            definitions_dir: "resources/definitions/species".to_string(),
            default_simulation: "resources/defaults/default_simulation.json".to_string(),
            log_interval: 600,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub movement: MovementConfig,
    pub behavior: BehaviorConfig,
    pub simulation: SimulationConfig,
}

impl AppConfig {
    /// Checks that every value is usable by the update pipeline.
    pub fn validate(&self) -> anyhow::Result<()> {
        // World
        anyhow::ensure!(
            self.world.width.is_finite() && self.world.width > 0.0,
            "World width must be positive"
        );
        anyhow::ensure!(
            self.world.height.is_finite() && self.world.height > 0.0,
            "World height must be positive"
        );
        anyhow::ensure!(
            self.world.cell_size.is_finite() && self.world.cell_size > 0.0,
            "Spatial cell size must be positive"
        );

        // Movement
        anyhow::ensure!(
            self.movement.damping > 0.0 && self.movement.damping <= 1.0,
            "Damping must be in (0, 1]"
        );
        anyhow::ensure!(
            self.movement.default_max_speed >= 0.0,
            "Default max speed must be non-negative"
        );

        // Behavior
        anyhow::ensure!(
            self.behavior.state_timer_min > 0.0,
            "State timer minimum must be positive"
        );
        anyhow::ensure!(
            self.behavior.state_timer_min <= self.behavior.state_timer_max,
            "State timer minimum must not exceed maximum"
        );
        anyhow::ensure!(
            self.behavior.wander_speed_threshold >= 0.0,
            "Wander speed threshold must be non-negative"
        );

        // Simulation
        anyhow::ensure!(
            self.simulation.fixed_dt.is_finite() && self.simulation.fixed_dt > 0.0,
            "Fixed dt must be positive"
        );
        anyhow::ensure!(
            self.simulation.log_interval > 0,
            "Log interval must be positive"
        );

        Ok(())
    }

    /// Parses and validates a `config.toml` document.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Hash of the parameters that change simulation outcomes.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.world).as_bytes());
        hasher.update(format!("{:?}", self.movement).as_bytes());
        hasher.update(format!("{:?}", self.behavior).as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_world_width() {
        let config = AppConfig {
            world: WorldConfig {
                width: 0.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_damping() {
        let config = AppConfig {
            movement: MovementConfig {
                damping: 1.5,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_state_timer_range() {
        let config = AppConfig {
            behavior: BehaviorConfig {
                state_timer_min: 6.0,
                state_timer_max: 5.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [world]
            width = 100.0
            height = 100.0
            seed = 7
            "#,
        )
        .expect("valid toml");
        assert_eq!(config.world.seed, Some(7));
        assert_eq!(config.world.cell_size, 120.0);
        assert_eq!(config.movement.damping, 0.98);
        assert_eq!(config.behavior.state_timer_max, 5.0);
    }

    #[test]
    fn test_from_toml_rejects_invalid_values() {
        let result = AppConfig::from_toml("[simulation]\nfixed_dt = 0.0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let shipped = AppConfig::from_toml(include_str!("../../../config.toml"))
            .expect("shipped config parses");
        assert_eq!(shipped, AppConfig::default());
    }

    #[test]
    fn test_behavior_section_holds_only_ai_parameters() {
        let table = toml::Value::try_from(BehaviorConfig::default()).expect("serializable");
        let mut keys: Vec<_> = table
            .as_table()
            .map(|t| t.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "state_timer_max".to_string(),
                "state_timer_min".to_string(),
                "wander_speed_threshold".to_string()
            ]
        );
    }

    #[test]
    fn test_fingerprint_consistency() {
        let config1 = AppConfig::default();
        let config2 = AppConfig::default();
        assert_eq!(config1.fingerprint(), config2.fingerprint());

        let mut config3 = AppConfig::default();
        config3.movement.damping = 0.5;
        assert_ne!(config1.fingerprint(), config3.fingerprint());
    }
}
