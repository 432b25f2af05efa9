//! Population spawning from a simulation definition.
//!
//! Every species in the definition is spawned in name order. A species whose
//! data cannot be obtained, or whose data is unusable, is skipped with a
//! warning and reported in the [`SpawnReport`]; the others still spawn.

use crate::ecs::Ecs;
use crate::error::EcsError;
use crate::EntityId;
use ecosim_data::{
    Behavior, Energy, Health, PopulationCount, Reproductive, Sex, SimulationDefinition, Species,
    SpeciesDefinition, Transform, Vec2, WorldSize,
};
use rand::Rng;
use std::collections::BTreeMap;

/// Outcome of [`spawn_population`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpawnReport {
    /// Spawned ids per species, in creation order.
    pub spawned: BTreeMap<String, Vec<EntityId>>,
    /// One `MalformedSpawnDescriptor` per skipped species.
    pub skipped: Vec<EcsError>,
}

impl SpawnReport {
    #[must_use]
    pub fn total(&self) -> usize {
        self.spawned.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    #[must_use]
    pub fn ids(&self, species: &str) -> &[EntityId] {
        self.spawned.get(species).map_or(&[], Vec::as_slice)
    }
}

/// Spawns every species in `definition`.
///
/// `species_data` supplies the per-species defaults. Entities are queued in
/// `ecs` and become visible at the next flush. Members `0..male` are male,
/// the rest female. Positions are uniform in `[0, width) × [0, height)`.
pub fn spawn_population<F, R>(
    ecs: &mut Ecs,
    definition: &SimulationDefinition,
    mut species_data: F,
    rng: &mut R,
) -> SpawnReport
where
    F: FnMut(&str) -> anyhow::Result<SpeciesDefinition>,
    R: Rng,
{
    let mut report = SpawnReport::default();
    let size = definition.world.size;
    let world_ok = valid_world(size);

    for (name, count) in &definition.initial_population {
        let data = if world_ok {
            species_data(name)
                .map_err(|e| EcsError::malformed_spawn(name.as_str(), format!("{e:#}")))
                .and_then(|data| validate_species(name, &data).map(|()| data))
        } else {
            Err(EcsError::malformed_spawn(
                name.as_str(),
                "world size must be positive and finite",
            ))
        };

        match data {
            Ok(data) => {
                let ids = spawn_species(ecs, name, *count, &data, size, rng);
                tracing::info!(species = %name, count = ids.len(), "Loaded species");
                report.spawned.insert(name.clone(), ids);
            }
            Err(err) => {
                tracing::warn!(species = %name, error = %err, "Skipping species");
                report.skipped.push(err);
            }
        }
    }
    report
}

fn spawn_species<R: Rng>(
    ecs: &mut Ecs,
    name: &str,
    count: PopulationCount,
    data: &SpeciesDefinition,
    size: WorldSize,
    rng: &mut R,
) -> Vec<EntityId> {
    (0..count.total)
        .map(|i| {
            let sex = if i < count.male { Sex::Male } else { Sex::Female };
            let pos = Vec2::new(rng.gen_range(0.0..size.width), rng.gen_range(0.0..size.height));
            spawn_member(ecs, name, data, sex, pos)
        })
        .collect()
}

/// Queues one fully equipped organism.
pub fn spawn_member(
    ecs: &mut Ecs,
    species: &str,
    data: &SpeciesDefinition,
    sex: Sex,
    pos: Vec2,
) -> EntityId {
    let id = ecs.spawn(species);
    ecs.add_component(
        id,
        Species {
            can_swim: data.can_swim,
            can_fly: data.can_fly,
            ..Species::new(species, 0)
        },
    );
    ecs.add_component(id, Health::new(data.max_health));
    ecs.add_component(id, Energy::new(data.max_energy));
    ecs.add_component(
        id,
        Transform {
            scale: data.scale,
            ..Transform::at(pos)
        },
    );
    ecs.add_component(
        id,
        Reproductive {
            can_reproduce: true,
            ..Reproductive::new(
                sex,
                data.reproduction_cooldown_max,
                data.pregnancy_duration_max,
            )
        },
    );
    ecs.add_component(id, Behavior::new(data.movement_speed, data.max_speed));
    id
}

fn valid_world(size: WorldSize) -> bool {
    size.width.is_finite() && size.height.is_finite() && size.width > 0.0 && size.height > 0.0
}

fn validate_species(name: &str, data: &SpeciesDefinition) -> crate::error::Result<()> {
    let fields = [
        ("maxHealth", data.max_health),
        ("maxEnergy", data.max_energy),
        ("movementSpeed", data.movement_speed),
        ("maxSpeed", data.max_speed),
        ("reproductionCooldownMax", data.reproduction_cooldown_max),
        ("pregnancyDurationMax", data.pregnancy_duration_max),
        ("scale", data.scale),
    ];
    for (field, value) in fields {
        if !value.is_finite() || value < 0.0 {
            return Err(EcsError::malformed_spawn(
                name,
                format!("{field} must be a non-negative number, got {value}"),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn defaults(_: &str) -> anyhow::Result<SpeciesDefinition> {
        Ok(SpeciesDefinition::default())
    }

    #[test]
    fn test_rabbit_scenario() {
        let mut ecs = Ecs::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let def = SimulationDefinition::single(
            "Rabbit",
            PopulationCount {
                total: 3,
                male: 2,
                female: 1,
            },
            100.0,
            100.0,
        );

        let report = spawn_population(&mut ecs, &def, defaults, &mut rng);
        ecs.flush();

        assert!(report.is_complete());
        let ids = report.ids("Rabbit").to_vec();
        assert_eq!(ids.len(), 3);
        assert_eq!(ecs.entities_with_tag("Rabbit"), ids.as_slice());

        let sexes: Vec<_> = ids
            .iter()
            .map(|&id| ecs.get_component::<Reproductive>(id).map(|r| r.sex))
            .collect::<Result<_, _>>()
            .expect("reproductive");
        assert_eq!(sexes, vec![Sex::Male, Sex::Male, Sex::Female]);

        for &id in &ids {
            let t = ecs.get_component::<Transform>(id).expect("transform");
            assert!((0.0..100.0).contains(&t.pos.x));
            assert!((0.0..100.0).contains(&t.pos.y));
            let h = ecs.get_component::<Health>(id).expect("health");
            assert_eq!(h.health, 100.0);
            assert!(ecs.signature_consistent(id));
        }
    }

    #[test]
    fn test_missing_species_is_skipped() {
        let mut ecs = Ecs::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut def = SimulationDefinition::single(
            "Rabbit",
            PopulationCount {
                total: 2,
                male: 1,
                female: 1,
            },
            50.0,
            50.0,
        );
        def.initial_population.insert(
            "Unicorn".to_string(),
            PopulationCount {
                total: 4,
                male: 2,
                female: 2,
            },
        );

        let report = spawn_population(
            &mut ecs,
            &def,
            |name| {
                if name == "Unicorn" {
                    anyhow::bail!("no definition file")
                }
                Ok(SpeciesDefinition::default())
            },
            &mut rng,
        );

        assert_eq!(report.total(), 2);
        assert_eq!(report.skipped.len(), 1);
        assert!(matches!(
            &report.skipped[0],
            EcsError::MalformedSpawnDescriptor { species, .. } if species == "Unicorn"
        ));
    }

    #[test]
    fn test_invalid_species_values_are_rejected() {
        let mut ecs = Ecs::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let def = SimulationDefinition::single("Fox", PopulationCount::default(), 10.0, 10.0);
        let report = spawn_population(
            &mut ecs,
            &def,
            |_| {
                Ok(SpeciesDefinition {
                    max_speed: f64::NAN,
                    ..SpeciesDefinition::default()
                })
            },
            &mut rng,
        );
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(ecs.registry().pending_count(), 0);
    }

    #[test]
    fn test_zero_world_skips_everything() {
        let mut ecs = Ecs::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let def = SimulationDefinition::single(
            "Rabbit",
            PopulationCount {
                total: 1,
                male: 1,
                female: 0,
            },
            0.0,
            10.0,
        );
        let report = spawn_population(&mut ecs, &def, defaults, &mut rng);
        assert_eq!(report.total(), 0);
        assert_eq!(report.skipped.len(), 1);
    }

    #[test]
    fn test_species_data_flows_into_components() {
        let mut ecs = Ecs::new();
        let data = SpeciesDefinition {
            max_health: 40.0,
            max_speed: 25.0,
            can_fly: true,
            ..SpeciesDefinition::default()
        };
        let id = spawn_member(&mut ecs, "Hawk", &data, Sex::Female, Vec2::new(3.0, 4.0));

        assert_eq!(ecs.get_component::<Health>(id).map(|h| h.max_health), Ok(40.0));
        // Members start at full species health.
        assert_eq!(ecs.get_component::<Health>(id).map(|h| h.health), Ok(40.0));
        assert_eq!(ecs.get_component::<Behavior>(id).map(|b| b.max_speed), Ok(25.0));
        assert_eq!(ecs.get_component::<Species>(id).map(|s| s.can_fly), Ok(true));
        assert_eq!(
            ecs.get_component::<Transform>(id).map(|t| t.pos),
            Ok(Vec2::new(3.0, 4.0))
        );
    }
}
