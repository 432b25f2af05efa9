mod common;

use common::WorldBuilder;
use ecosim_data::{Behavior, BehaviorState, Transform, Vec2};
use ecosim_lib::model::systems::AiSystem;

fn spawn_thinker(world: &mut ecosim_lib::model::world::World, timer: f64, velocity: Vec2) -> u64 {
    let id = world.ecs.spawn("Thinker");
    world
        .ecs
        .add_component(id, Transform::moving(Vec2::new(400.0, 300.0), velocity));
    world.ecs.add_component(
        id,
        Behavior {
            state_timer: timer,
            ..Behavior::default()
        },
    );
    id
}

#[test]
fn test_expired_timer_transitions_to_wander_in_one_pass() {
    let mut world = WorldBuilder::new().build();
    let id = spawn_thinker(&mut world, 0.05, Vec2::ZERO);

    let summary = world.tick(0.1);
    assert_eq!(summary.redirected, 1);

    let b = world.ecs.get_component::<Behavior>(id).expect("behavior");
    assert_eq!(b.current, BehaviorState::Wander);
    assert!(
        (1.0..=5.0).contains(&b.state_timer),
        "timer {} outside [1, 5]",
        b.state_timer
    );
}

#[test]
fn test_wandering_entity_gets_heading_at_movement_speed() {
    let mut world = WorldBuilder::new().build();
    let id = spawn_thinker(&mut world, 0.0, Vec2::ZERO);

    // Movement after AI damps the fresh heading once.
    world.tick(0.1);

    let t = world.ecs.get_component::<Transform>(id).expect("transform");
    assert!((t.velocity.length() - 8.0 * 0.98).abs() < 1e-9);
}

#[test]
fn test_unexpired_timer_keeps_state() {
    let mut world = WorldBuilder::new().build();
    let id = spawn_thinker(&mut world, 3.0, Vec2::ZERO);

    let summary = world.tick(0.1);
    assert_eq!(summary.redirected, 0);

    let b = world.ecs.get_component::<Behavior>(id).expect("behavior");
    assert_eq!(b.current, BehaviorState::Idle);
    assert!((b.state_timer - 2.9).abs() < 1e-9);
}

#[test]
fn test_fast_wanderer_keeps_its_velocity() {
    let mut world = WorldBuilder::new().build();
    let id = spawn_thinker(&mut world, 0.0, Vec2::new(5.0, 0.0));

    let summary = world.tick(0.1);
    assert_eq!(summary.redirected, 0);

    let t = world.ecs.get_component::<Transform>(id).expect("transform");
    assert!((t.velocity.x - 4.9).abs() < 1e-9);
    assert_eq!(t.velocity.y, 0.0);
}

#[test]
fn test_ai_ignores_entities_without_transform() {
    let mut world = WorldBuilder::new().build();
    let id = world.ecs.spawn("Ghost");
    world.ecs.add_component(id, Behavior::default());

    let summary = world.tick(0.1);
    assert_eq!(summary.redirected, 0);
    assert!(!world
        .ecs
        .interest::<AiSystem>()
        .is_some_and(|ids| ids.contains(&id)));
    let b = world.ecs.get_component::<Behavior>(id).expect("behavior");
    assert_eq!(b.current, BehaviorState::Idle);
}

#[test]
fn test_configured_timer_range_is_respected() {
    let mut world = WorldBuilder::new()
        .with_config(|c| {
            c.behavior.state_timer_min = 2.0;
            c.behavior.state_timer_max = 2.0;
        })
        .build();
    let id = spawn_thinker(&mut world, 0.0, Vec2::ZERO);

    world.tick(0.5);

    let b = world.ecs.get_component::<Behavior>(id).expect("behavior");
    assert_eq!(b.state_timer, 2.0);
}
