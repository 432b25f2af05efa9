mod common;

use common::{spawn_walker, WorldBuilder};
use ecosim_data::{Behavior, Transform, Vec2};

#[test]
fn test_speed_clamped_then_damped_through_world_tick() {
    let mut world = WorldBuilder::new().build();
    let id = spawn_walker(&mut world, Vec2::new(400.0, 300.0), Vec2::new(30.0, 40.0));

    let summary = world.tick(1.0);
    assert_eq!(summary.moved, 1);

    let t = world.ecs.get_component::<Transform>(id).expect("transform");
    assert!(
        (t.velocity.length() - 9.8).abs() < 1e-9,
        "speed should be 10 * 0.98, got {}",
        t.velocity.length()
    );
    assert!((t.velocity.x / t.velocity.y - 0.75).abs() < 1e-9, "direction kept");
    assert!((t.pos.x - 406.0).abs() < 1e-9);
    assert!((t.pos.y - 308.0).abs() < 1e-9);
}

#[test]
fn test_slow_entity_is_only_damped() {
    let mut world = WorldBuilder::new().build();
    let id = spawn_walker(&mut world, Vec2::new(10.0, 10.0), Vec2::new(1.0, 0.0));

    world.tick(1.0);

    let t = world.ecs.get_component::<Transform>(id).expect("transform");
    assert!((t.pos.x - 11.0).abs() < 1e-9);
    assert!((t.pos.y - 10.0).abs() < 1e-9);
    assert!((t.velocity.x - 0.98).abs() < 1e-9);
}

#[test]
fn test_position_clamped_to_world_bounds() {
    let mut world = WorldBuilder::new().with_size(100.0, 50.0).build();
    let east = spawn_walker(&mut world, Vec2::new(95.0, 25.0), Vec2::new(10.0, 0.0));
    let south_west = spawn_walker(&mut world, Vec2::new(2.0, 2.0), Vec2::new(-6.0, -8.0));

    world.tick(1.0);

    let t = world.ecs.get_component::<Transform>(east).expect("transform");
    assert_eq!(t.pos.x, 100.0);
    let t = world
        .ecs
        .get_component::<Transform>(south_west)
        .expect("transform");
    assert_eq!(t.pos.x, 0.0);
    assert_eq!(t.pos.y, 0.0);
}

#[test]
fn test_entity_without_behavior_uses_default_cap() {
    let mut world = WorldBuilder::new()
        .with_config(|c| c.movement.default_max_speed = 5.0)
        .build();
    let id = world.ecs.spawn("Drifter");
    world.ecs.add_component(
        id,
        Transform::moving(Vec2::new(200.0, 200.0), Vec2::new(50.0, 0.0)),
    );

    world.tick(1.0);

    let t = world.ecs.get_component::<Transform>(id).expect("transform");
    assert!((t.pos.x - 205.0).abs() < 1e-9);
    assert!((t.velocity.x - 4.9).abs() < 1e-9);
}

#[test]
fn test_non_positive_dt_moves_nothing() {
    let mut world = WorldBuilder::new().build();
    let id = world.ecs.spawn("Walker");
    world.ecs.add_component(
        id,
        Transform::moving(Vec2::new(50.0, 50.0), Vec2::new(3.0, 4.0)),
    );
    world.ecs.add_component(
        id,
        Behavior {
            state_timer: 100.0,
            ..Behavior::default()
        },
    );

    assert_eq!(world.tick(0.0).moved, 0);
    assert_eq!(world.tick(-1.0).moved, 0);

    let t = world.ecs.get_component::<Transform>(id).expect("transform");
    assert_eq!(t.pos, Vec2::new(50.0, 50.0));
    assert_eq!(t.velocity, Vec2::new(3.0, 4.0));
}

#[test]
fn test_step_uses_fixed_dt() {
    let mut world = WorldBuilder::new()
        .with_config(|c| c.simulation.fixed_dt = 0.5)
        .build();
    let id = world.ecs.spawn("Drifter");
    world
        .ecs
        .add_component(id, Transform::moving(Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0)));

    world.step();

    let t = world.ecs.get_component::<Transform>(id).expect("transform");
    assert!((t.pos.x - 1.0).abs() < 1e-9);
}
