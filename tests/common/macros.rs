/// Asserts that the number of live entities matches the expected value.
#[macro_export]
macro_rules! assert_population {
    ($world:expr, $count:expr) => {
        assert_eq!($world.population(), $count, "Population count mismatch");
    };
}

/// Asserts that every component bit of an entity matches storage membership.
#[macro_export]
macro_rules! assert_signature_consistent {
    ($ecs:expr, $id:expr) => {
        assert!(
            $ecs.signature_consistent($id),
            "Entity {} signature {:?} disagrees with component storage",
            $id,
            $ecs.entity($id).map(|r| r.signature())
        );
    };
}

/// Asserts whether a system's interest set contains an entity.
#[macro_export]
macro_rules! assert_interest {
    ($ecs:expr, $system:ty, $id:expr, $expected:expr) => {
        let present = $ecs
            .interest::<$system>()
            .is_some_and(|ids| ids.contains(&$id));
        assert_eq!(
            present,
            $expected,
            "Entity {} interest in {} should be {}",
            $id,
            stringify!($system),
            $expected
        );
    };
}
