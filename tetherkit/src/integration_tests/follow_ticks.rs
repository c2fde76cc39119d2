use std::f64::consts::FRAC_PI_2;

use slog;
use specs::{Builder, Entity, World, WorldExt};

use crate::app::App;
use crate::app_builder::AppBuilder;
use crate::follow::{FollowerBinding, Offset};
use crate::types::*;
use crate::{Name, Spatial, SpatialStorage, Transform};

// A headless app with a leader and whatever followers a test adds.
struct Stage {
    app: App,
    leader: Entity,
}

impl Stage {
    fn new(leader_transform: Transform) -> Stage {
        // Log to nowhere.
        let drain = slog::Discard;
        let root_log = slog::Logger::root(drain, o!("tk_version" => env!("CARGO_PKG_VERSION")));

        let mut app = AppBuilder::with_logger(root_log)
            .with_common_systems()
            .build();
        let leader = app
            .world_mut()
            .create_entity()
            .with(Spatial::new_root(leader_transform))
            .with(Name::new("leader"))
            .build();
        Stage { app, leader }
    }

    fn add_follower(&mut self, leader: Entity, offset: Offset, start: Transform) -> Entity {
        self.app
            .world_mut()
            .create_entity()
            .with(Spatial::new_root(start))
            .with(FollowerBinding::new(leader, offset))
            .build()
    }

    fn local_transform(&self, entity: Entity) -> Transform {
        self.app
            .world()
            .read_storage::<Spatial>()
            .get(entity)
            .expect("Entity should still have a Spatial")
            .local_transform()
    }

    fn set_local_transform(world: &mut World, entity: Entity, transform: Transform) {
        world
            .write_storage::<Spatial>()
            .get_mut(entity)
            .expect("Entity should still have a Spatial")
            .set_local_transform(transform);
    }
}

#[test]
fn follower_mirrors_leader_with_identity_offset() {
    let quarter_y = UnitQuat::from_axis_angle(&Vec3::y_axis(), FRAC_PI_2);
    let leader_transform = Transform::new(Vec3::new(1.0, 2.0, 3.0), quarter_y, Vec3::repeat(1.0));
    let mut stage = Stage::new(leader_transform);
    let leader = stage.leader;
    let follower = stage.add_follower(leader, Offset::identity(), Transform::identity());

    stage.app.tick(0.1);

    assert_eq!(stage.local_transform(follower), leader_transform);
    assert_eq!(stage.app.ticks(), 1);
}

#[test]
fn follower_tracks_a_moving_leader() {
    let mut stage = Stage::new(Transform::identity());
    let leader = stage.leader;
    let offset = Offset::new(
        Vec3::new(0.0, 0.0, 10.0),
        Vec3::new(-1.0, 1.0, 1.0),
        UnitQuat::identity(),
    );
    let follower = stage.add_follower(leader, offset, Transform::identity());

    stage.app.run_ticks(10, 0.1, |world, t| {
        Stage::set_local_transform(world, leader, Transform::from_position(Vec3::new(t, 0.0, 0.0)));
    });

    // The last pose the host wrote was at t = 0.9; mirrored in X.
    let follower_transform = stage.local_transform(follower);
    assert_relative_eq!(follower_transform.position, Vec3::new(-0.9, 0.0, 10.0), epsilon = 1e-9);
    assert_relative_eq!(follower_transform.scale, Vec3::new(-1.0, 1.0, 1.0));
    assert_relative_eq!(stage.app.elapsed(), 1.0, epsilon = 1e-9);
}

#[test]
fn follower_stays_put_when_leader_is_deleted() {
    let mut stage = Stage::new(Transform::from_position(Vec3::new(5.0, 0.0, 0.0)));
    let leader = stage.leader;
    let follower = stage.add_follower(leader, Offset::identity(), Transform::identity());

    stage.app.tick(0.1);
    let before = stage.local_transform(follower);
    assert_relative_eq!(before.position, Vec3::new(5.0, 0.0, 0.0));

    stage.app.world_mut().delete_entity(leader).unwrap();
    stage.app.tick(0.1);
    stage.app.tick(0.1);

    assert_eq!(stage.local_transform(follower), before);
}

#[test]
fn unbound_follower_is_never_moved() {
    let mut stage = Stage::new(Transform::from_position(Vec3::new(5.0, 0.0, 0.0)));
    let start = Transform::from_position(Vec3::new(-3.0, 4.0, 0.0));
    let follower = stage
        .app
        .world_mut()
        .create_entity()
        .with(Spatial::new_root(start))
        .with(FollowerBinding::unbound(Offset::identity()))
        .build();

    stage.app.run_ticks(5, 0.1, |_, _| {});

    assert_eq!(stage.local_transform(follower), start);
}

#[test]
fn follower_uses_leader_world_pose_and_lossy_scale() {
    let mut stage = Stage::new(Transform::identity().with_scale(Vec3::repeat(3.0)));
    let parent = stage.leader;
    let child = stage
        .app
        .world_mut()
        .create_entity()
        .with(Spatial::new(parent, Transform::from_position(Vec3::new(0.0, 1.0, 0.0))))
        .build();
    let follower = stage.add_follower(child, Offset::identity(), Transform::identity());

    stage.app.tick(0.1);

    let follower_transform = stage.local_transform(follower);
    let child_world = stage
        .app
        .world()
        .read_storage::<Spatial>()
        .world_transform_of(child)
        .unwrap();
    assert_relative_eq!(follower_transform.position, Vec3::new(0.0, 3.0, 0.0));
    assert_relative_eq!(follower_transform.scale, Vec3::repeat(3.0));
    assert_eq!(follower_transform, child_world);
}

#[test]
fn chained_followers_lag_one_tick_per_link() {
    let mut stage = Stage::new(Transform::identity());
    let leader = stage.leader;
    let step = Offset::new(Vec3::new(1.0, 0.0, 0.0), Vec3::repeat(1.0), UnitQuat::identity());
    let first = stage.add_follower(leader, step, Transform::identity());
    let second = stage.add_follower(first, step, Transform::identity());

    // Everything is resolved against the start-of-tick poses, so after
    // one tick the second link has only seen the first link's old pose.
    stage.app.tick(0.1);
    assert_relative_eq!(stage.local_transform(first).position, Vec3::new(1.0, 0.0, 0.0));
    assert_relative_eq!(stage.local_transform(second).position, Vec3::new(1.0, 0.0, 0.0));

    stage.app.tick(0.1);
    assert_relative_eq!(stage.local_transform(second).position, Vec3::new(2.0, 0.0, 0.0));
}

#[test]
fn mutually_bound_followers_swap_each_tick() {
    // Two followers that follow each other: with a snapshot per tick
    // they swap poses every tick, regardless of visiting order.
    let mut stage = Stage::new(Transform::identity());
    let a_start = Transform::from_position(Vec3::new(1.0, 0.0, 0.0));
    let b_start = Transform::from_position(Vec3::new(0.0, 1.0, 0.0));
    let a = stage
        .app
        .world_mut()
        .create_entity()
        .with(Spatial::new_root(a_start))
        .build();
    let b = stage.add_follower(a, Offset::identity(), b_start);
    stage
        .app
        .world_mut()
        .write_storage::<FollowerBinding>()
        .insert(a, FollowerBinding::new(b, Offset::identity()))
        .unwrap();

    stage.app.tick(0.1);
    assert_eq!(stage.local_transform(a), b_start);
    assert_eq!(stage.local_transform(b), a_start);

    stage.app.tick(0.1);
    assert_eq!(stage.local_transform(a), a_start);
    assert_eq!(stage.local_transform(b), b_start);
}

#[test]
fn parented_follower_is_left_alone() {
    let mut stage = Stage::new(Transform::from_position(Vec3::new(1.0, 2.0, 3.0)));
    let leader = stage.leader;
    let rig = stage
        .app
        .world_mut()
        .create_entity()
        .with(Spatial::new_root(Transform::from_position(Vec3::new(10.0, 0.0, 0.0))))
        .build();
    let start = Transform::from_position(Vec3::new(0.0, 0.0, -1.0));
    let copy = stage
        .app
        .world_mut()
        .create_entity()
        .with(Spatial::new(rig, start))
        .with(FollowerBinding::new(leader, Offset::identity()))
        .build();

    stage.app.tick(0.1);

    // Writing the leader's pose into a parented local transform would
    // land it at (11, 2, 3); it must not be moved at all.
    assert_eq!(stage.local_transform(copy), start);
    let copy_world = stage
        .app
        .world()
        .read_storage::<Spatial>()
        .world_transform_of(copy)
        .unwrap();
    assert_relative_eq!(copy_world.position, Vec3::new(10.0, 0.0, -1.0));
}

#[test]
fn self_bound_follower_does_not_accumulate() {
    let mut stage = Stage::new(Transform::identity());
    let start = Transform::from_position(Vec3::new(0.0, 0.0, 0.0));
    let a = stage
        .app
        .world_mut()
        .create_entity()
        .with(Spatial::new_root(start))
        .build();
    let step = Offset::new(Vec3::new(1.0, 0.0, 0.0), Vec3::repeat(1.0), UnitQuat::identity());
    stage
        .app
        .world_mut()
        .write_storage::<FollowerBinding>()
        .insert(a, FollowerBinding::new(a, step))
        .unwrap();

    stage.app.run_ticks(5, 0.1, |_, _| {});

    assert_eq!(stage.local_transform(a), start);
}
