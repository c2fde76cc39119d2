//! The part a game engine would normally play: moving the leader
//! around between ticks, and looking at where everything ended up.

use slog::Logger;
use specs::{Entity, World, WorldExt};

use crate::na;
use tk::config::SceneHandles;
use tk::follow::FollowerBinding;
use tk::types::*;
use tk::{Spatial, SpatialStorage, Transform};

/// Turns an entity about its local Y axis and bobs it up and down,
/// starting from wherever the scene put it.
pub struct Spinner {
    entity: Entity,
    rest: Transform,
    rate: Real,
}

impl Spinner {
    pub fn new(world: &World, entity: Entity, rate: Real) -> Option<Spinner> {
        let spatials = world.read_storage::<Spatial>();
        spatials.get(entity).map(|spatial| Spinner {
            entity,
            rest: spatial.local_transform(),
            rate,
        })
    }

    pub fn drive(&mut self, world: &mut World, t: TimeDelta) {
        let angle = self.rate * t;
        let turn = UnitQuat::from_axis_angle(&Vec3::y_axis(), angle);
        let bob = Vec3::new(0.0, 0.25 * angle.sin(), 0.0);
        let pose = Transform::new(self.rest.position + bob, turn * self.rest.rotation, self.rest.scale);

        let mut spatials = world.write_storage::<Spatial>();
        if let Some(spatial) = spatials.get_mut(self.entity) {
            spatial.set_local_transform(pose);
        }
    }
}

/// Log the world pose of every follower in the scene, in name order.
pub fn report_followers(log: &Logger, world: &World, handles: &SceneHandles) {
    let bindings = world.read_storage::<FollowerBinding>();
    let spatials = world.read_storage::<Spatial>();

    let mut followers: Vec<(&str, Entity)> = handles
        .iter()
        .filter(|&(_, entity)| bindings.get(entity).is_some())
        .collect();
    followers.sort_by_key(|&(name, _)| name);

    for (name, entity) in followers {
        let leader = bindings.get(entity).and_then(FollowerBinding::leader);
        let transform = match spatials.world_transform_of(entity) {
            Some(transform) => transform,
            None => {
                warn!(log, "Follower has no world pose"; "name" => name);
                continue;
            }
        };
        let (roll, pitch, yaw) = transform.rotation.euler_angles();
        info!(
            log,
            "Follower pose";
            "name" => name,
            "leader" => format!("{:?}", leader),
            "position" => format!("{:.3?}", na::Point3::from(transform.position)),
            "rotation_deg" => format!(
                "({:.1}, {:.1}, {:.1})",
                roll.to_degrees(),
                pitch.to_degrees(),
                yaw.to_degrees()
            ),
            "scale" => format!("{:.3?}", transform.scale)
        );
    }
}
