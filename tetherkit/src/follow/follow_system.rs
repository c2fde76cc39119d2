use std::fmt::Display;

use slog::Logger;
use specs;
use specs::{Entities, Entity, ReadStorage, WriteStorage};

use super::FollowerBinding;
use crate::name::Name;
use crate::spatial::Spatial;
use crate::transform::Transform;

/// Moves every follower to wherever its binding says it belongs.
///
/// All bindings are resolved against the `Spatial`s as they were at the
/// start of the tick, and only then written back. A follower whose leader
/// is itself a follower therefore lags its leader by a tick, and the order
/// in which Specs happens to visit followers never affects the outcome.
///
/// The result is a world pose, written as the follower's local transform.
/// That only holds for root followers, so a follower with a parent, or one
/// bound to itself, is skipped rather than put somewhere wrong.
pub struct FollowSystem {
    log: Logger,
    // Reused across ticks so steady-state ticks don't allocate.
    pending: Vec<(Entity, Transform)>,
}

impl FollowSystem {
    pub fn new(parent_log: &Logger) -> FollowSystem {
        FollowSystem {
            log: parent_log.new(o!("system" => "follow")),
            pending: Vec::new(),
        }
    }

    fn log_skip<W: Display>(&self, follower: Entity, name: Option<&Name>, why: W) {
        // Followers are best-effort; a lost leader is routine
        // (e.g. a tracked object was just despawned) so don't shout.
        debug!(
            self.log,
            "Leaving follower where it is";
            "follower" => format!("{:?}", follower),
            "name" => name.map(Name::as_str).unwrap_or("<unnamed>"),
            "reason" => %why
        );
    }
}

impl<'a> specs::System<'a> for FollowSystem {
    type SystemData = (
        Entities<'a>,
        ReadStorage<'a, FollowerBinding>,
        ReadStorage<'a, Name>,
        WriteStorage<'a, Spatial>,
    );

    fn run(&mut self, data: Self::SystemData) {
        use specs::Join;

        let (entities, bindings, names, mut spatials) = data;

        self.pending.clear();
        for (follower, binding, spatial) in (&*entities, &bindings, &spatials).join() {
            if spatial.parent_entity().is_some() {
                self.log_skip(follower, names.get(follower), "follower has a parent");
                continue;
            }
            if binding.leader() == Some(follower) {
                self.log_skip(follower, names.get(follower), "follower is bound to itself");
                continue;
            }
            match binding.resolve(&entities, &spatials) {
                Ok(transform) => self.pending.push((follower, transform)),
                Err(why) => self.log_skip(follower, names.get(follower), why),
            }
        }

        for (follower, transform) in self.pending.drain(..) {
            if let Some(spatial) = spatials.get_mut(follower) {
                spatial.set_local_transform(transform);
            }
        }

        trace!(self.log, "Followers updated");
    }
}
