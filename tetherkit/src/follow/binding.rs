use specs::{self, Entities, Entity};

use super::Offset;
use crate::error::MissingLeader;
use crate::spatial::SpatialStorage;
use crate::transform::Transform;

/// Attaches the entity carrying it to a leader entity.
///
/// The leader and offset are fixed when the binding is created.
/// The leader is only a handle; if the leader is deleted, the
/// follower simply stops moving until the binding is removed.
pub struct FollowerBinding {
    leader: Option<Entity>,
    offset: Offset,
}

impl FollowerBinding {
    pub fn new(leader: Entity, offset: Offset) -> FollowerBinding {
        FollowerBinding {
            leader: Some(leader),
            offset,
        }
    }

    /// A binding with nobody to follow. It never updates its follower.
    pub fn unbound(offset: Offset) -> FollowerBinding {
        FollowerBinding {
            leader: None,
            offset,
        }
    }

    pub fn leader(&self) -> Option<Entity> {
        self.leader
    }

    pub fn offset(&self) -> &Offset {
        &self.offset
    }

    /// Compute where the follower belongs right now.
    pub fn resolve<S: SpatialStorage>(
        &self,
        entities: &Entities,
        spatials: &S,
    ) -> Result<Transform, MissingLeader> {
        let leader = self.leader.ok_or(MissingLeader::Unbound)?;
        if !entities.is_alive(leader) {
            return Err(MissingLeader::Dead(leader));
        }
        let leader_transform = spatials
            .world_transform_of(leader)
            .ok_or(MissingLeader::Detached(leader))?;
        Ok(self.offset.apply(&leader_transform))
    }
}

impl specs::Component for FollowerBinding {
    type Storage = specs::VecStorage<FollowerBinding>;
}
