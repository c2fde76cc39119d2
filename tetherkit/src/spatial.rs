use specs::{self, Entity, ReadStorage, WriteStorage};

use crate::transform::Transform;
use crate::types::*;

/// Translation, rotation and scale relative to some parent entity.
///
/// The only exception is a "root" entity, which has no parent,
/// so its local transform is also its world transform. Parents must
/// already exist when a child is created, which keeps the tree acyclic.
pub struct Spatial {
    local_transform: Transform,
    parent_entity: Option<Entity>,
}

impl Spatial {
    pub fn new(parent_entity: Entity, local_transform: Transform) -> Spatial {
        Spatial {
            parent_entity: Some(parent_entity),
            local_transform,
        }
    }

    pub fn new_root(local_transform: Transform) -> Spatial {
        Spatial {
            parent_entity: None,
            local_transform,
        }
    }

    pub fn local_transform(&self) -> Transform {
        self.local_transform
    }

    pub fn set_local_transform(&mut self, new_local_transform: Transform) {
        self.local_transform = new_local_transform;
    }

    pub fn parent_entity(&self) -> Option<Entity> {
        self.parent_entity
    }
}

impl specs::Component for Spatial {
    type Storage = specs::VecStorage<Spatial>;
}

/// World-space queries over a tree of `Spatial`s.
///
/// Every query answers `None` if the entity, or any of its
/// ancestors, is dead or has no `Spatial`.
pub trait SpatialStorage {
    fn depth_of(&self, entity: Entity) -> Option<u32>;
    fn root_of(&self, entity: Entity) -> Option<Entity>;
    fn world_transform_of(&self, entity: Entity) -> Option<Transform>;
    fn lossy_scale_of(&self, entity: Entity) -> Option<Vec3>;
}

// Abstracts over mutability of storages so the same queries work
// from systems that only read `Spatial`s and from those that write them.
pub trait MaybeMutStorage<'a, T> {
    fn get(&self, e: Entity) -> Option<&T>;
}

impl<'a, T> MaybeMutStorage<'a, T> for ReadStorage<'a, T>
where
    T: specs::Component,
{
    fn get(&self, e: Entity) -> Option<&T> {
        (self as &ReadStorage<T>).get(e)
    }
}

impl<'a, T> MaybeMutStorage<'a, T> for WriteStorage<'a, T>
where
    T: specs::Component,
{
    fn get(&self, e: Entity) -> Option<&T> {
        (self as &WriteStorage<T>).get(e)
    }
}

impl<'e, S> SpatialStorage for S
where
    S: MaybeMutStorage<'e, Spatial>,
{
    fn depth_of(&self, entity: Entity) -> Option<u32> {
        let spatial = self.get(entity)?;
        match spatial.parent_entity {
            None => Some(0),
            Some(parent) => self.depth_of(parent).map(|depth| depth + 1),
        }
    }

    fn root_of(&self, entity: Entity) -> Option<Entity> {
        let spatial = self.get(entity)?;
        match spatial.parent_entity {
            None => Some(entity),
            Some(parent) => self.root_of(parent),
        }
    }

    fn world_transform_of(&self, entity: Entity) -> Option<Transform> {
        let spatial = self.get(entity)?;
        match spatial.parent_entity {
            None => Some(spatial.local_transform),
            Some(parent) => {
                let parent_transform = self.world_transform_of(parent)?;
                Some(parent_transform.transform_child(&spatial.local_transform))
            }
        }
    }

    fn lossy_scale_of(&self, entity: Entity) -> Option<Vec3> {
        let spatial = self.get(entity)?;
        let local_scale = spatial.local_transform.scale;
        match spatial.parent_entity {
            None => Some(local_scale),
            Some(parent) => self
                .lossy_scale_of(parent)
                .map(|parent_scale| parent_scale.component_mul(&local_scale)),
        }
    }
}
