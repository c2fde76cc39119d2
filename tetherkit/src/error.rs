use std::io;
use std::path::PathBuf;

use specs::Entity;
use thiserror::Error;

/// Why a follower couldn't be updated this tick.
///
/// Never fatal: the follow system logs it and leaves the
/// follower where it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MissingLeader {
    #[error("binding has no leader")]
    Unbound,
    #[error("leader {0:?} is no longer alive")]
    Dead(Entity),
    #[error("leader {0:?}, or one of its ancestors, has no Spatial")]
    Detached(Entity),
}

/// Problems loading or spawning a scene description.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("couldn't read scene file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed scene description")]
    Json(#[from] serde_json::Error),
    #[error("more than one entity is named {0:?}")]
    DuplicateName(String),
    #[error("entity {entity:?} has parent {parent:?}, which is not declared before it")]
    UnknownParent { entity: String, parent: String },
    #[error("entity {entity:?} follows {leader:?}, which is not in the scene")]
    UnknownLeader { entity: String, leader: String },
    #[error("entity {entity:?} both follows a leader and has a parent; followers must be roots")]
    ParentedFollower { entity: String },
    #[error("entity {entity:?} follows itself")]
    SelfFollow { entity: String },
    #[error("entity {entity:?} has a rotation that isn't a unit quaternion (norm {norm})")]
    DegenerateRotation { entity: String, norm: f64 },
    #[error("couldn't attach components to a freshly spawned entity")]
    Spawn(#[from] specs::error::Error),
}
