//! Scene descriptions: entities, their hierarchy, and who follows whom,
//! loaded from JSON.
//!
//! ```json
//! {
//!     "entities": [
//!         { "name": "hand", "transform": { "position": [0.0, 1.2, 0.3] } },
//!         {
//!             "name": "mirror_hand",
//!             "follow": { "leader": "hand", "scale": [-1.0, 1.0, 1.0] }
//!         }
//!     ]
//! }
//! ```
//!
//! Rotations are written `[x, y, z, w]`. Anything left out
//! defaults to the identity.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use slog::Logger;
use specs::{Builder, Entity, World, WorldExt};

use crate::error::ConfigError;
use crate::follow::{FollowerBinding, Offset};
use crate::name::Name;
use crate::spatial::Spatial;
use crate::transform::Transform;
use crate::types::*;
use crate::LogResource;

// How far a configured quaternion's norm may stray from 1.
const UNIT_NORM_TOLERANCE: Real = 1.0e-6;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SceneConfig {
    pub entities: Vec<EntityConfig>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EntityConfig {
    pub name: String,
    /// Must name an entity declared earlier in the scene.
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub transform: TransformConfig,
    /// May name any other entity in the scene. An entity that
    /// follows must not have a parent.
    #[serde(default)]
    pub follow: Option<FollowConfig>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TransformConfig {
    #[serde(default = "zero")]
    pub position: [Real; 3],
    #[serde(default = "no_rotation")]
    pub rotation: [Real; 4],
    #[serde(default = "unit_scale")]
    pub scale: [Real; 3],
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FollowConfig {
    pub leader: String,
    #[serde(default = "zero")]
    pub translation: [Real; 3],
    #[serde(default = "unit_scale")]
    pub scale: [Real; 3],
    #[serde(default = "no_rotation")]
    pub rotation: [Real; 4],
}

fn zero() -> [Real; 3] {
    [0.0; 3]
}

fn unit_scale() -> [Real; 3] {
    [1.0; 3]
}

fn no_rotation() -> [Real; 4] {
    [0.0, 0.0, 0.0, 1.0]
}

impl Default for TransformConfig {
    fn default() -> TransformConfig {
        TransformConfig {
            position: zero(),
            rotation: no_rotation(),
            scale: unit_scale(),
        }
    }
}

fn vec3(v: &[Real; 3]) -> Vec3 {
    Vec3::new(v[0], v[1], v[2])
}

fn unit_quat(entity: &str, xyzw: &[Real; 4]) -> Result<UnitQuat, ConfigError> {
    let quat = Quat::new(xyzw[3], xyzw[0], xyzw[1], xyzw[2]);
    let norm = quat.norm();
    if !norm.is_finite() || (norm - 1.0).abs() > UNIT_NORM_TOLERANCE {
        return Err(ConfigError::DegenerateRotation {
            entity: entity.to_string(),
            norm,
        });
    }
    // Close enough to unit to accept; snap the last few ulps.
    Ok(UnitQuat::new_normalize(quat))
}

impl TransformConfig {
    fn to_transform(&self, entity: &str) -> Result<Transform, ConfigError> {
        Ok(Transform::new(
            vec3(&self.position),
            unit_quat(entity, &self.rotation)?,
            vec3(&self.scale),
        ))
    }
}

impl FollowConfig {
    fn to_offset(&self, entity: &str) -> Result<Offset, ConfigError> {
        Ok(Offset::new(
            vec3(&self.translation),
            vec3(&self.scale),
            unit_quat(entity, &self.rotation)?,
        ))
    }
}

/// Entities created by [`SceneConfig::spawn`], by name.
#[derive(Debug, Default, Clone)]
pub struct SceneHandles {
    entities: HashMap<String, Entity>,
}

impl SceneHandles {
    pub fn get(&self, name: &str) -> Option<Entity> {
        self.entities.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Entity)> {
        self.entities.iter().map(|(name, entity)| (name.as_str(), *entity))
    }
}

// Everything needed to create one entity, checked up front so a bad
// scene never leaves half its entities behind.
struct Prepared<'c> {
    name: &'c str,
    parent: Option<usize>,
    transform: Transform,
    follow: Option<(usize, Offset)>,
}

impl SceneConfig {
    pub fn from_json_str(json: &str) -> Result<SceneConfig, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<SceneConfig, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        SceneConfig::from_json_str(&json)
    }

    fn prepare(&self) -> Result<Vec<Prepared<'_>>, ConfigError> {
        let mut index_of: HashMap<&str, usize> = HashMap::with_capacity(self.entities.len());
        for (i, entity) in self.entities.iter().enumerate() {
            if index_of.insert(entity.name.as_str(), i).is_some() {
                return Err(ConfigError::DuplicateName(entity.name.clone()));
            }
        }

        self.entities
            .iter()
            .enumerate()
            .map(|(i, entity)| {
                let parent = match entity.parent {
                    None => None,
                    Some(ref parent) => match index_of.get(parent.as_str()) {
                        Some(&parent_i) if parent_i < i => Some(parent_i),
                        _ => {
                            return Err(ConfigError::UnknownParent {
                                entity: entity.name.clone(),
                                parent: parent.clone(),
                            })
                        }
                    },
                };
                let follow = match entity.follow {
                    None => None,
                    Some(ref follow) => {
                        let leader_i = index_of.get(follow.leader.as_str()).cloned().ok_or_else(|| {
                            ConfigError::UnknownLeader {
                                entity: entity.name.clone(),
                                leader: follow.leader.clone(),
                            }
                        })?;
                        if leader_i == i {
                            return Err(ConfigError::SelfFollow {
                                entity: entity.name.clone(),
                            });
                        }
                        if entity.parent.is_some() {
                            return Err(ConfigError::ParentedFollower {
                                entity: entity.name.clone(),
                            });
                        }
                        Some((leader_i, follow.to_offset(&entity.name)?))
                    }
                };
                Ok(Prepared {
                    name: &entity.name,
                    parent,
                    transform: entity.transform.to_transform(&entity.name)?,
                    follow,
                })
            })
            .collect()
    }

    /// Create every entity in the scene.
    ///
    /// Nothing is created unless the whole scene is valid.
    pub fn spawn(&self, world: &mut World) -> Result<SceneHandles, ConfigError> {
        let prepared = self.prepare()?;

        let log = match world.try_fetch::<LogResource>() {
            Some(log_resource) => log_resource.log.new(o!("scene_entities" => prepared.len())),
            None => Logger::root(slog::Discard, o!()),
        };

        let mut entities: Vec<Entity> = Vec::with_capacity(prepared.len());
        for p in &prepared {
            let spatial = match p.parent {
                // Parents always come first, so they're already in `entities`.
                Some(parent_i) => Spatial::new(entities[parent_i], p.transform),
                None => Spatial::new_root(p.transform),
            };
            let entity = world
                .create_entity()
                .with(spatial)
                .with(Name::new(p.name))
                .build();
            entities.push(entity);
        }

        // Leaders may be declared after their followers, so bind in a second pass.
        {
            let mut bindings = world.write_storage::<FollowerBinding>();
            for (p, &entity) in prepared.iter().zip(&entities) {
                if let Some((leader_i, offset)) = p.follow {
                    bindings.insert(entity, FollowerBinding::new(entities[leader_i], offset))?;
                    debug!(log, "Bound follower"; "follower" => p.name, "leader" => prepared[leader_i].name);
                }
            }
        }

        info!(log, "Spawned scene");

        Ok(SceneHandles {
            entities: prepared
                .iter()
                .zip(entities)
                .map(|(p, entity)| (p.name.to_string(), entity))
                .collect(),
        })
    }
}
