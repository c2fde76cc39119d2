//! Rigid-plus-scale poses and the composition used to derive
//! a follower's pose from its leader's.

use crate::types::*;

/// Position, orientation and (possibly non-uniform) scale.
///
/// Whether the fields are in world space or relative to some
/// parent depends on where the `Transform` came from; see
/// [`Spatial`](crate::Spatial) and
/// [`SpatialStorage::world_transform_of`](crate::SpatialStorage::world_transform_of).
///
/// Scale factors should be positive. Nothing here ever inverts
/// a transform, so zero or negative scale is tolerated, but it
/// won't round-trip through anything that does.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: UnitQuat,
    pub scale: Vec3,
}

impl Transform {
    pub fn new(position: Vec3, rotation: UnitQuat, scale: Vec3) -> Transform {
        Transform {
            position,
            rotation,
            scale,
        }
    }

    pub fn identity() -> Transform {
        Transform {
            position: Vec3::zeros(),
            rotation: UnitQuat::identity(),
            scale: Vec3::repeat(1.0),
        }
    }

    pub fn from_position(position: Vec3) -> Transform {
        Transform {
            position,
            ..Transform::identity()
        }
    }

    pub fn with_rotation(self, rotation: UnitQuat) -> Transform {
        Transform { rotation, ..self }
    }

    pub fn with_scale(self, scale: Vec3) -> Transform {
        Transform { scale, ..self }
    }

    /// Map a point expressed in this transform's local frame
    /// into the frame this transform is expressed in.
    pub fn transform_point(&self, point: &Pt3) -> Pt3 {
        Pt3::from(self.rotation * point.coords.component_mul(&self.scale) + self.position)
    }

    /// Express `local`, given relative to this transform, in the
    /// frame this transform is expressed in.
    ///
    /// Scale is combined component-wise, which is only exact when
    /// this transform's rotation is aligned with the axes of any
    /// non-uniform scale. The result's `scale` is therefore the
    /// "lossy" scale of the child.
    pub fn transform_child(&self, local: &Transform) -> Transform {
        Transform {
            position: self.transform_point(&Pt3::from(local.position)).coords,
            rotation: self.rotation * local.rotation,
            scale: self.scale.component_mul(&local.scale),
        }
    }
}

impl Default for Transform {
    fn default() -> Transform {
        Transform::identity()
    }
}

/// Derive a follower's pose from its leader's world pose and a fixed offset.
///
/// `leader.scale` must be the leader's lossy (world-space) scale.
///
/// The leader's position is scaled by `offset_scale`, rotated by
/// `offset_rotation`, then translated by `offset_translation`. The
/// resulting rotation is `offset_rotation * leader.rotation`; quaternion
/// multiplication doesn't commute, so that order is significant.
///
/// `offset_rotation` is trusted to be normalized. This runs for every
/// follower on every tick, so it doesn't re-check.
#[inline]
pub fn compose(
    leader: &Transform,
    offset_translation: &Vec3,
    offset_scale: &Vec3,
    offset_rotation: &UnitQuat,
) -> Transform {
    let scaled_leader_position = leader.position.component_mul(offset_scale);
    Transform {
        position: offset_rotation * scaled_leader_position + offset_translation,
        rotation: offset_rotation * leader.rotation,
        scale: leader.scale.component_mul(offset_scale),
    }
}
