use crate::transform::{compose, Transform};
use crate::types::*;

/// Fixed translation, scale and rotation between a leader
/// and its follower.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Offset {
    translation: Vec3,
    scale: Vec3,
    rotation: UnitQuat,
}

impl Offset {
    pub fn new(translation: Vec3, scale: Vec3, rotation: UnitQuat) -> Offset {
        Offset {
            translation,
            scale,
            rotation,
        }
    }

    /// Follower exactly mirrors its leader.
    pub fn identity() -> Offset {
        Offset::new(Vec3::zeros(), Vec3::repeat(1.0), UnitQuat::identity())
    }

    /// Build an offset from a raw quaternion that the caller
    /// promises is already normalized.
    ///
    /// Checked in debug builds only; `compose` never re-checks.
    pub fn from_quaternion(translation: Vec3, scale: Vec3, rotation: Quat) -> Offset {
        debug_assert!(
            (rotation.norm() - 1.0).abs() < 1.0e-6,
            "offset rotation must be a unit quaternion; norm was {}",
            rotation.norm()
        );
        Offset::new(translation, scale, UnitQuat::new_unchecked(rotation))
    }

    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn rotation(&self) -> UnitQuat {
        self.rotation
    }

    /// Where a follower belongs, given its leader's world transform
    /// (including its lossy scale).
    #[inline]
    pub fn apply(&self, leader: &Transform) -> Transform {
        compose(leader, &self.translation, &self.scale, &self.rotation)
    }
}

impl Default for Offset {
    fn default() -> Offset {
        Offset::identity()
    }
}
