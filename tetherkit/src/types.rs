use crate::na;

// Common types for all of TetherKit.
//
// Everything is `f64`; a follower chain can be several
// compositions deep and the extra precision keeps
// copies from visibly wobbling far from the origin.
pub type Real = f64;

pub type Vec3 = na::Vector3<Real>;
pub type Pt3 = na::Point3<Real>;
pub type Quat = na::Quaternion<Real>;
pub type UnitQuat = na::UnitQuaternion<Real>;

pub type TimeDelta = f64;
