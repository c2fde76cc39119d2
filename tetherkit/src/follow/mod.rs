//! Followers: entities whose transform is derived, every tick,
//! from some leader entity's world pose.

mod binding;
mod follow_system;
mod offset;

pub use self::binding::FollowerBinding;
pub use self::follow_system::FollowSystem;
pub use self::offset::Offset;
