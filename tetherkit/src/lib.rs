/*!
# TetherKit

**TetherKit** keeps entities attached to other entities.

A _follower_ entity is bound to a _leader_ entity with a fixed offset (translation,
scale and rotation). Once per simulation tick, the follower's transform is recomputed
from the leader's current world pose and that offset. Nothing accumulates between
ticks, so followers never drift.


## High-level design

TetherKit's architecture is based on the [entity-component system](https://en.wikipedia.org/wiki/Entity%E2%80%93component%E2%80%93system)
pattern, and uses the [Specs](https://slide-rs.github.io/specs/specs/index.html) crate to implement this.

  - [`Spatial`] holds an entity's local transform and an optional parent entity,
    forming a tree whose world poses can be queried through [`SpatialStorage`].
  - [`follow::FollowerBinding`] attaches a follower to a leader; the leader is a plain
    generational [`specs::Entity`] handle, so a destroyed leader is detected rather
    than dereferenced.
  - [`follow::FollowSystem`] evaluates every binding once per tick.
  - [`app::App`] owns the world and the tick loop. The host writes leader poses
    between ticks; TetherKit never polls any input device itself.

The pure math lives in [`transform`]; everything else is plumbing around it.
*/

extern crate nalgebra as na;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate slog;
extern crate slog_async;
extern crate slog_term;
extern crate specs;
#[cfg(test)]
#[macro_use]
extern crate approx;

pub mod app;
pub mod app_builder;
pub mod config;
pub mod error;
pub mod follow;
pub mod name;
pub mod transform;
pub mod types;

mod log_resource;
mod spatial;

pub use crate::log_resource::LogResource;
pub use crate::name::Name;
pub use crate::spatial::{Spatial, SpatialStorage};
pub use crate::transform::{compose, Transform};

#[cfg(test)]
mod integration_tests;
