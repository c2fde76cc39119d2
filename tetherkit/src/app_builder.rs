use slog;
use slog_async;
use slog_term;
use specs::{self, World, WorldExt};

use crate::app::App;
use crate::follow;

/// Builder for [`App`].
///
/// Contains some optional convenience functions for adding
/// commonly used systems.
#[must_use]
pub struct AppBuilder {
    root_log: slog::Logger,
    world: World,
    dispatcher_builder: specs::DispatcherBuilder<'static, 'static>,
}

impl AppBuilder {
    /// Log to the terminal.
    pub fn new() -> AppBuilder {
        use slog::Drain;

        let decorator = slog_term::TermDecorator::new().build();
        let drain = slog_term::FullFormat::new(decorator).build().fuse();
        let drain = slog_async::Async::new(drain).build().fuse();
        let root_log = slog::Logger::root(drain, o!("tk_version" => env!("CARGO_PKG_VERSION")));
        AppBuilder::with_logger(root_log)
    }

    /// Log wherever `root_log` does; e.g. `slog::Discard` in tests.
    pub fn with_logger(root_log: slog::Logger) -> AppBuilder {
        use crate::LogResource;

        // Create world and register all component types.
        let mut world = World::new();
        world.register::<crate::Spatial>();
        world.register::<crate::Name>();
        world.register::<follow::FollowerBinding>();

        // Initialize resources that can't implement `Default`.
        world.insert(LogResource::new(&root_log));

        AppBuilder {
            root_log,
            world,
            dispatcher_builder: specs::DispatcherBuilder::new(),
        }
    }

    pub fn build(self) -> App {
        App::new(&self.root_log, self.world, self.dispatcher_builder)
    }

    pub fn with_systems<F: AddSystemsFn<'static, 'static>>(mut self, add_systems_fn: F) -> Self {
        self.dispatcher_builder =
            add_systems_fn(&self.root_log, &mut self.world, self.dispatcher_builder);
        self
    }

    /// Add the systems nearly everyone wants: currently just the follow system.
    ///
    /// Anything added afterwards with `with_systems` that should see
    /// followers in their updated positions needs to depend on `"follow"`.
    pub fn with_common_systems(self) -> Self {
        let follow_sys = follow::FollowSystem::new(&self.root_log);

        self.with_systems(
            |_logger: &slog::Logger,
             _world: &mut World,
             dispatcher_builder: specs::DispatcherBuilder<'static, 'static>| {
                dispatcher_builder.with(follow_sys, "follow", &[])
            },
        )
    }
}

pub trait AddSystemsFn<'a, 'b>:
    FnOnce(&slog::Logger, &mut World, specs::DispatcherBuilder<'a, 'b>) -> specs::DispatcherBuilder<'a, 'b>
{
}

impl<'a, 'b, F> AddSystemsFn<'a, 'b> for F where
    F: FnOnce(
        &slog::Logger,
        &mut World,
        specs::DispatcherBuilder<'a, 'b>,
    ) -> specs::DispatcherBuilder<'a, 'b>
{
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}
