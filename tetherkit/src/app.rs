use slog::Logger;
use specs::{self, World, WorldExt};

use crate::types::*;

/// Owns the world and drives the simulation loop.
///
/// There is no window and no input handling: the host decides when
/// to tick, and writes leader poses into the world between ticks.
pub struct App {
    t: TimeDelta,
    ticks: u64,
    log: Logger,
    world: World,
    dispatcher: specs::Dispatcher<'static, 'static>,
}

impl App {
    // Add all your systems before passing the dispatcher in.
    pub fn new(
        parent_log: &Logger,
        mut world: World,
        dispatcher_builder: specs::DispatcherBuilder<'static, 'static>,
    ) -> App {
        let log = parent_log.new(o!());

        let mut dispatcher = dispatcher_builder.build();
        // Callers may poke components into the world before the
        // first tick, so ensure all storages and resources exist.
        dispatcher.setup(&mut world);

        App {
            t: 0.0,
            ticks: 0,
            log,
            world,
            dispatcher,
        }
    }

    /// Advance the simulation by one tick of `dt` seconds.
    pub fn tick(&mut self, dt: TimeDelta) {
        self.t += dt;
        self.ticks += 1;

        self.dispatcher.dispatch(&self.world);
        self.world.maintain();
    }

    /// Run `ticks` ticks, calling `host` before each one so it can
    /// feed in fresh leader poses (or delete things, or anything else).
    ///
    /// `host` is given the simulation time at the start of the tick.
    pub fn run_ticks<F>(&mut self, ticks: u64, dt: TimeDelta, mut host: F)
    where
        F: FnMut(&mut World, TimeDelta),
    {
        info!(self.log, "Running ticks"; "ticks" => ticks, "dt" => dt);
        for _ in 0..ticks {
            host(&mut self.world, self.t);
            self.tick(dt);
        }
        debug!(self.log, "Finished running ticks"; "elapsed" => self.t, "total_ticks" => self.ticks);
    }

    /// Simulation time that has passed, in seconds.
    pub fn elapsed(&self) -> TimeDelta {
        self.t
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn log(&self) -> &Logger {
        &self.log
    }
}

impl<'a> App {
    pub fn world(&'a self) -> &'a World {
        &self.world
    }

    pub fn world_mut(&'a mut self) -> &'a mut World {
        &mut self.world
    }
}
