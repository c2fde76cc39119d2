extern crate nalgebra as na;
extern crate tetherkit as tk;
#[macro_use]
extern crate slog;
extern crate specs;

mod host;

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;

use tk::app_builder::AppBuilder;
use tk::config::SceneConfig;
use tk::error::ConfigError;

// Hand and two copies of it: one mirrored across the YZ plane,
// one turned around and placed across the room at half size.
const BUILT_IN_SCENE: &str = include_str!("../scenes/hand_and_copies.json");

/// Spin one entity around and watch its linked copies follow it.
#[derive(Parser, Debug)]
#[command(name = "linked-copies")]
struct Args {
    /// Scene description to load instead of the built-in one.
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Name of the entity to move around.
    #[arg(long, default_value = "hand")]
    leader: String,

    /// Number of ticks to simulate.
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Seconds per tick.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f64,

    /// How fast the leader turns, in radians per second.
    #[arg(long, default_value_t = 1.0)]
    spin_rate: f64,
}

fn main() {
    let args = Args::parse();
    if let Err(err) = run(&args) {
        eprintln!("linked-copies: {}", err);
        let mut source = err.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {}", cause);
            source = cause.source();
        }
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), ConfigError> {
    let scene = match args.scene {
        Some(ref path) => SceneConfig::from_path(path)?,
        None => SceneConfig::from_json_str(BUILT_IN_SCENE)?,
    };

    let mut app = AppBuilder::new().with_common_systems().build();
    let log = app.log().new(o!("bin" => "linked-copies"));
    let handles = scene.spawn(app.world_mut())?;
    if handles.is_empty() {
        warn!(log, "Scene has no entities");
    }

    let mut spinner = match handles.get(&args.leader) {
        Some(leader) => host::Spinner::new(app.world(), leader, args.spin_rate),
        None => {
            warn!(log, "No entity with that name; nothing will move"; "leader" => args.leader.as_str());
            None
        }
    };

    app.run_ticks(args.ticks, args.dt, |world, t| {
        if let Some(ref mut spinner) = spinner {
            spinner.drive(world, t);
        }
    });

    host::report_followers(&log, app.world(), &handles);
    Ok(())
}
