//! Command-line argument parsing for the planetfall simulation.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Planetfall command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "planetfall", about = "Planet-relative gravity simulation")]
pub struct CliArgs {
    /// Number of ticks to simulate.
    #[arg(long)]
    pub ticks: Option<u32>,

    /// Simulation tick rate in Hz.
    #[arg(long)]
    pub tick_rate: Option<u32>,

    /// Body alignment interpolation speed.
    #[arg(long)]
    pub align_speed: Option<f32>,

    /// Maximum look pitch in degrees.
    #[arg(long)]
    pub max_pitch: Option<f32>,

    /// Use gravity-relative look (false falls back to flat yaw/pitch).
    #[arg(long)]
    pub gravity_look: Option<bool>,

    /// Leave the planet untagged so the shape heuristic has to find it.
    #[arg(long)]
    pub untagged_planet: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ticks) = args.ticks {
            self.simulation.ticks = ticks;
        }
        if let Some(rate) = args.tick_rate {
            self.simulation.tick_rate_hz = rate;
        }
        if let Some(speed) = args.align_speed {
            self.gravity.align_interp_speed = speed;
        }
        if let Some(pitch) = args.max_pitch {
            self.gravity.max_look_pitch_degrees = pitch;
        }
        if let Some(look) = args.gravity_look {
            self.gravity.use_gravity_relative_look = look;
        }
        if args.untagged_planet {
            self.planet.tagged = false;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
