//! Headless planetfall simulation.
//!
//! Drops a character onto a spherical planet and drives it with scripted
//! input for a fixed number of ticks, logging its state as it goes.
//! Configuration is loaded from `config.ron` and can be overridden via CLI
//! flags, e.g. `planetfall --ticks 1200 --gravity-look false`.

mod script;
mod simulation;

use std::path::PathBuf;

use clap::Parser;
use planetfall_config::{CONFIG_DIR_NAME, CliArgs, Config, default_config_dir};
use tracing::info;

use crate::simulation::Simulation;

fn main() {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = args
        .config
        .clone()
        .or_else(default_config_dir)
        .unwrap_or_else(|| PathBuf::from(CONFIG_DIR_NAME));

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    planetfall_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    info!(
        ticks = config.simulation.ticks,
        tick_rate_hz = config.simulation.tick_rate_hz,
        relative_look = config.gravity.use_gravity_relative_look,
        "starting planetfall"
    );

    let mut simulation = Simulation::new(&config);
    simulation.run(config.simulation.ticks);

    match simulation.snapshot() {
        Some(state) => info!(
            ticks = simulation.tick(),
            position = ?state.position,
            altitude = state.altitude,
            mode = ?state.mode,
            "simulation finished"
        ),
        None => info!(ticks = simulation.tick(), "simulation finished"),
    }
}
