//! Configuration for the planetfall simulation.
//!
//! Settings persist to disk as RON and can be overridden from the command
//! line. Every section tolerates missing and unknown fields so older config
//! files keep loading.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CharacterConfig, Config, DebugConfig, GravityConfig, InputConfig, PlanetConfig,
    SimulationConfig,
};
pub use error::ConfigError;

/// Directory name used under the platform config directory.
pub const CONFIG_DIR_NAME: &str = "planetfall";

/// Resolves the default config directory (`<platform config>/planetfall`).
///
/// Returns `None` when the platform has no notion of a config directory.
pub fn default_config_dir() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME))
}
