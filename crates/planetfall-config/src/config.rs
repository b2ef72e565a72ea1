//! Configuration structs with sensible defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level simulation configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Fixed-tick settings.
    pub simulation: SimulationConfig,
    /// Planet gravity and orientation settings.
    pub gravity: GravityConfig,
    /// Controlled character settings.
    pub character: CharacterConfig,
    /// Planet spawned by the simulation.
    pub planet: PlanetConfig,
    /// Input settings.
    pub input: InputConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Fixed-tick configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Simulation ticks per second.
    pub tick_rate_hz: u32,
    /// Number of ticks a headless run executes before exiting.
    pub ticks: u32,
}

/// Gravity alignment, look and ground-recovery settings for one controlled body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GravityConfig {
    /// Rotate the body so its up axis opposes gravity.
    pub align_enabled: bool,
    /// Alignment smoothing rate. Higher is snappier.
    pub align_interp_speed: f32,
    /// Track look as yaw/pitch relative to the local up vector.
    pub use_gravity_relative_look: bool,
    /// Maximum look pitch above or below the local horizon, in degrees.
    pub max_look_pitch_degrees: f32,
    /// Length of the ground-recovery probe below the body, in world units.
    pub ground_probe_length: f32,
    /// Speed away from the surface (world units/s) above which ground
    /// recovery is not attempted.
    pub ascend_speed_threshold: f32,
}

/// Controlled character configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CharacterConfig {
    /// Capsule half height, origin to lower extent.
    pub capsule_half_height: f32,
    /// Capsule radius.
    pub capsule_radius: f32,
    /// Gravity acceleration applied while falling, in world units/s².
    pub gravity_acceleration: f32,
    /// Walk speed in world units/s.
    pub walk_speed: f32,
    /// Spawn height of the character origin above the planet surface.
    pub spawn_altitude: f32,
}

/// Planet configuration for the simulated world.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlanetConfig {
    /// Planet radius in world units.
    pub radius: f32,
    /// Tag the planet as an explicit gravity source. When false the
    /// selector has to find it through the shape heuristic.
    pub tagged: bool,
}

/// Input configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Degrees of look per unit of mouse delta.
    pub mouse_sensitivity: f32,
    /// Invert Y axis for look pitch.
    pub invert_y: bool,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Emit a state summary every N ticks (0 disables).
    pub report_interval_ticks: u32,
}

// --- Default implementations ---

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: 60,
            ticks: 600,
        }
    }
}

impl Default for GravityConfig {
    fn default() -> Self {
        Self {
            align_enabled: true,
            align_interp_speed: 25.0,
            use_gravity_relative_look: true,
            max_look_pitch_degrees: 85.0,
            ground_probe_length: 15.0,
            ascend_speed_threshold: 10.0,
        }
    }
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            capsule_half_height: 96.0,
            capsule_radius: 42.0,
            gravity_acceleration: 980.0,
            walk_speed: 600.0,
            spawn_altitude: 400.0,
        }
    }
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            radius: 5000.0,
            tagged: true,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 0.5,
            invert_y: false,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            report_interval_ticks: 60,
        }
    }
}

impl SimulationConfig {
    /// Fixed timestep in seconds derived from the tick rate.
    pub fn delta_seconds(&self) -> f32 {
        1.0 / self.tick_rate_hz.max(1) as f32
    }
}

// --- Load / Save / Reload ---

fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let config = read_config(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        let config_path = config_dir.join("config.ron");
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Encode)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::Write {
            path: config_path,
            source,
        })?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let new_config = read_config(&config_path)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("align_interp_speed: 25.0"));
        assert!(ron_str.contains("tick_rate_hz: 60"));
    }

    #[test]
    fn test_gravity_defaults() {
        let gravity = GravityConfig::default();
        assert!(gravity.align_enabled);
        assert!(gravity.use_gravity_relative_look);
        assert_eq!(gravity.max_look_pitch_degrees, 85.0);
        assert_eq!(gravity.ground_probe_length, 15.0);
        assert_eq!(gravity.ascend_speed_threshold, 10.0);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(simulation: (ticks: 10), debug: ())";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.simulation.ticks, 10);
        assert_eq!(config.simulation.tick_rate_hz, 60);
        assert_eq!(config.gravity, GravityConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_delta_seconds_guards_zero_rate() {
        let sim = SimulationConfig {
            tick_rate_hz: 0,
            ticks: 1,
        };
        assert_eq!(sim.delta_seconds(), 1.0);
        assert!((SimulationConfig::default().delta_seconds() - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.gravity.align_interp_speed = 8.0;
        config.planet.tagged = false;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.gravity.max_look_pitch_degrees = 60.0;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.unwrap().gravity.max_look_pitch_degrees, 60.0);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.ron"), "{{not valid}}").unwrap();
        let result = Config::load_or_create(dir.path());
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_errors_name_the_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.ron"), "(simulation: (ticks: \"x\"))").unwrap();
        let message = Config::load_or_create(dir.path()).unwrap_err().to_string();
        assert!(message.starts_with("invalid settings in"), "{message}");
        assert!(message.contains("config.ron"), "{message}");

        let missing = dir.path().join("nowhere");
        let err = Config::default().reload(&missing).unwrap_err();
        assert!(matches!(err, ConfigError::Read { ref path, .. } if path.ends_with("config.ron")));
    }
}
