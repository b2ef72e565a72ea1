//! Per-body gravity settings, fixed when the body is created.

use planetfall_config::GravityConfig;

/// Immutable configuration of one controlled body's gravity subsystem.
#[derive(Clone, Debug, PartialEq)]
pub struct GravitySettings {
    /// Rotate the body so its up axis opposes gravity.
    pub align_enabled: bool,
    /// Alignment smoothing rate. Higher is snappier; non-positive snaps.
    pub align_interp_speed: f32,
    /// Track look as yaw/pitch relative to the local up vector.
    pub use_gravity_relative_look: bool,
    /// Maximum look pitch above or below the local horizon, in degrees.
    pub max_look_pitch_degrees: f32,
    /// Ground-recovery probe length below the body's lower extent.
    pub ground_probe_length: f32,
    /// Speed away from the surface above which recovery is skipped.
    pub ascend_speed_threshold: f32,
}

impl GravitySettings {
    /// Maximum look pitch in radians.
    pub fn max_look_pitch_radians(&self) -> f32 {
        self.max_look_pitch_degrees.abs().to_radians()
    }
}

impl Default for GravitySettings {
    fn default() -> Self {
        Self::from(&GravityConfig::default())
    }
}

impl From<&GravityConfig> for GravitySettings {
    fn from(config: &GravityConfig) -> Self {
        Self {
            align_enabled: config.align_enabled,
            align_interp_speed: config.align_interp_speed,
            use_gravity_relative_look: config.use_gravity_relative_look,
            max_look_pitch_degrees: config.max_look_pitch_degrees,
            ground_probe_length: config.ground_probe_length,
            ascend_speed_threshold: config.ascend_speed_threshold,
        }
    }
}
