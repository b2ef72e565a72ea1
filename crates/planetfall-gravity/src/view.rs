//! Gravity-relative view state: look direction kept as a tangent forward
//! (carrying yaw) plus an independent pitch scalar, both measured against
//! the current up vector.
//!
//! Yaw rotates the tangent about up and pitch is accumulated as a bounded
//! scalar. Pitch is never recovered by decomposing a combined rotation, so a
//! tilting up vector cannot leak into it.

use glam::{Quat, Vec3};

use crate::frame::{WORLD_UP, is_nearly_zero, safe_normal, tangent_on_plane};

/// Dot product between the stored and current up vectors below which the
/// view is rebuilt from the reconstructed look direction (about 2.5°).
pub const REINIT_DOT_THRESHOLD: f32 = 0.999;

/// Look input magnitude, in degrees, treated as no input.
const LOOK_INPUT_EPSILON: f32 = 1e-4;

/// Tangent/pitch decomposition of the look direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    /// Up vector the decomposition was last built or updated against.
    pub up: Vec3,
    /// Look forward projected onto the plane perpendicular to `up`.
    pub tangent_forward: Vec3,
    /// Signed pitch above the tangent plane, in radians.
    pub pitch_radians: f32,
    /// Whether `tangent_forward`/`pitch_radians` are valid for `up`.
    pub initialized: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            up: WORLD_UP,
            tangent_forward: Vec3::X,
            pitch_radians: 0.0,
            initialized: false,
        }
    }
}

impl ViewState {
    /// Full look direction rebuilt from tangent and pitch against the stored up.
    pub fn look_forward(&self) -> Vec3 {
        self.look_forward_against(self.up)
    }

    /// Full look direction rebuilt from tangent and pitch against `up`.
    pub fn look_forward_against(&self, up: Vec3) -> Vec3 {
        let (sin, cos) = self.pitch_radians.sin_cos();
        safe_normal(self.tangent_forward * cos + up * sin)
    }

    /// Returns `true` if the decomposition must be rebuilt before use with `up`.
    pub fn needs_reinit(&self, up: Vec3) -> bool {
        !self.initialized || safe_normal(self.up).dot(up) < REINIT_DOT_THRESHOLD
    }

    /// Rebuilds tangent and pitch against `up`.
    ///
    /// The look direction is reconstructed from the existing decomposition
    /// when there is one, otherwise taken from `body_forward`. A degenerate
    /// tangent falls back to `body_forward`, then to the previous tangent,
    /// each projected onto the new plane; if all are degenerate the tangent
    /// is left as it was.
    pub fn initialize(&mut self, up: Vec3, body_forward: Vec3, max_pitch: f32) {
        let up = safe_normal(up);
        if is_nearly_zero(up) {
            return;
        }

        let forward = if self.initialized {
            self.look_forward()
        } else {
            safe_normal(body_forward)
        };

        let up_component = forward.dot(up).clamp(-1.0, 1.0);
        self.pitch_radians = up_component.asin().clamp(-max_pitch, max_pitch);

        let tangent = tangent_on_plane(forward, up)
            .or_else(|| tangent_on_plane(body_forward, up))
            .or_else(|| tangent_on_plane(self.tangent_forward, up));
        if let Some(tangent) = tangent {
            self.tangent_forward = tangent;
        }

        self.up = up;
        self.initialized = true;
        tracing::debug!(
            up = ?self.up,
            tangent = ?self.tangent_forward,
            pitch = self.pitch_radians,
            "gravity-relative view initialized"
        );
    }

    /// Rebuilds the decomposition if `up` moved too far since the last update.
    ///
    /// Returns `true` if a rebuild happened.
    pub fn ensure_initialized(&mut self, up: Vec3, body_forward: Vec3, max_pitch: f32) -> bool {
        if self.needs_reinit(up) {
            self.initialize(up, body_forward, max_pitch);
            true
        } else {
            false
        }
    }

    /// Accumulates look input relative to `up`.
    ///
    /// Yaw rotates the tangent about `up`; pitch is added to the pitch scalar
    /// and clamped to `±max_pitch`. No-op when `up` is zero.
    pub fn apply_look(
        &mut self,
        up: Vec3,
        yaw_degrees: f32,
        pitch_degrees: f32,
        max_pitch: f32,
        body_forward: Vec3,
    ) {
        let up = safe_normal(up);
        if is_nearly_zero(up) {
            return;
        }

        self.ensure_initialized(up, body_forward, max_pitch);

        let mut tangent = self.tangent_forward;
        if yaw_degrees.abs() > LOOK_INPUT_EPSILON {
            tangent = Quat::from_axis_angle(up, yaw_degrees.to_radians()) * tangent;
        }
        if let Some(projected) = tangent_on_plane(tangent, up) {
            self.tangent_forward = projected;
        }

        if pitch_degrees.abs() > LOOK_INPUT_EPSILON {
            self.pitch_radians += pitch_degrees.to_radians();
        }
        self.pitch_radians = self.pitch_radians.clamp(-max_pitch, max_pitch);

        self.up = up;
    }

    /// Forgets the decomposition so the next use rebuilds it from the body.
    pub fn invalidate(&mut self) {
        self.initialized = false;
    }
}
