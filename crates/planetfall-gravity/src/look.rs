//! Flat look controller used when gravity-relative look is off, and
//! gravity-relative movement axes for input handling.

use glam::{Quat, Vec3};

use crate::frame::{WORLD_UP, is_nearly_zero, safe_normal, tangent_on_plane};

/// Standard yaw/pitch look about world up.
///
/// Camera nodes mirror this rotation whenever the gravity-relative composer
/// is bypassed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlatLook {
    /// Rotation about world up in radians. Positive turns left.
    pub yaw_radians: f32,
    /// Rotation above the horizon in radians. Positive looks up.
    pub pitch_radians: f32,
}

impl FlatLook {
    /// Adds look input in degrees, clamping pitch to `±max_pitch` radians.
    pub fn apply(&mut self, yaw_degrees: f32, pitch_degrees: f32, max_pitch: f32) {
        self.yaw_radians = (self.yaw_radians + yaw_degrees.to_radians())
            .rem_euclid(std::f32::consts::TAU);
        self.pitch_radians =
            (self.pitch_radians + pitch_degrees.to_radians()).clamp(-max_pitch, max_pitch);
    }

    /// The look rotation: yaw about +Z, then pitch about the local left axis.
    #[must_use]
    pub fn orientation(&self) -> Quat {
        Quat::from_rotation_z(self.yaw_radians) * Quat::from_rotation_y(-self.pitch_radians)
    }

    /// Look yaw only, for bodies that turn with the controller.
    #[must_use]
    pub fn yaw_orientation(&self) -> Quat {
        Quat::from_rotation_z(self.yaw_radians)
    }

    /// Back to looking along +X.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Unit movement directions in the plane perpendicular to up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MovementAxes {
    /// Walk-forward direction.
    pub forward: Vec3,
    /// Strafe-right direction.
    pub right: Vec3,
}

impl MovementAxes {
    /// Resolves `forward_input`/`right_input` into a world-space wish
    /// direction, normalized when longer than one.
    pub fn wish_direction(&self, forward_input: f32, right_input: f32) -> Vec3 {
        let wish = self.forward * forward_input + self.right * right_input;
        if wish.length_squared() > 1.0 {
            wish.normalize()
        } else {
            wish
        }
    }
}

/// Movement axes for a body with the given `up`, steering by `reference_forward`.
///
/// A zero `up` is treated as world up. When `reference_forward` is parallel
/// to `up`, `fallback_forward` is projected instead; if that also fails the
/// axes are built from world +X.
pub fn movement_axes(up: Vec3, reference_forward: Vec3, fallback_forward: Vec3) -> MovementAxes {
    let up = if is_nearly_zero(up) {
        WORLD_UP
    } else {
        safe_normal(up)
    };

    let forward = tangent_on_plane(reference_forward, up)
        .or_else(|| tangent_on_plane(fallback_forward, up))
        .or_else(|| tangent_on_plane(Vec3::X, up))
        .unwrap_or(Vec3::Y);
    let right = safe_normal(forward.cross(up));

    MovementAxes { forward, right }
}
