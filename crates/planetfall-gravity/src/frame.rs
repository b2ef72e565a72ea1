//! Orientation frame helpers: safe normalization, plane projection, and
//! quaternion construction from a forward/up pair without Euler angles.
//!
//! World frame is Z-up. A body or camera orientation maps local +X to
//! forward, local +Y to left and local +Z to up.

use glam::{Mat3, Quat, Vec3};

/// World up when no gravity source is active.
pub const WORLD_UP: Vec3 = Vec3::Z;

/// Neutral "down" handed to movement collaborators when gravity is the
/// zero sentinel or the subsystem is disabled.
pub const WORLD_DOWN: Vec3 = Vec3::NEG_Z;

/// Per-component tolerance below which a vector counts as zero.
pub const NEARLY_ZERO: f32 = 1e-4;

/// Squared length below which normalization is refused.
const SAFE_NORMAL_TOLERANCE_SQ: f32 = 1e-8;

/// Returns `true` if every component of `v` is within [`NEARLY_ZERO`].
#[inline]
pub fn is_nearly_zero(v: Vec3) -> bool {
    v.abs().max_element() <= NEARLY_ZERO
}

/// Normalizes `v`, or returns exactly zero if it is too short to normalize.
///
/// Never produces NaN and never produces a partially normalized vector.
#[inline]
pub fn safe_normal(v: Vec3) -> Vec3 {
    let len_sq = v.length_squared();
    if len_sq < SAFE_NORMAL_TOLERANCE_SQ || !len_sq.is_finite() {
        Vec3::ZERO
    } else {
        v / len_sq.sqrt()
    }
}

/// Removes the component of `v` along the unit vector `normal`.
#[inline]
pub fn project_onto_plane(v: Vec3, normal: Vec3) -> Vec3 {
    v - normal * v.dot(normal)
}

/// Unit direction of `v` within the plane perpendicular to `normal`, or
/// `None` when `v` is (nearly) parallel to `normal`.
pub fn tangent_on_plane(v: Vec3, normal: Vec3) -> Option<Vec3> {
    let tangent = safe_normal(project_onto_plane(v, normal));
    (!is_nearly_zero(tangent)).then_some(tangent)
}

/// Builds an orientation whose local +X points along `forward` and local +Z
/// along `up`.
///
/// `up` is kept exact; `forward` is re-orthogonalized against it. Returns
/// `None` if either input is degenerate or the two are parallel.
pub fn basis_from_forward_up(forward: Vec3, up: Vec3) -> Option<Quat> {
    let z = safe_normal(up);
    if is_nearly_zero(z) {
        return None;
    }
    let y = safe_normal(z.cross(forward));
    if is_nearly_zero(y) {
        return None;
    }
    let x = y.cross(z);
    Some(Quat::from_mat3(&Mat3::from_cols(x, y, z)).normalize())
}

/// Moves `current` toward `target` by `speed * dt` of the remaining arc.
///
/// A non-positive speed snaps straight to `target`.
pub fn interp_to(current: Quat, target: Quat, dt: f32, speed: f32) -> Quat {
    if speed <= 0.0 || current.abs_diff_eq(target, 1e-6) {
        return target;
    }
    let alpha = (speed * dt).clamp(0.0, 1.0);
    current.slerp(target, alpha).normalize()
}

/// Angle in radians of the shortest rotation between two orientations.
#[inline]
pub fn angular_distance(a: Quat, b: Quat) -> f32 {
    a.angle_between(b)
}

/// Local +X of `orientation`.
#[inline]
pub fn forward_of(orientation: Quat) -> Vec3 {
    orientation * Vec3::X
}

/// Local +Z of `orientation`.
#[inline]
pub fn up_of(orientation: Quat) -> Vec3 {
    orientation * Vec3::Z
}

/// Local -Y of `orientation`.
#[inline]
pub fn right_of(orientation: Quat) -> Vec3 {
    orientation * Vec3::NEG_Y
}
