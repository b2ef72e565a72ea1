//! Body alignment: rotate any body so its local up opposes gravity, keeping
//! its heading in the new tangent plane.

use glam::{Quat, Vec3};

use crate::collaborators::{BodyTransform, OrientationChange};
use crate::frame::{
    angular_distance, basis_from_forward_up, interp_to, is_nearly_zero, safe_normal,
    tangent_on_plane,
};
use crate::view::ViewState;

/// Angular gap below which alignment snaps instead of interpolating (0.5°).
pub const ALIGN_SNAP_ANGLE: f32 = 0.5 * std::f32::consts::PI / 180.0;

/// Heading the aligned body should face within the plane perpendicular to
/// `desired_up`.
///
/// Uses the view tangent when gravity-relative look is driving the body,
/// falling back to the body's own forward and finally to a heading built
/// from its right axis.
pub fn desired_forward(
    desired_up: Vec3,
    body_forward: Vec3,
    body_right: Vec3,
    view: Option<&ViewState>,
) -> Option<Vec3> {
    let from_view = view
        .filter(|v| v.initialized)
        .and_then(|v| tangent_on_plane(v.tangent_forward, desired_up));

    from_view
        .or_else(|| tangent_on_plane(body_forward, desired_up))
        .or_else(|| {
            let built = safe_normal(desired_up.cross(body_right));
            (!is_nearly_zero(built)).then_some(built)
        })
}

/// Orientation the body should end up in for `gravity_direction`.
///
/// `None` when gravity is the zero sentinel or no heading can be built.
pub fn target_orientation(
    gravity_direction: Vec3,
    body: &dyn BodyTransform,
    view: Option<&ViewState>,
) -> Option<Quat> {
    if is_nearly_zero(gravity_direction) {
        return None;
    }
    let desired_up = safe_normal(-gravity_direction);
    let forward = desired_forward(desired_up, body.forward(), body.right(), view)?;
    basis_from_forward_up(forward, desired_up)
}

/// Runs one alignment step on `body`.
///
/// Snaps when within [`ALIGN_SNAP_ANGLE`] of the target, otherwise
/// interpolates at `interp_speed` scaled by `dt`. Returns the change made,
/// or `None` if nothing was written.
pub fn align_body(
    body: &mut dyn BodyTransform,
    gravity_direction: Vec3,
    view: Option<&ViewState>,
    interp_speed: f32,
    dt: f32,
) -> Option<OrientationChange> {
    let target = target_orientation(gravity_direction, body, view)?;
    let current = body.orientation();

    if angular_distance(current, target) < ALIGN_SNAP_ANGLE {
        body.set_orientation(target, OrientationChange::Immediate);
        Some(OrientationChange::Immediate)
    } else {
        body.set_orientation(
            interp_to(current, target, dt, interp_speed),
            OrientationChange::Smoothed,
        );
        Some(OrientationChange::Smoothed)
    }
}
