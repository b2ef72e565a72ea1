//! Camera orientation composer: one quaternion for every camera node, built
//! straight from the view state and the current up vector.

use glam::{Quat, Vec3};

use crate::collaborators::CameraRoots;
use crate::frame::basis_from_forward_up;
use crate::view::ViewState;

/// Look orientation for `view` against `up`: tangent tilted by pitch toward
/// `up`, with `up` as the camera's local +Z.
pub fn compose_view_orientation(view: &ViewState, up: Vec3) -> Option<Quat> {
    basis_from_forward_up(view.look_forward_against(up), up)
}

/// Writes the gravity-relative `orientation` to every camera node and takes
/// them off the host's control rotation.
pub fn drive_cameras(cameras: &mut CameraRoots<'_>, orientation: Quat) {
    cameras.for_each(|node| {
        node.set_follows_control_rotation(false);
        node.set_world_orientation(orientation);
    });
}

/// Hands camera nodes back to the host's look controller without writing
/// an orientation.
pub fn release_cameras(cameras: &mut CameraRoots<'_>) {
    cameras.for_each(|node| node.set_follows_control_rotation(true));
}

/// Hands camera nodes back to the standard look controller and mirrors its
/// `control_rotation`.
pub fn mirror_control_rotation(cameras: &mut CameraRoots<'_>, control_rotation: Quat) {
    cameras.for_each(|node| {
        node.set_follows_control_rotation(true);
        node.set_world_orientation(control_rotation);
    });
}
