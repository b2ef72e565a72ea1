//! Ground contact recovery on curved surfaces.
//!
//! A movement solver tuned for flat, gravity-down worlds misses floor
//! contact near the capsule bottom when gravity is radial. While falling,
//! a short probe below the body's lower extent flips it back to grounded.

use glam::Vec3;

use crate::collaborators::{BodyTransform, Movement, MovementMode, WorldQuery};
use crate::frame::is_nearly_zero;
use crate::settings::GravitySettings;

/// Probes for a surface under a falling body and requests grounded movement
/// on a hit.
///
/// Skipped while the body still moves away from the surface faster than
/// `settings.ascend_speed_threshold`. Returns `true` if the mode changed.
pub fn recover_ground_contact(
    movement: &mut dyn Movement,
    body: &dyn BodyTransform,
    world: &dyn WorldQuery,
    gravity_direction: Vec3,
    settings: &GravitySettings,
) -> bool {
    if movement.movement_mode() != MovementMode::Falling || is_nearly_zero(gravity_direction) {
        return false;
    }

    let speed_along_gravity = movement.velocity().dot(gravity_direction);
    if speed_along_gravity < -settings.ascend_speed_threshold {
        return false;
    }

    let bottom = body.position() + gravity_direction * body.lower_extent();
    match world.probe(bottom, gravity_direction, settings.ground_probe_length) {
        Some(hit) => {
            movement.set_movement_mode(MovementMode::Grounded);
            tracing::debug!(
                distance = hit.distance,
                point = ?hit.point,
                "ground contact recovered"
            );
            true
        }
        None => false,
    }
}
