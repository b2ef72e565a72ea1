//! Planet-relative gravity and orientation for controlled bodies.
//!
//! Each tick a [`PlanetGravity`] picks the nearest gravity source, turns its
//! body so up opposes gravity, keeps look input as a tangent plus pitch
//! against the moving up vector, writes one orientation to every camera node,
//! and recovers ground contact that a flat-world movement solver misses on
//! curved surfaces.
//!
//! The host supplies the body, movement solver, camera nodes and world
//! queries through the traits in [`collaborators`].

pub mod alignment;
pub mod camera;
pub mod collaborators;
pub mod component;
pub mod frame;
pub mod ground;
pub mod look;
pub mod settings;
pub mod source;
pub mod view;

#[cfg(test)]
mod testing;

pub use alignment::{ALIGN_SNAP_ANGLE, align_body, desired_forward, target_orientation};
pub use camera::{
    compose_view_orientation, drive_cameras, mirror_control_rotation, release_cameras,
};
pub use collaborators::{
    BodyTransform, CameraRoot, CameraRoots, CandidateBody, Collaborators, Movement, MovementMode,
    OrientationChange, ProbeHit, WorldQuery,
};
pub use component::PlanetGravity;
pub use frame::{WORLD_DOWN, WORLD_UP, basis_from_forward_up};
pub use ground::recover_ground_contact;
pub use look::{FlatLook, MovementAxes, movement_axes};
pub use settings::GravitySettings;
pub use source::{
    FALLBACK_MIN_AXIS_RATIO, FALLBACK_MIN_SCALE_SQ, MIN_SOURCE_RANGE, select_gravity_direction,
};
pub use view::{REINIT_DOT_THRESHOLD, ViewState};
