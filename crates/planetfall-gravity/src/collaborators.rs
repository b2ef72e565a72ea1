//! Traits the gravity subsystem uses to talk to its host: the controlled
//! body's transform, its movement solver, camera nodes, and world queries.
//!
//! Hosts implement these for whatever object model they run on. Every
//! collaborator except the body is optional per tick; phases skip the side
//! effects whose collaborator is missing.

use glam::{Quat, Vec3};

use crate::frame::{forward_of, right_of, up_of};

/// Movement state of the controlled body, as far as gravity cares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MovementMode {
    /// Standing or walking on a surface.
    #[default]
    Grounded,
    /// Airborne, integrating gravity.
    Falling,
}

/// How an orientation write reached its value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrientationChange {
    /// Jumped directly to the target orientation.
    Immediate,
    /// An interpolation step toward the target orientation.
    Smoothed,
}

/// Transform of the body gravity acts on.
pub trait BodyTransform {
    /// World position of the body origin.
    fn position(&self) -> Vec3;

    /// World orientation.
    fn orientation(&self) -> Quat;

    /// Replaces the world orientation.
    fn set_orientation(&mut self, orientation: Quat, change: OrientationChange);

    /// Distance from the origin to the body's lowest point along its down axis.
    fn lower_extent(&self) -> f32;

    /// Local forward (+X) in world space.
    fn forward(&self) -> Vec3 {
        forward_of(self.orientation())
    }

    /// Local up (+Z) in world space.
    fn up(&self) -> Vec3 {
        up_of(self.orientation())
    }

    /// Local right (-Y) in world space.
    fn right(&self) -> Vec3 {
        right_of(self.orientation())
    }
}

/// Movement solver that integrates the body under gravity.
pub trait Movement {
    /// Direction the solver should pull the body toward. Always unit length.
    fn set_gravity_direction(&mut self, direction: Vec3);

    /// Current movement mode.
    fn movement_mode(&self) -> MovementMode;

    /// Requests a movement mode change.
    fn set_movement_mode(&mut self, mode: MovementMode);

    /// Current world-space velocity.
    fn velocity(&self) -> Vec3;
}

/// A scene node carrying a camera (first-person root or third-person arm).
pub trait CameraRoot {
    /// Writes the node's absolute world orientation.
    fn set_world_orientation(&mut self, orientation: Quat);

    /// Lets the node follow the host's own look-controller rotation instead
    /// of orientations written by the gravity subsystem.
    fn set_follows_control_rotation(&mut self, _follows: bool) {}
}

/// A static world body the source selector may treat as a planet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CandidateBody {
    /// World position of the body's center.
    pub position: Vec3,
    /// Per-axis mesh scale.
    pub scale: Vec3,
}

/// Result of a blocking probe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProbeHit {
    /// World point of impact.
    pub point: Vec3,
    /// Distance along the probe from its origin.
    pub distance: f32,
}

/// Read-only queries against the world the body lives in.
///
/// Implementations exclude the controlled body itself from every query.
pub trait WorldQuery {
    /// Positions of bodies explicitly marked as gravity sources.
    fn tagged_gravity_sources(&self) -> Vec<Vec3>;

    /// Untagged static bodies to consider when nothing is tagged.
    fn candidate_bodies(&self) -> Vec<CandidateBody>;

    /// Casts a ray of `length` from `origin` along unit `direction` and
    /// returns the first blocking hit.
    fn probe(&self, origin: Vec3, direction: Vec3, length: f32) -> Option<ProbeHit>;
}

/// Camera nodes registered for one controlled body.
#[derive(Default)]
pub struct CameraRoots<'a> {
    /// First-person camera root.
    pub first_person: Option<&'a mut dyn CameraRoot>,
    /// Third-person follow arm.
    pub third_person: Option<&'a mut dyn CameraRoot>,
}

impl<'a> CameraRoots<'a> {
    /// Returns `true` if no camera node is registered.
    pub fn is_empty(&self) -> bool {
        self.first_person.is_none() && self.third_person.is_none()
    }

    /// Applies `f` to every registered node.
    pub fn for_each(&mut self, mut f: impl FnMut(&mut dyn CameraRoot)) {
        if let Some(root) = self.first_person.as_deref_mut() {
            f(root);
        }
        if let Some(arm) = self.third_person.as_deref_mut() {
            f(arm);
        }
    }
}

/// Everything one tick of the subsystem reads from or writes to.
pub struct Collaborators<'a> {
    /// The controlled body.
    pub body: &'a mut dyn BodyTransform,
    /// Its movement solver, if it has one.
    pub movement: Option<&'a mut dyn Movement>,
    /// Its camera nodes.
    pub cameras: CameraRoots<'a>,
    /// The surrounding world.
    pub world: &'a dyn WorldQuery,
}
