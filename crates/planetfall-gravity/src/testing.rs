//! In-memory collaborators for unit tests.

use glam::{Quat, Vec3};

use crate::collaborators::{
    BodyTransform, CameraRoot, CameraRoots, CandidateBody, Collaborators, Movement, MovementMode,
    OrientationChange, ProbeHit, WorldQuery,
};

pub struct MockBody {
    pub position: Vec3,
    pub orientation: Quat,
    pub lower_extent: f32,
    pub last_change: Option<OrientationChange>,
}

impl MockBody {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            orientation: Quat::IDENTITY,
            lower_extent: 96.0,
            last_change: None,
        }
    }
}

impl BodyTransform for MockBody {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn orientation(&self) -> Quat {
        self.orientation
    }

    fn set_orientation(&mut self, orientation: Quat, change: OrientationChange) {
        self.orientation = orientation;
        self.last_change = Some(change);
    }

    fn lower_extent(&self) -> f32 {
        self.lower_extent
    }
}

#[derive(Default)]
pub struct MockMovement {
    pub gravity_direction: Option<Vec3>,
    pub mode: MovementMode,
    pub velocity: Vec3,
}

impl Movement for MockMovement {
    fn set_gravity_direction(&mut self, direction: Vec3) {
        self.gravity_direction = Some(direction);
    }

    fn movement_mode(&self) -> MovementMode {
        self.mode
    }

    fn set_movement_mode(&mut self, mode: MovementMode) {
        self.mode = mode;
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }
}

pub struct MockCamera {
    pub orientation: Option<Quat>,
    pub follows_control_rotation: bool,
}

impl Default for MockCamera {
    fn default() -> Self {
        Self {
            orientation: None,
            follows_control_rotation: true,
        }
    }
}

impl CameraRoot for MockCamera {
    fn set_world_orientation(&mut self, orientation: Quat) {
        self.orientation = Some(orientation);
    }

    fn set_follows_control_rotation(&mut self, follows: bool) {
        self.follows_control_rotation = follows;
    }
}

/// A world of point sources and infinite floor planes for probes.
#[derive(Default)]
pub struct MockWorld {
    pub tagged: Vec<Vec3>,
    pub candidates: Vec<CandidateBody>,
    /// Any probe reaching within this distance of its origin hits.
    pub surface_distance: Option<f32>,
}

impl MockWorld {
    pub fn with_tagged(tagged: Vec<Vec3>) -> Self {
        Self {
            tagged,
            ..Default::default()
        }
    }
}

impl WorldQuery for MockWorld {
    fn tagged_gravity_sources(&self) -> Vec<Vec3> {
        self.tagged.clone()
    }

    fn candidate_bodies(&self) -> Vec<CandidateBody> {
        self.candidates.clone()
    }

    fn probe(&self, origin: Vec3, direction: Vec3, length: f32) -> Option<ProbeHit> {
        self.surface_distance
            .filter(|d| *d <= length)
            .map(|distance| ProbeHit {
                point: origin + direction * distance,
                distance,
            })
    }
}

/// Bundles mocks into [`Collaborators`] for one call.
pub fn collaborators<'a>(
    body: &'a mut MockBody,
    movement: Option<&'a mut MockMovement>,
    first_person: Option<&'a mut MockCamera>,
    third_person: Option<&'a mut MockCamera>,
    world: &'a MockWorld,
) -> Collaborators<'a> {
    Collaborators {
        body,
        movement: movement.map(|m| m as &mut dyn Movement),
        cameras: CameraRoots {
            first_person: first_person.map(|c| c as &mut dyn CameraRoot),
            third_person: third_person.map(|c| c as &mut dyn CameraRoot),
        },
        world,
    }
}
