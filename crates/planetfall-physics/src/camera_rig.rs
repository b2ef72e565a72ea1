//! Camera nodes carried by a controlled body: a first-person root at eye
//! height and an optional third-person follow arm.

use bevy_ecs::prelude::Component;
use glam::{Quat, Vec3};
use planetfall_gravity::frame::{forward_of, up_of};
use planetfall_gravity::{CameraRoot, CameraRoots};

/// One camera-carrying scene node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraNode {
    /// Absolute world orientation.
    pub world_orientation: Quat,
    /// Follows the host look controller instead of written orientations.
    pub follows_control_rotation: bool,
}

impl Default for CameraNode {
    fn default() -> Self {
        Self {
            world_orientation: Quat::IDENTITY,
            follows_control_rotation: true,
        }
    }
}

impl CameraRoot for CameraNode {
    fn set_world_orientation(&mut self, orientation: Quat) {
        self.world_orientation = orientation;
    }

    fn set_follows_control_rotation(&mut self, follows: bool) {
        self.follows_control_rotation = follows;
    }
}

/// Camera nodes of one body.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct CameraRig {
    pub first_person: Option<CameraNode>,
    pub third_person: Option<CameraNode>,
    /// Distance from the pivot back to the third-person eye.
    pub arm_length: f32,
    /// Offset of the pivot above the body origin along local up.
    pub eye_height: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            first_person: Some(CameraNode::default()),
            third_person: None,
            arm_length: 300.0,
            eye_height: 64.0,
        }
    }
}

impl CameraRig {
    /// First-person root plus a follow arm of `arm_length`.
    pub fn with_follow_arm(arm_length: f32) -> Self {
        Self {
            third_person: Some(CameraNode::default()),
            arm_length,
            ..Default::default()
        }
    }

    /// Borrows the nodes for one gravity tick.
    pub fn roots(&mut self) -> CameraRoots<'_> {
        CameraRoots {
            first_person: self
                .first_person
                .as_mut()
                .map(|node| node as &mut dyn CameraRoot),
            third_person: self
                .third_person
                .as_mut()
                .map(|node| node as &mut dyn CameraRoot),
        }
    }

    /// Pivot point of the rig for a body at `position` with `body_orientation`.
    pub fn pivot(&self, position: Vec3, body_orientation: Quat) -> Vec3 {
        position + up_of(body_orientation) * self.eye_height
    }

    /// World position of the third-person eye, behind the pivot along the
    /// arm's forward axis.
    pub fn third_person_eye(&self, position: Vec3, body_orientation: Quat) -> Option<Vec3> {
        self.third_person.map(|arm| {
            self.pivot(position, body_orientation)
                - forward_of(arm.world_orientation) * self.arm_length
        })
    }
}
