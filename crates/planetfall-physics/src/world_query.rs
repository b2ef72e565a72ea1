//! [`WorldQuery`] over the Rapier world and the scene registry.

use glam::Vec3;
use planetfall_gravity::{CandidateBody, ProbeHit, WorldQuery};
use rapier3d::prelude::*;

use crate::PhysicsWorld;
use crate::scene::{SceneBodies, SceneBody};

/// Casts a solid ray of `length` from `origin` along unit `direction`,
/// ignoring the `exclude` body.
///
/// Only sees colliders the broad phase knew about at the last step.
pub fn cast_probe(
    physics: &PhysicsWorld,
    exclude: Option<RigidBodyHandle>,
    origin: Vec3,
    direction: Vec3,
    length: f32,
) -> Option<ProbeHit> {
    if length <= 0.0 {
        return None;
    }

    let mut filter = QueryFilter::new();
    if let Some(handle) = exclude {
        filter = filter.exclude_rigid_body(handle);
    }
    let query_pipeline = physics.broad_phase.as_query_pipeline(
        physics.narrow_phase.query_dispatcher(),
        &physics.rigid_body_set,
        &physics.collider_set,
        filter,
    );

    let ray = Ray::new(
        Vector::new(origin.x, origin.y, origin.z),
        Vector::new(direction.x, direction.y, direction.z),
    );
    query_pipeline
        .cast_ray(&ray, length, true)
        .map(|(_, distance)| ProbeHit {
            point: origin + direction * distance,
            distance,
        })
}

/// World view for one controlled body: scene bodies plus ray probes, with
/// the body's own rigid body left out of every answer.
pub struct RapierWorldQuery<'a> {
    physics: &'a PhysicsWorld,
    scene: &'a SceneBodies,
    exclude: Option<RigidBodyHandle>,
}

impl<'a> RapierWorldQuery<'a> {
    pub fn new(physics: &'a PhysicsWorld, scene: &'a SceneBodies) -> Self {
        Self {
            physics,
            scene,
            exclude: None,
        }
    }

    /// Leaves `handle` out of source lists and probes.
    #[must_use]
    pub fn excluding(mut self, handle: Option<RigidBodyHandle>) -> Self {
        self.exclude = handle;
        self
    }

    fn position_of(&self, entry: &SceneBody) -> Option<Vec3> {
        if self.exclude == Some(entry.body) {
            return None;
        }
        self.physics.body_translation(entry.body)
    }
}

impl WorldQuery for RapierWorldQuery<'_> {
    fn tagged_gravity_sources(&self) -> Vec<Vec3> {
        self.scene
            .iter()
            .filter(|entry| entry.gravity_source)
            .filter_map(|entry| self.position_of(entry))
            .collect()
    }

    fn candidate_bodies(&self) -> Vec<CandidateBody> {
        self.scene
            .iter()
            .filter(|entry| !entry.gravity_source)
            .filter(|entry| {
                self.physics
                    .rigid_body_set
                    .get(entry.body)
                    .is_some_and(|body| body.is_fixed())
            })
            .filter_map(|entry| {
                self.position_of(entry).map(|position| CandidateBody {
                    position,
                    scale: entry.scale,
                })
            })
            .collect()
    }

    fn probe(&self, origin: Vec3, direction: Vec3, length: f32) -> Option<ProbeHit> {
        cast_probe(self.physics, self.exclude, origin, direction, length)
    }
}
