//! Rapier-backed host for planet gravity: physics world, scene registry,
//! world queries, kinematic characters, camera rigs, and the ECS systems
//! that tick [`planetfall_gravity::PlanetGravity`] for every body.
//!
//! Rapier's own gravity stays at zero. Each body's pull comes from its
//! gravity subsystem and is integrated by the character movement step.

use bevy_ecs::prelude::*;
use rapier3d::prelude::*;

pub mod camera_rig;
pub mod character;
pub mod scene;
pub mod systems;
pub mod world_query;

pub use camera_rig::{CameraNode, CameraRig};
pub use character::{
    BodyFrame, CharacterBody, GROUND_SNAP_DISTANCE, MovementState, character_movement_step,
    spawn_character,
};
pub use scene::{SceneBodies, SceneBody, UNIT_SPHERE_RADIUS, spawn_floor, spawn_planet, spawn_prop};
pub use systems::{
    FixedDelta, GravityBody, GravityToggle, LookInput, MoveInput, build_gravity_schedule,
    character_movement_system, gravity_toggle_system, look_input_system, planet_gravity_system,
    spawn_gravity_character,
};
pub use world_query::{RapierWorldQuery, cast_probe};

/// Handle to the Rapier rigid body backing an entity.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RigidBodyHandle(pub rapier3d::prelude::RigidBodyHandle);

/// Central physics simulation resource owning all Rapier state.
///
/// Systems read via `Res<PhysicsWorld>` for probes or mutate via
/// `ResMut<PhysicsWorld>` to add bodies and step.
#[derive(Resource)]
pub struct PhysicsWorld {
    /// Global gravity vector. Zero: per-body gravity is handled elsewhere.
    pub gravity: Vector,
    /// Timestep and solver configuration.
    pub integration_parameters: IntegrationParameters,
    /// The main simulation pipeline.
    pub physics_pipeline: PhysicsPipeline,
    /// Tracks sleeping/awake body islands.
    pub island_manager: IslandManager,
    /// Broad-phase collision detection (also provides query pipeline).
    pub broad_phase: BroadPhaseBvh,
    /// Narrow-phase collision detection (contact manifolds).
    pub narrow_phase: NarrowPhase,
    /// All rigid bodies in the simulation.
    pub rigid_body_set: RigidBodySet,
    /// All colliders in the simulation.
    pub collider_set: ColliderSet,
    /// Impulse-based joints.
    pub impulse_joint_set: ImpulseJointSet,
    /// Multibody joints.
    pub multibody_joint_set: MultibodyJointSet,
    /// Continuous collision detection solver.
    pub ccd_solver: CCDSolver,
}

impl PhysicsWorld {
    /// Creates an empty world with zero global gravity stepping at 60 Hz.
    pub fn new() -> Self {
        Self::with_timestep(1.0 / 60.0)
    }

    /// Creates an empty world with zero global gravity and the given step.
    pub fn with_timestep(dt: f32) -> Self {
        let integration_parameters = IntegrationParameters {
            dt,
            ..Default::default()
        };

        Self {
            gravity: Vector::new(0.0, 0.0, 0.0),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
        }
    }

    /// Advances the simulation by one fixed timestep.
    ///
    /// Also refreshes the broad phase, so bodies inserted since the last
    /// step become visible to probes.
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            &(),
            &(),
        );
    }

    /// World translation of `handle` as a glam vector, if the body exists.
    pub fn body_translation(
        &self,
        handle: rapier3d::prelude::RigidBodyHandle,
    ) -> Option<glam::Vec3> {
        self.rigid_body_set.get(handle).map(|body| {
            let t = body.translation();
            glam::Vec3::new(t.x, t.y, t.z)
        })
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// ECS system that steps the physics simulation once per invocation.
pub fn physics_step_system(mut physics: ResMut<PhysicsWorld>) {
    physics.step();
}
