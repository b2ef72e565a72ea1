//! ECS components and systems that run planet gravity for every body.
//!
//! Per tick, in order: pending enable/disable requests, look input, the
//! gravity tick itself, character movement, then the physics step.

use bevy_ecs::prelude::*;
use glam::Vec3;
use planetfall_config::CharacterConfig;
use planetfall_gravity::{
    CameraRoots, Collaborators, GravitySettings, Movement, PlanetGravity, WorldQuery,
};

use crate::camera_rig::CameraRig;
use crate::character::{
    BodyFrame, CharacterBody, MovementState, character_movement_step, spawn_character,
};
use crate::scene::SceneBodies;
use crate::world_query::RapierWorldQuery;
use crate::{PhysicsWorld, RigidBodyHandle, physics_step_system};

// ---------------------------------------------------------------------------
// Resources and components
// ---------------------------------------------------------------------------

/// Fixed simulation step in seconds.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct FixedDelta(pub f32);

impl Default for FixedDelta {
    fn default() -> Self {
        Self(1.0 / 60.0)
    }
}

/// Planet gravity state of one body.
#[derive(Component, Clone, Debug, Default)]
pub struct GravityBody(pub PlanetGravity);

/// Look input accumulated since the last tick, in degrees.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct LookInput {
    pub yaw_degrees: f32,
    pub pitch_degrees: f32,
}

impl LookInput {
    pub fn add(&mut self, yaw_degrees: f32, pitch_degrees: f32) {
        self.yaw_degrees += yaw_degrees;
        self.pitch_degrees += pitch_degrees;
    }

    /// Returns the pending input and clears it.
    pub fn take(&mut self) -> (f32, f32) {
        let pending = (self.yaw_degrees, self.pitch_degrees);
        *self = Self::default();
        pending
    }
}

/// Walk input on the local surface, each axis in `[-1, 1]`.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct MoveInput {
    pub forward: f32,
    pub right: f32,
}

/// One-shot request to turn a body's gravity processing on or off.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct GravityToggle {
    pub enabled: bool,
}

// ---------------------------------------------------------------------------
// Spawning
// ---------------------------------------------------------------------------

/// Spawns a kinematic character with gravity, camera rig and input
/// components. Requires a [`PhysicsWorld`] resource.
pub fn spawn_gravity_character(
    world: &mut World,
    position: Vec3,
    character: &CharacterConfig,
    settings: GravitySettings,
    rig: CameraRig,
) -> Entity {
    let (body, frame, movement) = {
        let mut physics = world.resource_mut::<PhysicsWorld>();
        spawn_character(&mut physics, position, character)
    };
    world
        .spawn((
            RigidBodyHandle(body.body_handle),
            body,
            frame,
            movement,
            GravityBody(PlanetGravity::new(settings)),
            rig,
            LookInput::default(),
            MoveInput::default(),
        ))
        .id()
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

type GravityBodyItem<'a> = (
    &'a mut GravityBody,
    &'a mut BodyFrame,
    Option<&'a mut MovementState>,
    Option<&'a mut CameraRig>,
    Option<&'a RigidBodyHandle>,
);

fn collaborators<'a>(
    frame: &'a mut BodyFrame,
    movement: Option<&'a mut MovementState>,
    rig: Option<&'a mut CameraRig>,
    world: &'a dyn WorldQuery,
) -> Collaborators<'a> {
    Collaborators {
        body: frame,
        movement: movement.map(|m| m as &mut dyn Movement),
        cameras: rig.map(CameraRig::roots).unwrap_or_else(CameraRoots::default),
        world,
    }
}

/// Applies and clears pending [`GravityToggle`] requests.
pub fn gravity_toggle_system(
    mut commands: Commands,
    physics: Res<PhysicsWorld>,
    scene: Res<SceneBodies>,
    mut bodies: Query<(Entity, &GravityToggle, GravityBodyItem<'_>)>,
) {
    for (entity, toggle, (mut gravity, mut frame, mut movement, mut rig, handle)) in &mut bodies {
        let world = RapierWorldQuery::new(&physics, &scene).excluding(handle.map(|h| h.0));
        let mut collaborators = collaborators(
            &mut frame,
            movement.as_deref_mut(),
            rig.as_deref_mut(),
            &world,
        );
        gravity.0.set_enabled(toggle.enabled, &mut collaborators);
        commands.entity(entity).remove::<GravityToggle>();
    }
}

/// Feeds pending look input into each body's gravity state.
pub fn look_input_system(mut bodies: Query<(&mut GravityBody, &BodyFrame, &mut LookInput)>) {
    for (mut gravity, frame, mut look) in &mut bodies {
        if *look == LookInput::default() {
            continue;
        }
        let (yaw, pitch) = look.take();
        gravity.0.apply_look_input(yaw, pitch, frame);
    }
}

/// Runs one planet gravity tick for every body.
pub fn planet_gravity_system(
    physics: Res<PhysicsWorld>,
    scene: Res<SceneBodies>,
    delta: Res<FixedDelta>,
    mut bodies: Query<GravityBodyItem<'_>>,
) {
    for (mut gravity, mut frame, mut movement, mut rig, handle) in &mut bodies {
        let world = RapierWorldQuery::new(&physics, &scene).excluding(handle.map(|h| h.0));
        let mut collaborators = collaborators(
            &mut frame,
            movement.as_deref_mut(),
            rig.as_deref_mut(),
            &world,
        );
        gravity.0.update(delta.0, &mut collaborators);
    }
}

/// Moves characters along their surface from [`MoveInput`].
pub fn character_movement_system(
    mut physics: ResMut<PhysicsWorld>,
    delta: Res<FixedDelta>,
    mut characters: Query<(
        &CharacterBody,
        &GravityBody,
        &mut BodyFrame,
        &mut MovementState,
        Option<&MoveInput>,
    )>,
) {
    for (character, gravity, mut frame, mut movement, input) in &mut characters {
        let wish = input.map_or(Vec3::ZERO, |input| {
            gravity
                .0
                .movement_axes(&*frame)
                .wish_direction(input.forward, input.right)
        });
        character_movement_step(
            character,
            &mut frame,
            &mut movement,
            &mut physics,
            wish,
            delta.0,
        );
    }
}

/// Adds the gravity systems to `schedule` in tick order.
pub fn build_gravity_schedule(schedule: &mut Schedule) {
    schedule.add_systems(
        (
            gravity_toggle_system,
            look_input_system,
            planet_gravity_system,
            character_movement_system,
            physics_step_system,
        )
            .chain(),
    );
}

#[cfg(test)]
#[path = "systems_tests.rs"]
mod tests;
