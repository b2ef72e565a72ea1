//! Kinematic character: capsule body moved by its own integrator along
//! whatever gravity direction it was last handed.
//!
//! The character's transform and movement state live in separate
//! components, [`BodyFrame`] and [`MovementState`], so the gravity
//! subsystem can borrow both in the same tick.

use bevy_ecs::prelude::Component;
use glam::{Quat, Vec3};
use planetfall_config::CharacterConfig;
use planetfall_gravity::frame::{WORLD_DOWN, is_nearly_zero, project_onto_plane, safe_normal};
use planetfall_gravity::{BodyTransform, Movement, MovementMode, OrientationChange};
use rapier3d::prelude::*;

use crate::PhysicsWorld;
use crate::world_query::cast_probe;

/// How far below its feet a grounded character looks for the floor before
/// it starts falling.
pub const GROUND_SNAP_DISTANCE: f32 = 20.0;

/// World transform of a gravity-aligned body.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct BodyFrame {
    pub position: Vec3,
    pub orientation: Quat,
    /// Distance from the origin to the lowest point along local down.
    pub half_height: f32,
    /// How the last orientation write was made.
    pub last_change: Option<OrientationChange>,
}

impl BodyFrame {
    pub fn new(position: Vec3, half_height: f32) -> Self {
        Self {
            position,
            orientation: Quat::IDENTITY,
            half_height,
            last_change: None,
        }
    }
}

impl BodyTransform for BodyFrame {
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
        self.half_height
    }
}

/// Movement solver state read and written by the gravity subsystem.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct MovementState {
    pub mode: MovementMode,
    pub velocity: Vec3,
    /// Unit pull direction. Never zero.
    pub gravity_direction: Vec3,
}

impl Default for MovementState {
    fn default() -> Self {
        Self {
            mode: MovementMode::Falling,
            velocity: Vec3::ZERO,
            gravity_direction: WORLD_DOWN,
        }
    }
}

impl MovementState {
    /// Pushes the body away from the surface at `speed` and makes it airborne.
    pub fn launch(&mut self, speed: f32) {
        self.velocity -= self.down() * speed;
        self.mode = MovementMode::Falling;
    }

    fn down(&self) -> Vec3 {
        if is_nearly_zero(self.gravity_direction) {
            WORLD_DOWN
        } else {
            safe_normal(self.gravity_direction)
        }
    }
}

impl Movement for MovementState {
    fn set_gravity_direction(&mut self, direction: Vec3) {
        self.gravity_direction = direction;
    }

    fn movement_mode(&self) -> MovementMode {
        self.mode
    }

    fn set_movement_mode(&mut self, mode: MovementMode) {
        if self.mode != mode {
            tracing::trace!(from = ?self.mode, to = ?mode, "movement mode change");
        }
        self.mode = mode;
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }
}

/// Rapier handles and tuning of a kinematic character.
#[derive(Component, Clone, Copy, Debug)]
pub struct CharacterBody {
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,
    pub radius: f32,
    /// Gravity acceleration in units per second squared.
    pub gravity_acceleration: f32,
    /// Ground speed in units per second.
    pub walk_speed: f32,
}

/// Spawns a kinematic capsule at `position` and returns its components.
///
/// The capsule's axis is world Z; only probes use its orientation.
pub fn spawn_character(
    physics: &mut PhysicsWorld,
    position: Vec3,
    config: &CharacterConfig,
) -> (CharacterBody, BodyFrame, MovementState) {
    let body = RigidBodyBuilder::kinematic_position_based()
        .translation(Vector::new(position.x, position.y, position.z))
        .build();
    let body_handle = physics.rigid_body_set.insert(body);

    let segment_half = (config.capsule_half_height - config.capsule_radius).max(0.0);
    let collider = ColliderBuilder::capsule_z(segment_half, config.capsule_radius)
        .friction(0.0)
        .build();
    let collider_handle =
        physics
            .collider_set
            .insert_with_parent(collider, body_handle, &mut physics.rigid_body_set);

    tracing::debug!(?position, "character spawned");

    (
        CharacterBody {
            body_handle,
            collider_handle,
            radius: config.capsule_radius,
            gravity_acceleration: config.gravity_acceleration,
            walk_speed: config.walk_speed,
        },
        BodyFrame::new(position, config.capsule_half_height),
        MovementState::default(),
    )
}

/// Applies one tick of movement: walking while grounded, free fall with
/// ray-probed landing while airborne.
///
/// `wish` is a world-space walk direction with length at most one. Only its
/// component perpendicular to gravity is used.
pub fn character_movement_step(
    character: &CharacterBody,
    frame: &mut BodyFrame,
    movement: &mut MovementState,
    physics: &mut PhysicsWorld,
    wish: Vec3,
    dt: f32,
) {
    let down = movement.down();
    let exclude = Some(character.body_handle);
    let mut position = frame.position;

    match movement.mode {
        MovementMode::Grounded => {
            movement.velocity = project_onto_plane(wish, down) * character.walk_speed;
            position += movement.velocity * dt;

            let reach = frame.half_height + GROUND_SNAP_DISTANCE;
            match cast_probe(physics, exclude, position, down, reach) {
                Some(hit) => position += down * (hit.distance - frame.half_height),
                None => {
                    movement.mode = MovementMode::Falling;
                    tracing::debug!(?position, "lost floor contact");
                }
            }
        }
        MovementMode::Falling => {
            movement.velocity += down * character.gravity_acceleration * dt;
            let step = movement.velocity * dt;
            let fall = step.dot(down);
            position += step - down * fall;

            let landing = if fall > 0.0 {
                cast_probe(physics, exclude, position, down, frame.half_height + fall)
            } else {
                None
            };
            match landing {
                Some(hit) => {
                    position += down * (hit.distance - frame.half_height);
                    movement.velocity -= down * movement.velocity.dot(down);
                    movement.mode = MovementMode::Grounded;
                    tracing::debug!(?position, "landed");
                }
                None => position += down * fall,
            }
        }
    }

    frame.position = position;
    if let Some(body) = physics.rigid_body_set.get_mut(character.body_handle) {
        body.set_next_kinematic_translation(Vector::new(position.x, position.y, position.z));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{SceneBodies, spawn_floor, spawn_planet};

    const DT: f32 = 1.0 / 60.0;

    fn planet_world() -> PhysicsWorld {
        let mut physics = PhysicsWorld::new();
        let mut scene = SceneBodies::new();
        spawn_planet(&mut physics, &mut scene, Vec3::ZERO, 5000.0, true);
        physics.step();
        physics
    }

    /// Steps movement with gravity pointing at the origin, as the planet
    /// gravity subsystem would.
    fn step_toward_center(
        physics: &mut PhysicsWorld,
        character: &CharacterBody,
        frame: &mut BodyFrame,
        movement: &mut MovementState,
        wish: Vec3,
        ticks: usize,
    ) {
        for _ in 0..ticks {
            movement.gravity_direction = -frame.position.normalize();
            character_movement_step(character, frame, movement, physics, wish, DT);
            physics.step();
        }
    }

    #[test]
    fn test_falling_character_lands_on_planet() {
        let mut physics = planet_world();
        let config = CharacterConfig::default();
        let (character, mut frame, mut movement) =
            spawn_character(&mut physics, Vec3::new(0.0, 0.0, 5400.0), &config);
        assert_eq!(movement.mode, MovementMode::Falling);

        step_toward_center(
            &mut physics,
            &character,
            &mut frame,
            &mut movement,
            Vec3::ZERO,
            120,
        );

        assert_eq!(movement.mode, MovementMode::Grounded);
        assert!(
            (frame.position.z - 5096.0).abs() < 1.0,
            "should rest on the surface, z={}",
            frame.position.z
        );
        assert!(movement.velocity.length() < 1e-3);
    }

    #[test]
    fn test_walking_follows_curved_surface() {
        let mut physics = planet_world();
        let config = CharacterConfig::default();
        let (character, mut frame, mut movement) =
            spawn_character(&mut physics, Vec3::new(0.0, 0.0, 5096.0), &config);
        movement.mode = MovementMode::Grounded;

        for _ in 0..120 {
            movement.gravity_direction = -frame.position.normalize();
            let up = frame.position.normalize();
            let wish = project_onto_plane(Vec3::X, up).normalize();
            character_movement_step(
                &character,
                &mut frame,
                &mut movement,
                &mut physics,
                wish,
                DT,
            );
            physics.step();
        }

        assert_eq!(movement.mode, MovementMode::Grounded);
        assert!(frame.position.x > 1000.0);
        assert!((frame.position.length() - 5096.0).abs() < 2.0);
    }

    #[test]
    fn test_walking_off_a_ledge_starts_falling() {
        let mut physics = PhysicsWorld::new();
        let mut scene = SceneBodies::new();
        spawn_floor(
            &mut physics,
            &mut scene,
            Vec3::new(0.0, 0.0, -10.0),
            Vec3::new(100.0, 100.0, 10.0),
        );
        physics.step();

        let config = CharacterConfig::default();
        let (character, mut frame, mut movement) =
            spawn_character(&mut physics, Vec3::new(0.0, 0.0, 96.0), &config);
        movement.mode = MovementMode::Grounded;

        for _ in 0..8 {
            character_movement_step(
                &character,
                &mut frame,
                &mut movement,
                &mut physics,
                Vec3::X,
                DT,
            );
            physics.step();
        }
        assert_eq!(movement.mode, MovementMode::Grounded);
        assert!((frame.position.z - 96.0).abs() < 1e-2);

        for _ in 0..30 {
            character_movement_step(
                &character,
                &mut frame,
                &mut movement,
                &mut physics,
                Vec3::X,
                DT,
            );
            physics.step();
        }
        assert_eq!(movement.mode, MovementMode::Falling);
        assert!(frame.position.z < 96.0);
    }

    #[test]
    fn test_launch_leaves_the_ground() {
        let mut movement = MovementState {
            mode: MovementMode::Grounded,
            gravity_direction: Vec3::NEG_X,
            ..Default::default()
        };
        movement.launch(300.0);
        assert_eq!(movement.mode, MovementMode::Falling);
        assert_eq!(movement.velocity, Vec3::new(300.0, 0.0, 0.0));
    }

    #[test]
    fn test_zero_gravity_direction_falls_down() {
        let mut physics = PhysicsWorld::new();
        let config = CharacterConfig::default();
        let (character, mut frame, mut movement) =
            spawn_character(&mut physics, Vec3::ZERO, &config);
        movement.gravity_direction = Vec3::ZERO;

        character_movement_step(
            &character,
            &mut frame,
            &mut movement,
            &mut physics,
            Vec3::ZERO,
            DT,
        );
        assert!(frame.position.z < 0.0);
        assert!(frame.position.is_finite());
    }

    #[test]
    fn test_kinematic_body_follows_frame() {
        let mut physics = PhysicsWorld::new();
        let config = CharacterConfig::default();
        let (character, mut frame, mut movement) =
            spawn_character(&mut physics, Vec3::new(0.0, 0.0, 500.0), &config);
        for _ in 0..10 {
            character_movement_step(
                &character,
                &mut frame,
                &mut movement,
                &mut physics,
                Vec3::ZERO,
                DT,
            );
            physics.step();
        }
        let body = physics.body_translation(character.body_handle).unwrap();
        assert!((body - frame.position).length() < 1e-3);
    }
}
