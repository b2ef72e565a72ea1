//! Headless simulation: a planet, one gravity-driven character, and the
//! fixed-step schedule that moves it.

use bevy_ecs::prelude::*;
use glam::Vec3;
use planetfall_config::{Config, InputConfig};
use planetfall_gravity::frame::up_of;
use planetfall_gravity::{GravitySettings, MovementMode};
use planetfall_physics::{
    BodyFrame, CameraRig, FixedDelta, GravityBody, GravityToggle, LookInput, MoveInput,
    MovementState, PhysicsWorld, SceneBodies, build_gravity_schedule, spawn_gravity_character,
    spawn_planet,
};
use tracing::info;

use crate::script::InputScript;

/// Third-person arm length used for the player's camera rig.
const FOLLOW_ARM_LENGTH: f32 = 300.0;

/// Launch speed of the scripted jump, in units per second.
const JUMP_SPEED: f32 = 420.0;

/// Player state summary for reports and tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSnapshot {
    pub position: Vec3,
    pub up: Vec3,
    /// Distance of the body origin above the planet surface.
    pub altitude: f32,
    pub mode: MovementMode,
    pub gravity_direction: Vec3,
    pub gravity_enabled: bool,
    pub look_pitch_degrees: f32,
    /// World position of the third-person camera eye, if the rig has an arm.
    pub camera_eye: Option<Vec3>,
}

pub struct Simulation {
    world: World,
    schedule: Schedule,
    player: Entity,
    script: InputScript,
    input: InputConfig,
    planet_radius: f32,
    report_interval: u32,
    tick: u32,
}

impl Simulation {
    /// Builds the scene described by `config`: a planet at the origin and
    /// the player dropped above its north pole.
    pub fn new(config: &Config) -> Self {
        let dt = config.simulation.delta_seconds();
        let mut physics = PhysicsWorld::with_timestep(dt);
        let mut scene = SceneBodies::new();
        spawn_planet(
            &mut physics,
            &mut scene,
            Vec3::ZERO,
            config.planet.radius,
            config.planet.tagged,
        );
        physics.step();

        let mut world = World::new();
        world.insert_resource(physics);
        world.insert_resource(scene);
        world.insert_resource(FixedDelta(dt));

        let spawn = Vec3::Z * (config.planet.radius + config.character.spawn_altitude);
        let player = spawn_gravity_character(
            &mut world,
            spawn,
            &config.character,
            GravitySettings::from(&config.gravity),
            CameraRig::with_follow_arm(FOLLOW_ARM_LENGTH),
        );

        let mut schedule = Schedule::default();
        build_gravity_schedule(&mut schedule);

        info!(
            radius = config.planet.radius,
            tagged = config.planet.tagged,
            ?spawn,
            "simulation ready"
        );

        Self {
            world,
            schedule,
            player,
            script: InputScript::new(config.simulation.ticks),
            input: config.input.clone(),
            planet_radius: config.planet.radius,
            report_interval: config.debug.report_interval_ticks,
            tick: 0,
        }
    }

    pub fn tick(&self) -> u32 {
        self.tick
    }

    pub fn player(&self) -> Entity {
        self.player
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Feeds this tick's scripted input and runs the schedule once.
    pub fn step(&mut self) {
        let frame = self.script.frame(self.tick);
        let (yaw, pitch) = frame.look_degrees(&self.input);

        let mut player = self.world.entity_mut(self.player);
        if let Some(mut look) = player.get_mut::<LookInput>() {
            look.add(yaw, pitch);
        }
        if let Some(mut movement) = player.get_mut::<MoveInput>() {
            *movement = MoveInput {
                forward: frame.forward,
                right: frame.right,
            };
        }
        if frame.jump
            && let Some(mut movement) = player.get_mut::<MovementState>()
            && movement.mode == MovementMode::Grounded
        {
            movement.launch(JUMP_SPEED);
            info!(tick = self.tick, "jump");
        }
        if let Some(enabled) = frame.toggle {
            info!(tick = self.tick, enabled, "gravity toggle requested");
            player.insert(GravityToggle { enabled });
        }

        self.schedule.run(&mut self.world);
        self.tick += 1;

        if self.report_interval > 0 && self.tick % self.report_interval == 0 {
            self.report();
        }
    }

    pub fn run(&mut self, ticks: u32) {
        for _ in 0..ticks {
            self.step();
        }
    }

    pub fn snapshot(&self) -> Option<PlayerSnapshot> {
        let frame = self.world.get::<BodyFrame>(self.player)?;
        let movement = self.world.get::<MovementState>(self.player)?;
        let gravity = self.world.get::<GravityBody>(self.player)?;
        let camera_eye = self
            .world
            .get::<CameraRig>(self.player)
            .and_then(|rig| rig.third_person_eye(frame.position, frame.orientation));
        Some(PlayerSnapshot {
            position: frame.position,
            up: up_of(frame.orientation),
            altitude: frame.position.length() - self.planet_radius,
            mode: movement.mode,
            gravity_direction: gravity.0.gravity_direction(),
            gravity_enabled: gravity.0.is_enabled(),
            look_pitch_degrees: gravity.0.view().pitch_radians.to_degrees(),
            camera_eye,
        })
    }

    fn report(&self) {
        let Some(state) = self.snapshot() else {
            return;
        };
        info!(
            tick = self.tick,
            position = ?state.position,
            altitude = state.altitude,
            mode = ?state.mode,
            up = ?state.up,
            gravity = ?state.gravity_direction,
            enabled = state.gravity_enabled,
            pitch = state.look_pitch_degrees,
            eye = ?state.camera_eye,
            "player state"
        );
    }
}
