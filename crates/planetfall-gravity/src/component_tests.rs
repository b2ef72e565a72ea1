//! Tests for the per-body tick driver.

use glam::{Quat, Vec3};

use super::*;
use crate::collaborators::{CandidateBody, MovementMode, OrientationChange};
use crate::frame::{angular_distance, basis_from_forward_up, forward_of};
use crate::testing::{MockBody, MockCamera, MockMovement, MockWorld, collaborators};

const DT: f32 = 0.05;

fn tick(
    gravity: &mut PlanetGravity,
    body: &mut MockBody,
    movement: &mut MockMovement,
    world: &MockWorld,
) {
    let mut c = collaborators(body, Some(movement), None, None, world);
    gravity.update(DT, &mut c);
}

fn tick_with_cameras(
    gravity: &mut PlanetGravity,
    body: &mut MockBody,
    first: &mut MockCamera,
    arm: &mut MockCamera,
    world: &MockWorld,
) {
    let mut c = collaborators(body, None, Some(first), Some(arm), world);
    gravity.update(DT, &mut c);
}

fn planet_at_origin() -> MockWorld {
    MockWorld {
        candidates: vec![CandidateBody {
            position: Vec3::ZERO,
            scale: Vec3::splat(10.0),
        }],
        ..Default::default()
    }
}

#[test]
fn test_end_to_end_planet_scenario() {
    // Selector: untagged uniform sphere at the origin, body above it.
    let world = planet_at_origin();
    let mut gravity = PlanetGravity::default();
    let mut body = MockBody::at(Vec3::new(0.0, 0.0, 500.0));
    let mut movement = MockMovement::default();
    {
        let mut c = collaborators(&mut body, Some(&mut movement), None, None, &world);
        gravity.update_gravity_source(&mut c);
    }
    assert!(gravity.gravity_direction().dot(Vec3::NEG_Z) > 0.99);
    assert_eq!(movement.gravity_direction, Some(gravity.gravity_direction()));

    // Alignment: gravity along +X for 60 ticks.
    let side = MockWorld::with_tagged(vec![Vec3::new(1000.0, 0.0, 0.0)]);
    let mut body = MockBody::at(Vec3::ZERO);
    for _ in 0..60 {
        tick(&mut gravity, &mut body, &mut movement, &side);
    }
    assert!(gravity.gravity_direction().dot(Vec3::X) > 0.999);
    assert!(body.up().dot(Vec3::NEG_X) > 0.99);

    // View: up +Z, forward +X, yaw then pitch.
    let below = MockWorld::with_tagged(vec![Vec3::new(0.0, 0.0, -1000.0)]);
    let mut gravity = PlanetGravity::default();
    let mut body = MockBody::at(Vec3::ZERO);
    tick(&mut gravity, &mut body, &mut movement, &below);
    assert!(gravity.view().initialized);
    assert!(gravity.view().tangent_forward.dot(Vec3::X) > 0.999);

    gravity.apply_look_input(90.0, 0.0, &body);
    let tangent = gravity.view().tangent_forward;
    assert!(tangent.dot(Vec3::Y) > 0.95);

    let pitch = gravity.view().pitch_radians;
    gravity.apply_look_input(0.0, 10.0, &body);
    assert!(gravity.view().pitch_radians > pitch);
    assert!(gravity.view().tangent_forward.dot(tangent) > 0.99999);
}

#[test]
fn test_alignment_uses_this_ticks_gravity() {
    let world = MockWorld::with_tagged(vec![Vec3::new(1000.0, 0.0, 0.0)]);
    let mut gravity = PlanetGravity::new(GravitySettings {
        align_interp_speed: 2.0,
        ..Default::default()
    });
    let mut body = MockBody::at(Vec3::ZERO);
    let mut movement = MockMovement::default();

    tick(&mut gravity, &mut body, &mut movement, &world);
    assert_eq!(body.last_change, Some(OrientationChange::Smoothed));
    assert!(body.up().dot(Vec3::NEG_X) > 0.0);
}

#[test]
fn test_no_source_is_a_no_op_for_every_phase() {
    let world = MockWorld::default();
    let mut gravity = PlanetGravity::default();
    let mut body = MockBody::at(Vec3::new(3.0, 4.0, 5.0));
    body.orientation = Quat::from_rotation_y(0.6);
    let before = body.orientation;
    let mut movement = MockMovement::default();
    let mut first = MockCamera::default();
    let mut arm = MockCamera::default();

    {
        let mut c = collaborators(
            &mut body,
            Some(&mut movement),
            Some(&mut first),
            Some(&mut arm),
            &world,
        );
        gravity.update(DT, &mut c);
    }
    gravity.apply_look_input(45.0, 45.0, &body);

    assert_eq!(gravity.gravity_direction(), Vec3::ZERO);
    assert_eq!(gravity.gravity_up(), Vec3::Z);
    assert_eq!(body.orientation, before);
    assert!(body.last_change.is_none());
    assert_eq!(*gravity.view(), ViewState::default());
    assert!(first.orientation.is_none());
    assert!(arm.orientation.is_none());
    // The solver is never handed the zero sentinel.
    assert_eq!(movement.gravity_direction, Some(Vec3::NEG_Z));
}

#[test]
fn test_body_without_movement_or_cameras_still_aligns() {
    let world = MockWorld::with_tagged(vec![Vec3::new(0.0, -800.0, 0.0)]);
    let mut gravity = PlanetGravity::default();
    let mut body = MockBody::at(Vec3::ZERO);

    for _ in 0..10 {
        let mut c = collaborators(&mut body, None, None, None, &world);
        gravity.update(DT, &mut c);
    }
    assert!(body.up().dot(Vec3::Y) > 0.999);
}

#[test]
fn test_camera_orientation_matches_gravity_relative_basis() {
    // Source above the body: up is world down.
    let world = MockWorld::with_tagged(vec![Vec3::new(0.0, 0.0, 1000.0)]);
    let mut gravity = PlanetGravity::default();
    let mut body = MockBody::at(Vec3::ZERO);
    let mut first = MockCamera::default();
    let mut arm = MockCamera::default();

    tick_with_cameras(&mut gravity, &mut body, &mut first, &mut arm, &world);

    let expected = basis_from_forward_up(Vec3::X, Vec3::NEG_Z).unwrap();
    let actual = first.orientation.unwrap();
    assert!(angular_distance(actual, expected) < 1.0_f32.to_radians());
}

#[test]
fn test_third_person_arm_matches_first_person_root() {
    let world = MockWorld::with_tagged(vec![Vec3::new(0.0, 0.0, 1000.0)]);
    let mut gravity = PlanetGravity::default();
    let mut body = MockBody::at(Vec3::ZERO);
    let mut first = MockCamera::default();
    let mut arm = MockCamera::default();

    tick_with_cameras(&mut gravity, &mut body, &mut first, &mut arm, &world);
    gravity.apply_look_input(30.0, -20.0, &body);
    tick_with_cameras(&mut gravity, &mut body, &mut first, &mut arm, &world);

    let (root, boom) = (first.orientation.unwrap(), arm.orientation.unwrap());
    assert!(angular_distance(root, boom) < 1.0_f32.to_radians());
    assert!(!arm.follows_control_rotation);
}

#[test]
fn test_pitch_survives_travel_around_the_planet() {
    let world = planet_at_origin();
    let mut gravity = PlanetGravity::default();
    let mut body = MockBody::at(Vec3::new(0.0, 0.0, 500.0));
    let mut movement = MockMovement::default();
    let max_pitch = gravity.settings().max_look_pitch_radians();

    tick(&mut gravity, &mut body, &mut movement, &world);
    gravity.apply_look_input(0.0, 20.0, &body);

    // Walk a quarter orbit in small steps, looking up and down on the way.
    for step in 1..=90 {
        let angle = (step as f32).to_radians();
        body.position = Vec3::new(angle.sin(), 0.0, angle.cos()) * 500.0;
        tick(&mut gravity, &mut body, &mut movement, &world);
        gravity.apply_look_input(1.0, if step % 2 == 0 { 400.0 } else { -3.0 }, &body);

        let view = gravity.view();
        assert!(view.pitch_radians.abs() <= max_pitch);
        assert!(view.tangent_forward.dot(view.up).abs() < 1e-4);
        assert!(view.tangent_forward.is_finite());
    }
    assert!(body.up().dot(Vec3::X) > 0.99);
}

#[test]
fn test_ground_contact_recovered_during_tick() {
    let mut world = MockWorld::with_tagged(vec![Vec3::new(0.0, 0.0, -1000.0)]);
    world.surface_distance = Some(4.0);
    let mut gravity = PlanetGravity::default();
    let mut body = MockBody::at(Vec3::ZERO);
    let mut movement = MockMovement {
        mode: MovementMode::Falling,
        velocity: Vec3::new(0.0, 0.0, -200.0),
        ..Default::default()
    };

    tick(&mut gravity, &mut body, &mut movement, &world);
    assert_eq!(movement.mode, MovementMode::Grounded);
}

#[test]
fn test_ground_contact_skipped_while_ascending() {
    let mut world = MockWorld::with_tagged(vec![Vec3::new(0.0, 0.0, -1000.0)]);
    world.surface_distance = Some(4.0);
    let mut gravity = PlanetGravity::default();
    let mut body = MockBody::at(Vec3::ZERO);
    let mut movement = MockMovement {
        mode: MovementMode::Falling,
        velocity: Vec3::new(0.0, 0.0, 400.0),
        ..Default::default()
    };

    tick(&mut gravity, &mut body, &mut movement, &world);
    assert_eq!(movement.mode, MovementMode::Falling);
}

#[test]
fn test_flat_look_mode_mirrors_control_rotation() {
    let world = planet_at_origin();
    let mut gravity = PlanetGravity::new(GravitySettings {
        use_gravity_relative_look: false,
        ..Default::default()
    });
    let mut body = MockBody::at(Vec3::new(0.0, 0.0, 500.0));
    let mut first = MockCamera::default();
    let mut arm = MockCamera {
        follows_control_rotation: false,
        ..Default::default()
    };

    gravity.apply_look_input(90.0, 0.0, &body);
    tick_with_cameras(&mut gravity, &mut body, &mut first, &mut arm, &world);

    assert!(!gravity.view().initialized);
    assert!(arm.follows_control_rotation);
    assert!(forward_of(first.orientation.unwrap()).dot(Vec3::Y) > 0.999);
    assert_eq!(first.orientation, arm.orientation);
}

#[test]
fn test_alignment_disabled_hands_cameras_back() {
    let world = planet_at_origin();
    let mut gravity = PlanetGravity::new(GravitySettings {
        align_enabled: false,
        ..Default::default()
    });
    let mut body = MockBody::at(Vec3::new(500.0, 0.0, 0.0));
    let mut first = MockCamera::default();
    let mut arm = MockCamera {
        follows_control_rotation: false,
        ..Default::default()
    };

    tick_with_cameras(&mut gravity, &mut body, &mut first, &mut arm, &world);

    assert_eq!(body.orientation, Quat::IDENTITY);
    assert!(arm.follows_control_rotation);
    assert!(first.orientation.is_none());
}

#[test]
fn test_disable_falls_back_to_flat_mode_and_recovers() {
    let world = MockWorld::with_tagged(vec![Vec3::new(1000.0, 0.0, 0.0)]);
    let mut gravity = PlanetGravity::default();
    let mut body = MockBody::at(Vec3::ZERO);
    let mut movement = MockMovement::default();
    let mut first = MockCamera::default();
    let mut arm = MockCamera::default();

    for _ in 0..5 {
        let mut c = collaborators(
            &mut body,
            Some(&mut movement),
            Some(&mut first),
            Some(&mut arm),
            &world,
        );
        gravity.update(DT, &mut c);
    }
    assert!(gravity.view().initialized);
    assert!(!arm.follows_control_rotation);

    {
        let mut c = collaborators(
            &mut body,
            Some(&mut movement),
            Some(&mut first),
            Some(&mut arm),
            &world,
        );
        gravity.set_enabled(false, &mut c);
    }
    assert!(!gravity.is_enabled());
    assert_eq!(gravity.gravity_direction(), Vec3::NEG_Z);
    assert!(!gravity.view().initialized);
    assert_eq!(movement.gravity_direction, Some(Vec3::NEG_Z));
    assert_eq!(first.orientation, Some(Quat::IDENTITY));
    assert!(arm.follows_control_rotation);

    // The body stands upright again; disabled ticks keep it there.
    assert_eq!(body.orientation, Quat::IDENTITY);
    for _ in 0..5 {
        let mut c = collaborators(&mut body, Some(&mut movement), None, None, &world);
        gravity.update(DT, &mut c);
    }
    assert_eq!(body.orientation, Quat::IDENTITY);
    assert_eq!(movement.gravity_direction, Some(Vec3::NEG_Z));

    // Look input goes to the flat look, which body and cameras follow.
    gravity.apply_look_input(45.0, 0.0, &body);
    assert!(!gravity.view().initialized);
    assert!(gravity.flat_look().yaw_radians > 0.0);
    {
        let mut c = collaborators(
            &mut body,
            Some(&mut movement),
            Some(&mut first),
            Some(&mut arm),
            &world,
        );
        gravity.update(DT, &mut c);
    }
    let heading = Vec3::new(1.0, 1.0, 0.0).normalize();
    assert!(forward_of(body.orientation).dot(heading) > 0.999);
    assert!(forward_of(first.orientation.unwrap()).dot(heading) > 0.999);
    assert!(first.follows_control_rotation);

    {
        let mut c = collaborators(
            &mut body,
            Some(&mut movement),
            Some(&mut first),
            Some(&mut arm),
            &world,
        );
        gravity.set_enabled(true, &mut c);
        gravity.update(DT, &mut c);
    }
    assert!(gravity.gravity_direction().dot(Vec3::X) > 0.999);
    assert!(gravity.view().initialized);
    assert!((gravity.view().up - Vec3::NEG_X).length() < 1e-5);
    assert!(!arm.follows_control_rotation);
}

#[test]
fn test_movement_axes_follow_surface() {
    let world = MockWorld::with_tagged(vec![Vec3::new(0.0, 0.0, -1000.0)]);
    let mut gravity = PlanetGravity::default();
    let mut body = MockBody::at(Vec3::ZERO);
    let mut movement = MockMovement::default();

    tick(&mut gravity, &mut body, &mut movement, &world);
    gravity.apply_look_input(90.0, 30.0, &body);

    let axes = gravity.movement_axes(&body);
    assert!(axes.forward.dot(Vec3::Y) > 0.999);
    assert!(axes.right.dot(Vec3::X) > 0.999);
}

#[test]
fn test_look_orientation_tracks_mode() {
    let world = MockWorld::with_tagged(vec![Vec3::new(0.0, 0.0, -1000.0)]);
    let mut gravity = PlanetGravity::default();
    let mut body = MockBody::at(Vec3::ZERO);
    let mut movement = MockMovement::default();

    assert!(gravity.look_orientation().is_none());
    tick(&mut gravity, &mut body, &mut movement, &world);
    let look = gravity.look_orientation().unwrap();
    assert!(forward_of(look).dot(Vec3::X) > 0.999);
}
