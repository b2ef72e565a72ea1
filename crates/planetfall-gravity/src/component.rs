//! Per-body gravity state and the tick driver that runs the four phases in
//! order: source selection, body alignment, view and camera composition,
//! ground contact recovery.

use glam::{Quat, Vec3};

use crate::alignment::align_body;
use crate::camera::{
    compose_view_orientation, drive_cameras, mirror_control_rotation, release_cameras,
};
use crate::collaborators::{BodyTransform, Collaborators, OrientationChange};
use crate::frame::{WORLD_DOWN, WORLD_UP, is_nearly_zero, safe_normal};
use crate::ground::recover_ground_contact;
use crate::look::{FlatLook, MovementAxes, movement_axes};
use crate::settings::GravitySettings;
use crate::source::select_gravity_direction;
use crate::view::ViewState;

/// Planet-relative gravity for one controlled body.
///
/// Owns the current gravity direction (zero when no source qualifies), the
/// gravity-relative view decomposition, and the flat look used when
/// gravity-relative look is off. Never shared between bodies.
#[derive(Clone, Debug)]
pub struct PlanetGravity {
    settings: GravitySettings,
    gravity_direction: Vec3,
    view: ViewState,
    flat_look: FlatLook,
    enabled: bool,
}

impl Default for PlanetGravity {
    fn default() -> Self {
        Self::new(GravitySettings::default())
    }
}

impl PlanetGravity {
    pub fn new(settings: GravitySettings) -> Self {
        Self {
            settings,
            gravity_direction: Vec3::ZERO,
            view: ViewState::default(),
            flat_look: FlatLook::default(),
            enabled: true,
        }
    }

    pub fn settings(&self) -> &GravitySettings {
        &self.settings
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Direction gravity currently pulls. Zero means no source was found.
    pub fn gravity_direction(&self) -> Vec3 {
        self.gravity_direction
    }

    /// Up opposing gravity, or world up when there is no gravity source.
    pub fn gravity_up(&self) -> Vec3 {
        if is_nearly_zero(self.gravity_direction) {
            WORLD_UP
        } else {
            safe_normal(-self.gravity_direction)
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn flat_look(&self) -> &FlatLook {
        &self.flat_look
    }

    /// Whether look input currently feeds the gravity-relative view.
    pub fn uses_gravity_relative_look(&self) -> bool {
        self.enabled && self.settings.use_gravity_relative_look
    }

    /// Runs one tick. While disabled only the flat-mode tick runs.
    pub fn update(&mut self, dt: f32, collaborators: &mut Collaborators<'_>) {
        if !self.enabled {
            self.update_flat_mode(collaborators);
            return;
        }
        self.update_gravity_source(collaborators);
        self.update_alignment(dt, collaborators);
        self.update_cameras(collaborators);
        self.update_ground_contact(collaborators);
    }

    /// Picks this tick's gravity direction and hands it to the movement solver.
    ///
    /// The solver never sees the zero sentinel; it is told world down instead.
    pub fn update_gravity_source(&mut self, collaborators: &mut Collaborators<'_>) {
        let direction =
            select_gravity_direction(collaborators.body.position(), collaborators.world);

        let had_source = !is_nearly_zero(self.gravity_direction);
        let has_source = !is_nearly_zero(direction);
        if had_source != has_source {
            if has_source {
                tracing::debug!(direction = ?direction, "gravity source acquired");
            } else {
                tracing::debug!("gravity source lost");
            }
        }

        self.gravity_direction = direction;
        if let Some(movement) = collaborators.movement.as_deref_mut() {
            movement.set_gravity_direction(if has_source { direction } else { WORLD_DOWN });
        }
    }

    /// Turns the body so its up opposes gravity.
    pub fn update_alignment(&mut self, dt: f32, collaborators: &mut Collaborators<'_>) {
        if !self.settings.align_enabled {
            return;
        }
        let view = self.settings.use_gravity_relative_look.then_some(&self.view);
        align_body(
            &mut *collaborators.body,
            self.gravity_direction,
            view,
            self.settings.align_interp_speed,
            dt,
        );
    }

    /// Brings the view decomposition up to date and orients camera nodes.
    ///
    /// With gravity-relative look off, cameras mirror the flat look. With
    /// alignment off or no gravity source, they are handed back to the
    /// host's look controller untouched.
    pub fn update_cameras(&mut self, collaborators: &mut Collaborators<'_>) {
        if !self.settings.use_gravity_relative_look {
            mirror_control_rotation(&mut collaborators.cameras, self.flat_look.orientation());
            return;
        }
        if !self.settings.align_enabled || is_nearly_zero(self.gravity_direction) {
            release_cameras(&mut collaborators.cameras);
            return;
        }

        let up = self.gravity_up();
        self.view.ensure_initialized(
            up,
            collaborators.body.forward(),
            self.settings.max_look_pitch_radians(),
        );
        if let Some(orientation) = compose_view_orientation(&self.view, up) {
            drive_cameras(&mut collaborators.cameras, orientation);
        }
    }

    /// Disabled tick: the body turns with the flat look yaw and cameras
    /// mirror the flat look.
    pub fn update_flat_mode(&mut self, collaborators: &mut Collaborators<'_>) {
        let yaw = self.flat_look.yaw_orientation();
        if collaborators.body.orientation() != yaw {
            collaborators
                .body
                .set_orientation(yaw, OrientationChange::Immediate);
        }
        mirror_control_rotation(&mut collaborators.cameras, self.flat_look.orientation());
    }

    /// Flips a falling body back to grounded when a surface is just below it.
    pub fn update_ground_contact(&mut self, collaborators: &mut Collaborators<'_>) -> bool {
        let Some(movement) = collaborators.movement.as_deref_mut() else {
            return false;
        };
        recover_ground_contact(
            movement,
            &*collaborators.body,
            collaborators.world,
            self.gravity_direction,
            &self.settings,
        )
    }

    /// Accumulates look input in degrees. Positive yaw turns left, positive
    /// pitch looks up.
    ///
    /// Routed to the flat look when gravity-relative look is off or the
    /// subsystem is disabled; ignored by the gravity-relative view while
    /// there is no gravity source.
    pub fn apply_look_input(
        &mut self,
        yaw_degrees: f32,
        pitch_degrees: f32,
        body: &dyn BodyTransform,
    ) {
        let max_pitch = self.settings.max_look_pitch_radians();
        if !self.uses_gravity_relative_look() {
            self.flat_look.apply(yaw_degrees, pitch_degrees, max_pitch);
            return;
        }
        if is_nearly_zero(self.gravity_direction) {
            return;
        }
        let up = self.gravity_up();
        self.view
            .apply_look(up, yaw_degrees, pitch_degrees, max_pitch, body.forward());
    }

    /// Current look orientation: the gravity-relative view when it is active,
    /// otherwise the flat look.
    pub fn look_orientation(&self) -> Option<Quat> {
        if !self.uses_gravity_relative_look() {
            return Some(self.flat_look.orientation());
        }
        if !self.view.initialized || is_nearly_zero(self.gravity_direction) {
            return None;
        }
        compose_view_orientation(&self.view, self.gravity_up())
    }

    /// Walk/strafe axes for input on the current surface.
    ///
    /// Steers by the view tangent when the gravity-relative view is live,
    /// otherwise by the flat look yaw or the body's forward.
    pub fn movement_axes(&self, body: &dyn BodyTransform) -> MovementAxes {
        let up = self.gravity_up();
        let reference = if !self.uses_gravity_relative_look() {
            self.flat_look.yaw_orientation() * Vec3::X
        } else if self.view.initialized {
            self.view.tangent_forward
        } else {
            body.forward()
        };
        movement_axes(up, reference, body.forward())
    }

    /// Turns gravity processing on or off.
    ///
    /// Disabling leaves the body in flat mode: gravity points world down,
    /// the view decomposition is dropped, the body stands upright facing
    /// world +X, and cameras follow the flat look from then on. Enabling resumes normal ticks;
    /// the view is rebuilt from the body on first use.
    pub fn set_enabled(&mut self, enabled: bool, collaborators: &mut Collaborators<'_>) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;

        if enabled {
            tracing::info!("planet gravity enabled");
            return;
        }

        self.gravity_direction = WORLD_DOWN;
        self.view.invalidate();
        self.flat_look.reset();
        if let Some(movement) = collaborators.movement.as_deref_mut() {
            movement.set_gravity_direction(WORLD_DOWN);
        }
        self.update_flat_mode(collaborators);
        tracing::info!("planet gravity disabled, flat mode");
    }
}

#[cfg(test)]
#[path = "component_tests.rs"]
mod tests;
