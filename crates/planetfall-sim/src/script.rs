//! Scripted player input for headless runs.
//!
//! The script is laid out in fractions of the run: settle after spawning,
//! walk while turning, switch gravity off, look around in flat mode, switch
//! gravity back on, strafe, and jump once while strafing.

use glam::Vec2;
use planetfall_config::InputConfig;

/// Input for a single tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputFrame {
    /// Raw mouse delta: x turns, y pitches.
    pub look_delta: Vec2,
    pub forward: f32,
    pub right: f32,
    /// Gravity on/off request issued this tick.
    pub toggle: Option<bool>,
    pub jump: bool,
}

impl InputFrame {
    /// Look delta converted to `(yaw, pitch)` degrees.
    pub fn look_degrees(&self, input: &InputConfig) -> (f32, f32) {
        let pitch_sign = if input.invert_y { -1.0 } else { 1.0 };
        (
            self.look_delta.x * input.mouse_sensitivity,
            self.look_delta.y * input.mouse_sensitivity * pitch_sign,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Settle,
    Walk,
    Flat,
    Strafe,
}

/// Deterministic input sequence scaled to the run length.
#[derive(Clone, Copy, Debug)]
pub struct InputScript {
    walk_from: u32,
    disable_at: u32,
    enable_at: u32,
    jump_at: u32,
}

impl InputScript {
    pub fn new(total_ticks: u32) -> Self {
        let at = |percent: u64| (u64::from(total_ticks) * percent / 100) as u32;
        Self {
            walk_from: at(20),
            disable_at: at(50),
            enable_at: at(60),
            jump_at: at(70),
        }
    }

    fn phase(&self, tick: u32) -> Phase {
        if tick < self.walk_from {
            Phase::Settle
        } else if tick < self.disable_at {
            Phase::Walk
        } else if tick < self.enable_at {
            Phase::Flat
        } else {
            Phase::Strafe
        }
    }

    pub fn frame(&self, tick: u32) -> InputFrame {
        let toggle = if tick == self.disable_at && self.walk_from < self.disable_at {
            Some(false)
        } else if tick == self.enable_at && self.disable_at < self.enable_at {
            Some(true)
        } else {
            None
        };

        let mut frame = match self.phase(tick) {
            Phase::Settle => InputFrame::default(),
            Phase::Walk => InputFrame {
                look_delta: Vec2::new(2.0, if tick < self.walk_from + 10 { 4.0 } else { 0.0 }),
                forward: 1.0,
                ..Default::default()
            },
            Phase::Flat => InputFrame {
                look_delta: Vec2::new(-3.0, -1.0),
                ..Default::default()
            },
            Phase::Strafe => InputFrame {
                forward: 0.5,
                right: 1.0,
                ..Default::default()
            },
        };
        frame.toggle = toggle;
        frame.jump = tick == self.jump_at && self.enable_at < self.jump_at;
        frame
    }
}
