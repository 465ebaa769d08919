use glam::Vec3;

use crate::math::rotation::{clamp_pitch, right_axis, rotate_about_axis, WORLD_UP};

/// Look-around rotation accumulated on top of a waypoint's authored direction.
/// `|pitch|` never exceeds `PITCH_LIMIT`; excess input is clamped, never rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RotationOffset {
    yaw: f32,
    pitch: f32,
}

impl RotationOffset {
    pub const ZERO: RotationOffset = RotationOffset { yaw: 0.0, pitch: 0.0 };

    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self {
            yaw,
            pitch: clamp_pitch(pitch),
        }
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn add(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch = clamp_pitch(self.pitch + delta_pitch);
    }

    pub fn set(&mut self, yaw: f32, pitch: f32) {
        *self = Self::new(yaw, pitch);
    }

    pub fn reset(&mut self) {
        *self = Self::ZERO;
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

/// Turns a base direction plus a rotation offset into the camera's look target
#[derive(Debug, Clone, Copy)]
pub struct OrientationComposer {
    lookahead: f32,
}

impl OrientationComposer {
    pub fn new(lookahead: f32) -> Self {
        Self { lookahead }
    }

    pub fn lookahead(&self) -> f32 {
        self.lookahead
    }

    /// Yaw about world up, then pitch about the base direction's horizontal axis
    pub fn compose_direction(&self, base_direction: Vec3, offset: RotationOffset) -> Vec3 {
        let base = base_direction.normalize_or_zero();
        let base = if base == Vec3::ZERO { Vec3::Z } else { base };

        let yawed = rotate_about_axis(base, WORLD_UP, offset.yaw());
        let pitch = clamp_pitch(offset.pitch());
        rotate_about_axis(yawed, right_axis(base), pitch)
    }

    pub fn look_target(&self, camera_position: Vec3, base_direction: Vec3, offset: RotationOffset) -> Vec3 {
        camera_position + self.compose_direction(base_direction, offset) * self.lookahead
    }
}
