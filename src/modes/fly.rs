//! Free camera: keyboard translation, pointer look, no gravity or collision.

use std::f32::consts::PI;

use glam::Vec3;

use crate::camera::Camera;
use crate::config::{FlySettings, Pose};
use crate::core::{DragTracker, InputEvent, KeyState, SharedInputSurface};
use crate::frame::FrameInfo;
use crate::math::rotation::{clamp_pitch, direction_from_angles, strafe_right};
use crate::traits::{Button, Controller, ModeKind, NavigationMode, SharedScene};

use super::handle::ModeHandle;

/// Used when no (valid) start pose is configured: 3 m up, facing back along -Z
pub const FALLBACK_POSE: Pose = Pose {
    position: Vec3::new(0.0, 3.0, 0.0),
    yaw: PI,
    pitch: 0.0,
};

/// Keyboard yaw rate for Q/E in radians per second
pub const KEY_TURN_RATE: f32 = 1.2;

pub struct FlyMode {
    handle: ModeHandle,
    settings: FlySettings,
    start_pose: Pose,
    yaw: f32,
    pitch: f32,
    speed: f32,
    sensitivity: f32,
    keys: KeyState,
    drag: DragTracker,
    touch: DragTracker,
}

impl FlyMode {
    pub fn new(settings: FlySettings) -> Self {
        let speed = settings.speed;
        let sensitivity = settings.sensitivity;
        Self {
            handle: ModeHandle::new(ModeKind::Fly),
            settings,
            start_pose: FALLBACK_POSE,
            yaw: FALLBACK_POSE.yaw,
            pitch: FALLBACK_POSE.pitch,
            speed,
            sensitivity,
            keys: KeyState::new(),
            drag: DragTracker::new(),
            touch: DragTracker::new(),
        }
    }

    /// Movement speed in metres per second; non-positive values are rejected
    pub fn set_speed(&mut self, speed: f32) {
        if speed.is_finite() && speed > 0.0 {
            self.speed = speed;
        } else {
            log::warn!("ignoring fly speed {}", speed);
        }
    }

    /// Look sensitivity in radians per pixel; non-positive values are rejected
    pub fn set_sensitivity(&mut self, sensitivity: f32) {
        if sensitivity.is_finite() && sensitivity > 0.0 {
            self.sensitivity = sensitivity;
        } else {
            log::warn!("ignoring fly sensitivity {}", sensitivity);
        }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    /// Pose `reset` returns to
    pub fn start_pose(&self) -> Pose {
        self.start_pose
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    fn apply_pose(&mut self, pose: Pose) {
        self.yaw = pose.yaw;
        self.pitch = clamp_pitch(pose.pitch);
        if let Some(camera) = self.handle.camera_mut() {
            camera.position = pose.position;
            camera.look_angles(self.yaw, self.pitch);
        }
    }

    fn look(&mut self, dx: f32, dy: f32, sensitivity: f32) {
        self.yaw += dx * sensitivity;
        self.pitch = clamp_pitch(self.pitch - dy * sensitivity);
    }

    fn handle_event(&mut self, event: InputEvent) {
        if self.keys.apply(&event) {
            return;
        }
        match event {
            InputEvent::PointerDown { x, y } => self.drag.begin(x, y),
            InputEvent::PointerMove { x, y } => {
                if let Some((dx, dy)) = self.drag.move_to(x, y) {
                    self.look(dx, dy, self.sensitivity);
                }
            }
            InputEvent::PointerUp => self.drag.end(),
            InputEvent::TouchStart { x, y } => self.touch.begin(x, y),
            InputEvent::TouchMove { x, y } => {
                if let Some((dx, dy)) = self.touch.move_to(x, y) {
                    self.look(dx, dy, self.sensitivity);
                }
            }
            InputEvent::TouchEnd => self.touch.end(),
            _ => {}
        }
    }

    fn integrate(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        let keys = &self.keys;
        let forward_axis = keys.axis(Button::KeyW, Button::KeyS) + keys.axis(Button::ArrowUp, Button::ArrowDown);
        let right_axis = keys.axis(Button::KeyD, Button::KeyA) + keys.axis(Button::ArrowRight, Button::ArrowLeft);
        let up_axis = keys.axis(Button::Space, Button::Shift);
        let turn = keys.axis(Button::KeyE, Button::KeyQ);

        self.yaw += turn * KEY_TURN_RATE * dt;

        let forward = direction_from_angles(self.yaw, self.pitch);
        let displacement = forward * forward_axis.clamp(-1.0, 1.0)
            + strafe_right(self.yaw) * right_axis.clamp(-1.0, 1.0)
            + Vec3::Y * up_axis;

        let (yaw, pitch) = (self.yaw, self.pitch);
        let step = self.speed * dt;
        if let Some(camera) = self.handle.camera_mut() {
            camera.position += displacement * step;
            camera.look_angles(yaw, pitch);
        }
    }
}

impl NavigationMode for FlyMode {
    fn kind(&self) -> ModeKind {
        ModeKind::Fly
    }

    fn initialize(&mut self, scene: SharedScene, surface: SharedInputSurface) -> bool {
        self.start_pose = match self.settings.start {
            Some(pose) => pose,
            None => {
                log::warn!("no usable fly camera pose configured, using fallback pose");
                FALLBACK_POSE
            }
        };
        let camera = Camera::new(ModeKind::Fly.camera_name(), self.start_pose.position);
        self.handle.bind(scene, surface, camera);
        self.apply_pose(self.start_pose);
        log::info!("fly mode initialized at {:?}", self.start_pose.position);
        true
    }

    fn enable(&mut self) {
        self.handle.enable();
    }

    fn disable(&mut self) {
        if self.handle.disable() {
            self.keys.release_all();
            self.drag.end();
            self.touch.end();
        }
    }

    fn reset(&mut self) {
        if !self.handle.is_initialized() {
            log::debug!("fly reset ignored: not initialized");
            return;
        }
        self.keys.release_all();
        self.drag.end();
        self.touch.end();
        self.apply_pose(self.start_pose);
        self.handle.publish_camera();
    }

    fn dispose(&mut self) {
        self.handle.dispose();
        self.keys.release_all();
        self.drag.end();
        self.touch.end();
    }

    fn camera(&self) -> Option<&Camera> {
        self.handle.camera()
    }

    fn is_enabled(&self) -> bool {
        self.handle.is_enabled()
    }

    fn update(&mut self, frame: &FrameInfo) {
        if !self.handle.is_enabled() {
            return;
        }
        for event in self.handle.drain_input() {
            self.handle_event(event);
        }
        self.integrate(frame.delta);
        self.handle.publish_camera();
    }
}
