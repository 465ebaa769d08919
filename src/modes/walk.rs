//! First-person walking camera: fixed eye height, gravity, jumping and
//! ellipsoid collision against the scene's static boxes.

use std::f32::consts::PI;

use glam::Vec3;

use crate::camera::Camera;
use crate::config::{Pose, WalkSettings};
use crate::core::{DragTracker, InputEvent, KeyState, SharedInputSurface};
use crate::frame::FrameInfo;
use crate::math::rotation::{clamp_pitch, direction_from_angles, strafe_right};
use crate::math::{Ray, AABB};
use crate::traits::{Button, Controller, ModeKind, NavigationMode, SharedScene};

use super::handle::ModeHandle;

pub const GRAVITY: f32 = -9.81;
pub const JUMP_SPEED: f32 = 4.5;
/// Vertical speed below which the walker counts as standing on something
pub const GROUNDED_EPSILON: f32 = 0.01;
pub const COLLIDER_RADIUS: f32 = 0.4;
/// Obstacles up to this height are stepped onto instead of blocking
pub const STEP_HEIGHT: f32 = 0.35;
pub const LOOK_SENSITIVITY: f32 = 0.003;

/// Largest integration step; longer frames are split so a hitch cannot tunnel through the floor
const MAX_STEP: f32 = 1.0 / 30.0;

pub struct WalkMode {
    handle: ModeHandle,
    settings: WalkSettings,
    spawn: Pose,
    eye_height: f32,
    collider_radii: Vec3,
    walk_speed: f32,
    run_multiplier: f32,
    yaw: f32,
    pitch: f32,
    vertical_velocity: f32,
    keys: KeyState,
    drag: DragTracker,
    touch: DragTracker,
}

/// Ellipsoid half-extents covering the body from step height up to eye level
pub fn collider_radii_for(eye_height: f32) -> Vec3 {
    let half_height = ((eye_height - STEP_HEIGHT) * 0.5).max(0.05);
    Vec3::new(COLLIDER_RADIUS, half_height, COLLIDER_RADIUS)
}

fn collider_center(eye_position: Vec3, eye_height: f32, radii: Vec3) -> Vec3 {
    let feet = eye_position.y - eye_height;
    Vec3::new(eye_position.x, feet + STEP_HEIGHT + radii.y, eye_position.z)
}

fn collides(colliders: &[AABB], center: Vec3, radii: Vec3) -> bool {
    colliders.iter().any(|c| c.overlaps_ellipsoid(center, radii))
}

/// Highest walkable surface under the feet: the ground plane or the top of a
/// box no more than a step above the feet.
pub fn ground_height(colliders: &[AABB], ground_level: f32, eye_position: Vec3, eye_height: f32) -> f32 {
    let probe_top = eye_position.y - eye_height + STEP_HEIGHT;
    let probe = Ray::down(Vec3::new(eye_position.x, probe_top, eye_position.z));

    colliders
        .iter()
        .filter(|c| c.max.y <= probe_top && c.max.y > ground_level)
        .filter_map(|c| probe.hit_distance(c).map(|t| probe.at(t).y))
        .fold(ground_level, f32::max)
}

impl WalkMode {
    pub fn new(settings: WalkSettings) -> Self {
        let eye_height = settings.eye_height;
        let walk_speed = settings.walk_speed;
        let run_multiplier = settings.run_multiplier;
        Self {
            handle: ModeHandle::new(ModeKind::Walk),
            settings,
            spawn: Pose {
                position: Vec3::new(0.0, eye_height, 0.0),
                yaw: PI,
                pitch: 0.0,
            },
            eye_height,
            collider_radii: collider_radii_for(eye_height),
            walk_speed,
            run_multiplier,
            yaw: PI,
            pitch: 0.0,
            vertical_velocity: 0.0,
            keys: KeyState::new(),
            drag: DragTracker::new(),
            touch: DragTracker::new(),
        }
    }

    pub fn eye_height(&self) -> f32 {
        self.eye_height
    }

    pub fn collider_radii(&self) -> Vec3 {
        self.collider_radii
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    pub fn is_grounded(&self) -> bool {
        self.vertical_velocity.abs() < GROUNDED_EPSILON
    }

    pub fn spawn_pose(&self) -> Pose {
        self.spawn
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Change eye height, rescale the collider and keep the feet where they are
    pub fn set_eye_height(&mut self, eye_height: f32) {
        if !eye_height.is_finite() || eye_height <= STEP_HEIGHT {
            log::warn!("ignoring eye height {}", eye_height);
            return;
        }
        let old = self.eye_height;
        self.eye_height = eye_height;
        self.collider_radii = collider_radii_for(eye_height);
        if let Some(camera) = self.handle.camera_mut() {
            let feet = camera.position.y - old;
            camera.position.y = feet + eye_height;
            let (yaw, pitch) = (self.yaw, self.pitch);
            camera.look_angles(yaw, pitch);
        }
    }

    /// Start a jump; only allowed while grounded
    pub fn jump(&mut self) -> bool {
        if !self.handle.is_initialized() || !self.is_grounded() {
            return false;
        }
        self.vertical_velocity = JUMP_SPEED;
        true
    }

    fn apply_pose(&mut self, pose: Pose) {
        self.yaw = pose.yaw;
        self.pitch = clamp_pitch(pose.pitch);
        self.vertical_velocity = 0.0;
        let (yaw, pitch) = (self.yaw, self.pitch);
        if let Some(camera) = self.handle.camera_mut() {
            camera.position = pose.position;
            camera.look_angles(yaw, pitch);
        }
    }

    fn look(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * LOOK_SENSITIVITY;
        self.pitch = clamp_pitch(self.pitch - dy * LOOK_SENSITIVITY);
    }

    fn handle_event(&mut self, event: InputEvent) {
        if self.keys.apply(&event) {
            return;
        }
        match event {
            InputEvent::PointerDown { x, y } => self.drag.begin(x, y),
            InputEvent::PointerMove { x, y } => {
                if let Some((dx, dy)) = self.drag.move_to(x, y) {
                    self.look(dx, dy);
                }
            }
            InputEvent::PointerUp => self.drag.end(),
            InputEvent::TouchStart { x, y } => self.touch.begin(x, y),
            InputEvent::TouchMove { x, y } => {
                if let Some((dx, dy)) = self.touch.move_to(x, y) {
                    self.look(dx, dy);
                }
            }
            InputEvent::TouchEnd => self.touch.end(),
            _ => {}
        }
    }

    fn horizontal_velocity(&self) -> Vec3 {
        let keys = &self.keys;
        let forward = keys.axis(Button::KeyW, Button::KeyS) + keys.axis(Button::ArrowUp, Button::ArrowDown);
        let right = keys.axis(Button::KeyD, Button::KeyA) + keys.axis(Button::ArrowRight, Button::ArrowLeft);
        let wish = direction_from_angles(self.yaw, 0.0) * forward + strafe_right(self.yaw) * right;
        let wish = wish.normalize_or_zero();

        let speed = if keys.is_down(Button::Shift) {
            self.walk_speed * self.run_multiplier
        } else {
            self.walk_speed
        };
        wish * speed
    }

    fn integrate(&mut self, dt: f32) {
        let Some(scene) = self.handle.scene().cloned() else {
            return;
        };
        let scene = scene.borrow();
        let colliders = scene.colliders();
        let ground_level = scene.ground_level();

        if self.keys.is_down(Button::Space) {
            self.jump();
        }

        let velocity = self.horizontal_velocity();
        let (eye_height, radii) = (self.eye_height, self.collider_radii);
        let Some(mut position) = self.handle.camera().map(|c| c.position) else {
            return;
        };

        let mut remaining = dt;
        while remaining > 0.0 {
            let step = remaining.min(MAX_STEP);
            remaining -= step;

            // Horizontal: move one axis at a time so walls are slid along, not stuck to
            for axis_step in [Vec3::new(velocity.x * step, 0.0, 0.0), Vec3::new(0.0, 0.0, velocity.z * step)] {
                if axis_step == Vec3::ZERO {
                    continue;
                }
                let candidate = position + axis_step;
                if !collides(colliders, collider_center(candidate, eye_height, radii), radii) {
                    position = candidate;
                }
            }

            self.vertical_velocity += GRAVITY * step;
            position.y += self.vertical_velocity * step;

            let floor = ground_height(colliders, ground_level, position, eye_height) + eye_height;
            if position.y < floor {
                position.y = floor;
                self.vertical_velocity = 0.0;
            }
        }

        let (yaw, pitch) = (self.yaw, self.pitch);
        if let Some(camera) = self.handle.camera_mut() {
            camera.position = position;
            camera.look_angles(yaw, pitch);
        }
    }
}

impl NavigationMode for WalkMode {
    fn kind(&self) -> ModeKind {
        ModeKind::Walk
    }

    fn initialize(&mut self, scene: SharedScene, surface: SharedInputSurface) -> bool {
        let ground = scene.borrow().ground_level();
        self.spawn = match self.settings.spawn {
            Some(pose) => Pose {
                position: Vec3::new(
                    pose.position.x,
                    pose.position.y.max(ground + self.eye_height),
                    pose.position.z,
                ),
                ..pose
            },
            None => {
                log::warn!("no usable walk spawn configured, using fallback spawn");
                Pose {
                    position: Vec3::new(0.0, ground + self.eye_height, 0.0),
                    yaw: PI,
                    pitch: 0.0,
                }
            }
        };
        let camera = Camera::new(ModeKind::Walk.camera_name(), self.spawn.position);
        self.handle.bind(scene, surface, camera);
        self.apply_pose(self.spawn);
        log::info!("walk mode initialized at {:?}", self.spawn.position);
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
            log::debug!("walk reset ignored: not initialized");
            return;
        }
        self.keys.release_all();
        self.drag.end();
        self.touch.end();
        self.apply_pose(self.spawn);
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collider_spans_step_to_eye() {
        let radii = collider_radii_for(1.7);
        let center = collider_center(Vec3::new(0.0, 1.7, 0.0), 1.7, radii);
        assert!((center.y - radii.y - STEP_HEIGHT).abs() < 1e-6);
        assert!((center.y + radii.y - 1.7).abs() < 1e-6);
    }

    #[test]
    fn ground_height_prefers_low_box_under_feet() {
        let plinth = AABB::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 0.3, 1.0));
        let h = ground_height(&[plinth], 0.0, Vec3::new(0.0, 1.7, 0.0), 1.7);
        assert!((h - 0.3).abs() < 1e-5);
    }

    #[test]
    fn ground_height_ignores_tall_boxes_and_boxes_elsewhere() {
        let wall = AABB::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 3.0, 1.0));
        let aside = AABB::new(Vec3::new(5.0, 0.0, 5.0), Vec3::new(6.0, 0.2, 6.0));
        let h = ground_height(&[wall, aside], 0.0, Vec3::new(0.0, 1.7, 0.0), 1.7);
        assert_eq!(h, 0.0);
    }
}
