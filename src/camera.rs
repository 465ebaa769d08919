use glam::{Mat4, Vec3};

use crate::math::rotation::{direction_from_angles, WORLD_UP};

/// Vertical field of view in radians until a mode sets one
pub const DEFAULT_FOV: f32 = 0.8;
pub const NEAR_PLANE: f32 = 0.05;
pub const FAR_PLANE: f32 = 2000.0;

/// Authoritative pose of a camera at an instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub position: Vec3,
    pub fov_radians: f32,
}

/// Camera allocated and owned by a navigation mode
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub name: &'static str,
    pub position: Vec3,
    pub target: Vec3,
    pub fov: f32,
}

impl Camera {
    pub fn new(name: &'static str, position: Vec3) -> Self {
        Self {
            name,
            position,
            target: position + Vec3::Z,
            fov: DEFAULT_FOV,
        }
    }

    pub fn state(&self) -> CameraState {
        CameraState {
            position: self.position,
            fov_radians: self.fov,
        }
    }

    /// Move and re-lens the camera; the target is left for the caller to aim
    pub fn apply_state(&mut self, state: CameraState) {
        self.position = state.position;
        self.fov = state.fov_radians;
    }

    /// Unit vector from position to target
    pub fn look_direction(&self) -> Vec3 {
        let dir = (self.target - self.position).normalize_or_zero();
        if dir == Vec3::ZERO { Vec3::Z } else { dir }
    }

    /// Point the camera along `direction`, placing the target `distance` ahead
    pub fn look_along(&mut self, direction: Vec3, distance: f32) {
        self.target = self.position + direction.normalize_or_zero() * distance;
    }

    /// Point the camera from yaw/pitch angles in radians
    pub fn look_angles(&mut self, yaw: f32, pitch: f32) {
        self.target = self.position + direction_from_angles(yaw, pitch);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_lh(self.position, self.position + self.look_direction(), WORLD_UP)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_lh(self.fov, aspect.max(f32::EPSILON), NEAR_PLANE, FAR_PLANE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_camera_looks_down_positive_z() {
        let camera = Camera::new("test", Vec3::new(0.0, 1.7, 0.0));
        assert_eq!(camera.look_direction(), Vec3::Z);
        assert_eq!(camera.fov, DEFAULT_FOV);
    }

    #[test]
    fn look_along_places_target_ahead() {
        let mut camera = Camera::new("test", Vec3::ZERO);
        camera.look_along(Vec3::new(3.0, 0.0, 4.0), 10.0);
        assert!((camera.target - Vec3::new(6.0, 0.0, 8.0)).length() < 1e-5);
    }

    #[test]
    fn apply_state_leaves_target_alone() {
        let mut camera = Camera::new("test", Vec3::ZERO);
        let target = camera.target;
        camera.apply_state(CameraState {
            position: Vec3::new(1.0, 1.7, -2.0),
            fov_radians: 1.2,
        });
        assert_eq!(camera.state().position, Vec3::new(1.0, 1.7, -2.0));
        assert_eq!(camera.fov, 1.2);
        assert_eq!(camera.target, target);
    }

    #[test]
    fn degenerate_target_falls_back_to_forward() {
        let mut camera = Camera::new("test", Vec3::ONE);
        camera.target = camera.position;
        assert_eq!(camera.look_direction(), Vec3::Z);
    }

    #[test]
    fn view_matrix_maps_target_onto_positive_view_z() {
        let mut camera = Camera::new("test", Vec3::new(1.0, 2.0, 3.0));
        camera.look_along(Vec3::X, 10.0);
        let view_space = camera.view_matrix().transform_point3(camera.target);
        assert!(view_space.z > 9.9, "target should lie in front, got {:?}", view_space);
        assert!(view_space.x.abs() < 1e-4 && view_space.y.abs() < 1e-4);
    }
}
