//! Small rotation toolkit the navigation modes compose camera orientation with.
//!
//! Everything goes through these helpers so the orientation maths does not
//! depend on how a particular host engine represents rotations.

use glam::{Quat, Vec3};

/// World up axis of the scene (Y-up)
pub const WORLD_UP: Vec3 = Vec3::Y;

/// World right axis, used when a direction is too close to vertical to derive one
pub const WORLD_RIGHT: Vec3 = Vec3::X;

/// Largest pitch magnitude any mode allows, kept clear of straight up/down
pub const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.1;

const DEGENERATE_EPSILON: f32 = 1e-6;

pub fn clamp_pitch(pitch: f32) -> f32 {
    pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT)
}

/// Rotate `v` by `angle` radians about `axis` (normalised internally)
pub fn rotate_about_axis(v: Vec3, axis: Vec3, angle: f32) -> Vec3 {
    let axis = axis.normalize_or_zero();
    if axis == Vec3::ZERO || angle == 0.0 {
        return v;
    }
    Quat::from_axis_angle(axis, angle) * v
}

/// Pitch axis for a look direction: `normalize(direction x up)`, falling back
/// to world right when the direction is (nearly) parallel to world up.
/// Rotating about it by a positive angle tilts the direction upwards.
pub fn right_axis(direction: Vec3) -> Vec3 {
    let cross = direction.cross(WORLD_UP);
    if cross.length_squared() < DEGENERATE_EPSILON {
        WORLD_RIGHT
    } else {
        cross.normalize()
    }
}

/// Unit forward vector for yaw/pitch angles (yaw about +Y from +Z, pitch positive looks up)
pub fn direction_from_angles(yaw: f32, pitch: f32) -> Vec3 {
    Vec3::new(
        yaw.sin() * pitch.cos(),
        pitch.sin(),
        yaw.cos() * pitch.cos(),
    )
}

/// Horizontal strafe-right vector for a yaw angle in the left-handed scene
pub fn strafe_right(yaw: f32) -> Vec3 {
    Vec3::new(yaw.cos(), 0.0, -yaw.sin())
}

/// Inverse of [`direction_from_angles`]; returns `(yaw, pitch)`
pub fn angles_from_direction(direction: Vec3) -> (f32, f32) {
    let d = direction.normalize_or_zero();
    if d == Vec3::ZERO {
        return (0.0, 0.0);
    }
    let yaw = d.x.atan2(d.z);
    let pitch = d.y.clamp(-1.0, 1.0).asin();
    (yaw, pitch)
}

/// Normalised linear interpolation between two directions
pub fn nlerp_direction(from: Vec3, to: Vec3, t: f32) -> Vec3 {
    let blended = from.lerp(to, t);
    let n = blended.normalize_or_zero();
    if n == Vec3::ZERO {
        // Opposite directions cancel halfway; pick whichever end is closer
        if t < 0.5 { from } else { to }
    } else {
        n
    }
}

/// Wrap an angle in degrees into (-180, 180]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = (angle + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 { 180.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn yaw_about_up_turns_forward_towards_right() {
        let v = rotate_about_axis(Vec3::Z, WORLD_UP, FRAC_PI_2);
        assert!(approx(v, Vec3::X), "got {:?}", v);
    }

    #[test]
    fn zero_axis_is_identity() {
        assert_eq!(rotate_about_axis(Vec3::Z, Vec3::ZERO, 1.0), Vec3::Z);
    }

    #[test]
    fn right_axis_of_forward() {
        assert!(approx(right_axis(Vec3::Z), Vec3::NEG_X));
    }

    #[test]
    fn right_axis_falls_back_when_vertical() {
        assert_eq!(right_axis(Vec3::Y), WORLD_RIGHT);
        assert_eq!(right_axis(Vec3::NEG_Y * 3.0), WORLD_RIGHT);
    }

    #[test]
    fn positive_pitch_about_right_axis_looks_up() {
        let v = rotate_about_axis(Vec3::Z, right_axis(Vec3::Z), 0.5);
        assert!(v.y > 0.0);
        assert!((v.y - 0.5f32.sin()).abs() < 1e-5);
    }

    #[test]
    fn strafe_right_is_perpendicular_to_forward() {
        for yaw in [0.0, 0.7, PI, -2.0] {
            let forward = direction_from_angles(yaw, 0.0);
            assert!(forward.dot(strafe_right(yaw)).abs() < 1e-5);
        }
        assert!(approx(strafe_right(0.0), Vec3::X));
    }

    #[test]
    fn clamp_pitch_limits_both_ways() {
        assert_eq!(clamp_pitch(10.0), PITCH_LIMIT);
        assert_eq!(clamp_pitch(-10.0), -PITCH_LIMIT);
        assert_eq!(clamp_pitch(0.2), 0.2);
    }

    #[test]
    fn angles_round_trip() {
        let dir = direction_from_angles(PI, -0.3);
        let (yaw, pitch) = angles_from_direction(dir);
        assert!((yaw.abs() - PI).abs() < 1e-5);
        assert!((pitch + 0.3).abs() < 1e-5);
    }

    #[test]
    fn wrap_degrees_crosses_north() {
        assert!((wrap_degrees(350.0) + 10.0).abs() < 1e-4);
        assert!((wrap_degrees(-190.0) - 170.0).abs() < 1e-4);
        assert_eq!(wrap_degrees(180.0), 180.0);
        assert_eq!(wrap_degrees(-180.0), 180.0);
    }

    #[test]
    fn nlerp_opposite_directions_does_not_collapse() {
        let v = nlerp_direction(Vec3::Z, Vec3::NEG_Z, 0.5);
        assert!(v.length() > 0.99);
    }
}
