mod aabb;
pub mod coords;
mod ray;
pub mod rotation;

pub use aabb::AABB;
pub use coords::{source_to_scene_direction, source_to_scene_position};
pub use ray::Ray;
pub use rotation::{clamp_pitch, rotate_about_axis, right_axis, PITCH_LIMIT, WORLD_UP};
