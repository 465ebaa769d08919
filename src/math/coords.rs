//! Conversion from capture-rig space (right-handed, Z-up, millimetres) into
//! scene space (left-handed, Y-up, metres).
//!
//! Getting a sign or an axis wrong here mirrors the whole tour, so the
//! mapping lives in exactly one place.

use glam::Vec3;

pub const MM_PER_METRE: f32 = 1000.0;

/// Map a capture-space axis triple into scene axes without scaling
pub fn source_to_scene_axes(v: Vec3) -> Vec3 {
    Vec3::new(-v.x, v.z, -v.y)
}

/// Capture-space position in millimetres to scene position in metres
pub fn source_to_scene_position(position_mm: Vec3) -> Vec3 {
    Vec3::new(
        -position_mm.x / MM_PER_METRE,
        position_mm.z / MM_PER_METRE,
        -position_mm.y / MM_PER_METRE,
    )
}

/// Capture-space direction to scene direction (not normalised)
pub fn source_to_scene_direction(direction: Vec3) -> Vec3 {
    source_to_scene_axes(direction)
}

/// Host-config millimetres to metres, axes unchanged
pub fn mm_to_metres(v: Vec3) -> Vec3 {
    v / MM_PER_METRE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_reference_position_exactly() {
        let scene = source_to_scene_position(Vec3::new(1000.0, 2000.0, 1500.0));
        assert_eq!(scene, Vec3::new(-1.0, 1.5, -2.0));
    }

    #[test]
    fn source_up_becomes_scene_up() {
        assert_eq!(source_to_scene_direction(Vec3::Z), Vec3::Y);
    }

    #[test]
    fn source_forward_maps_to_negative_z() {
        assert_eq!(source_to_scene_direction(Vec3::Y), Vec3::NEG_Z);
        assert_eq!(source_to_scene_direction(Vec3::X), Vec3::NEG_X);
    }
}
