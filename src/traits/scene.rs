use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;

use crate::camera::Camera;
use crate::math::AABB;

/// Host scene as seen by the navigation modes.
///
/// Rendering, meshes and materials stay on the host side; modes only need
/// camera activation, collision geometry and the waypoint marker registry.
pub trait Scene {
    /// Make `camera` the one the host renders with
    fn set_active_camera(&mut self, camera: &Camera);

    /// Forget a camera allocated by a mode that is being disposed
    fn release_camera(&mut self, _name: &str) {}

    /// Height of the walkable ground plane in metres
    fn ground_level(&self) -> f32 {
        0.0
    }

    /// Static collision boxes
    fn colliders(&self) -> &[AABB] {
        &[]
    }

    fn add_waypoint_marker(&mut self, _index: usize, _position: Vec3, _label: &str) {}

    fn set_waypoint_markers_visible(&mut self, _visible: bool) {}

    fn clear_waypoint_markers(&mut self) {}

    /// Get scene name for debugging
    fn name(&self) -> &str {
        "Scene"
    }
}

/// Scene handle shared between the host and the enabled mode (single-threaded)
pub type SharedScene = Rc<RefCell<dyn Scene>>;
