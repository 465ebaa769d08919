use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;

use crate::camera::Camera;
use crate::math::AABB;
use crate::traits::Scene;

/// Visual marker registered for a waypoint (sphere + label on the host side)
#[derive(Debug, Clone, PartialEq)]
pub struct WaypointMarker {
    pub index: usize,
    pub position: Vec3,
    pub label: String,
}

/// In-memory scene: flat ground, static box colliders and a marker registry
#[derive(Debug, Clone, Default)]
pub struct StaticScene {
    name: String,
    ground_level: f32,
    colliders: Vec<AABB>,
    markers: Vec<WaypointMarker>,
    markers_visible: bool,
    active_camera: Option<Camera>,
}

impl StaticScene {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_ground_level(mut self, ground_level: f32) -> Self {
        self.ground_level = ground_level;
        self
    }

    pub fn with_collider(mut self, collider: AABB) -> Self {
        self.colliders.push(collider);
        self
    }

    pub fn with_colliders(mut self, colliders: impl IntoIterator<Item = AABB>) -> Self {
        self.colliders.extend(colliders);
        self
    }

    pub fn into_shared(self) -> Rc<RefCell<StaticScene>> {
        Rc::new(RefCell::new(self))
    }

    pub fn markers(&self) -> &[WaypointMarker] {
        &self.markers
    }

    pub fn markers_visible(&self) -> bool {
        self.markers_visible
    }

    /// Name of the camera the host would currently render with
    pub fn active_camera_name(&self) -> Option<&'static str> {
        self.active_camera.as_ref().map(|c| c.name)
    }
}

impl Scene for StaticScene {
    fn set_active_camera(&mut self, camera: &Camera) {
        self.active_camera = Some(camera.clone());
    }

    fn release_camera(&mut self, name: &str) {
        if self.active_camera.as_ref().is_some_and(|c| c.name == name) {
            self.active_camera = None;
        }
    }

    fn ground_level(&self) -> f32 {
        self.ground_level
    }

    fn colliders(&self) -> &[AABB] {
        &self.colliders
    }

    fn add_waypoint_marker(&mut self, index: usize, position: Vec3, label: &str) {
        self.markers.push(WaypointMarker {
            index,
            position,
            label: label.to_string(),
        });
    }

    fn set_waypoint_markers_visible(&mut self, visible: bool) {
        self.markers_visible = visible;
    }

    fn clear_waypoint_markers(&mut self) {
        self.markers.clear();
        self.markers_visible = false;
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Walled 20 m x 20 m room with a low plinth and a couple of columns
pub fn create_gallery_scene() -> StaticScene {
    const HALF: f32 = 10.0;
    const WALL_HEIGHT: f32 = 4.0;
    const WALL_THICKNESS: f32 = 0.2;

    let walls = [
        AABB::new(Vec3::new(-HALF, 0.0, HALF), Vec3::new(HALF, WALL_HEIGHT, HALF + WALL_THICKNESS)),
        AABB::new(Vec3::new(-HALF, 0.0, -HALF - WALL_THICKNESS), Vec3::new(HALF, WALL_HEIGHT, -HALF)),
        AABB::new(Vec3::new(HALF, 0.0, -HALF), Vec3::new(HALF + WALL_THICKNESS, WALL_HEIGHT, HALF)),
        AABB::new(Vec3::new(-HALF - WALL_THICKNESS, 0.0, -HALF), Vec3::new(-HALF, WALL_HEIGHT, HALF)),
    ];

    let columns = [-4.0f32, 4.0].into_iter().map(|x| {
        AABB::from_center_size(Vec3::new(x, WALL_HEIGHT * 0.5, 4.0), Vec3::new(0.6, WALL_HEIGHT, 0.6))
    });

    let plinth = AABB::new(Vec3::new(-2.0, 0.0, -6.0), Vec3::new(2.0, 0.3, -3.0));

    StaticScene::new("gallery")
        .with_colliders(walls)
        .with_colliders(columns)
        .with_collider(plinth)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gallery_has_walls_columns_and_plinth() {
        let scene = create_gallery_scene();
        assert_eq!(scene.colliders().len(), 7);
        assert_eq!(scene.ground_level(), 0.0);
    }

    #[test]
    fn release_only_clears_matching_camera() {
        let mut scene = StaticScene::new("test");
        scene.set_active_camera(&Camera::new("walkCamera", Vec3::ZERO));
        scene.release_camera("flyCamera");
        assert_eq!(scene.active_camera_name(), Some("walkCamera"));
        scene.release_camera("walkCamera");
        assert_eq!(scene.active_camera_name(), None);
    }

    #[test]
    fn clearing_markers_hides_them() {
        let mut scene = StaticScene::new("test");
        scene.add_waypoint_marker(0, Vec3::ZERO, "Entrance");
        scene.set_waypoint_markers_visible(true);
        scene.clear_waypoint_markers();
        assert!(scene.markers().is_empty());
        assert!(!scene.markers_visible());
    }
}
