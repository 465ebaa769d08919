use crate::camera::Camera;
use crate::core::{InputEvent, SharedInputSurface};
use crate::traits::{ModeKind, SharedScene};

/// Per-mode state bundle: camera, enabled flag and input attachment.
///
/// Created on `initialize`, torn down on `dispose`. Every mode delegates its
/// lifecycle bookkeeping here so `disable` always reverses `enable` exactly.
pub struct ModeHandle {
    kind: ModeKind,
    camera: Option<Camera>,
    enabled: bool,
    input_attached: bool,
    scene: Option<SharedScene>,
    surface: Option<SharedInputSurface>,
}

impl ModeHandle {
    pub fn new(kind: ModeKind) -> Self {
        Self {
            kind,
            camera: None,
            enabled: false,
            input_attached: false,
            scene: None,
            surface: None,
        }
    }

    pub fn kind(&self) -> ModeKind {
        self.kind
    }

    /// Store host collaborators and the freshly allocated camera
    pub fn bind(&mut self, scene: SharedScene, surface: SharedInputSurface, camera: Camera) {
        if self.enabled {
            self.disable();
        }
        self.scene = Some(scene);
        self.surface = Some(surface);
        self.camera = Some(camera);
    }

    pub fn is_initialized(&self) -> bool {
        self.camera.is_some()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_input_attached(&self) -> bool {
        self.input_attached
    }

    /// Activate camera and attach input; returns false when nothing changed
    pub fn enable(&mut self) -> bool {
        if self.enabled {
            return false;
        }
        let (Some(camera), Some(scene), Some(surface)) =
            (self.camera.as_ref(), self.scene.as_ref(), self.surface.as_ref())
        else {
            log::debug!("{} mode enable ignored: not initialized", self.kind);
            return false;
        };

        scene.borrow_mut().set_active_camera(camera);
        surface.borrow_mut().attach(self.kind);
        self.input_attached = true;
        self.enabled = true;
        log::info!("{} mode enabled", self.kind);
        true
    }

    /// Detach input; returns false when the mode was not enabled
    pub fn disable(&mut self) -> bool {
        if !self.enabled {
            return false;
        }
        if let Some(surface) = self.surface.as_ref() {
            surface.borrow_mut().detach(self.kind);
        }
        self.input_attached = false;
        self.enabled = false;
        log::info!("{} mode disabled", self.kind);
        true
    }

    /// Disable, release the camera and drop every host reference
    pub fn dispose(&mut self) {
        self.disable();
        if let (Some(scene), Some(camera)) = (self.scene.as_ref(), self.camera.as_ref()) {
            scene.borrow_mut().release_camera(camera.name);
        }
        self.camera = None;
        self.scene = None;
        self.surface = None;
    }

    pub fn camera(&self) -> Option<&Camera> {
        self.camera.as_ref()
    }

    pub fn camera_mut(&mut self) -> Option<&mut Camera> {
        self.camera.as_mut()
    }

    pub fn scene(&self) -> Option<&SharedScene> {
        self.scene.as_ref()
    }

    /// Events queued for this mode since the last frame; empty unless enabled
    pub fn drain_input(&self) -> Vec<InputEvent> {
        match (self.enabled, self.surface.as_ref()) {
            (true, Some(surface)) => surface.borrow_mut().drain(self.kind),
            _ => Vec::new(),
        }
    }

    /// Hand the current camera pose to the host renderer
    pub fn publish_camera(&self) {
        if !self.enabled {
            return;
        }
        if let (Some(scene), Some(camera)) = (self.scene.as_ref(), self.camera.as_ref()) {
            scene.borrow_mut().set_active_camera(camera);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::InputSurface;
    use crate::scene::StaticScene;
    use glam::Vec3;

    fn bound_handle() -> (ModeHandle, std::rc::Rc<std::cell::RefCell<StaticScene>>, SharedInputSurface) {
        let scene = StaticScene::new("test").into_shared();
        let surface = InputSurface::shared();
        let mut handle = ModeHandle::new(ModeKind::Fly);
        handle.bind(scene.clone(), surface.clone(), Camera::new("flyCamera", Vec3::ZERO));
        (handle, scene, surface)
    }

    #[test]
    fn enable_before_bind_is_noop() {
        let mut handle = ModeHandle::new(ModeKind::Walk);
        assert!(!handle.enable());
        assert!(!handle.is_enabled());
    }

    #[test]
    fn enable_twice_attaches_once() {
        let (mut handle, scene, surface) = bound_handle();
        assert!(handle.enable());
        assert!(!handle.enable());
        assert_eq!(surface.borrow().listener_count(), 1);
        assert_eq!(scene.borrow().active_camera_name(), Some("flyCamera"));
    }

    #[test]
    fn disable_detaches_listener() {
        let (mut handle, _scene, surface) = bound_handle();
        handle.enable();
        assert!(handle.disable());
        assert_eq!(surface.borrow().listener_count(), 0);
        assert!(!handle.is_input_attached());
    }

    #[test]
    fn dispose_releases_camera() {
        let (mut handle, scene, _surface) = bound_handle();
        handle.enable();
        handle.dispose();
        assert!(handle.camera().is_none());
        assert_eq!(scene.borrow().active_camera_name(), None);
        assert!(!handle.enable());
    }
}
