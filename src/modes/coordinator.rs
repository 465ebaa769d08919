use crate::camera::Camera;
use crate::core::SharedInputSurface;
use crate::frame::FrameInfo;
use crate::traits::{ModeKind, NavigationMode, SharedScene};

/// Owns the navigation modes of one viewer and keeps at most one enabled.
///
/// Switching always disables the outgoing mode before the incoming one is
/// enabled, so two modes never listen to the input surface at once.
pub struct ModeCoordinator {
    scene: SharedScene,
    surface: SharedInputSurface,
    modes: Vec<Box<dyn NavigationMode>>,
    active: Option<ModeKind>,
}

impl ModeCoordinator {
    pub fn new(scene: SharedScene, surface: SharedInputSurface) -> Self {
        Self {
            scene,
            surface,
            modes: Vec::new(),
            active: None,
        }
    }

    /// Initialize and take ownership of a mode; a mode that fails to
    /// initialize, or whose kind is already registered, is dropped
    pub fn register(&mut self, mut mode: Box<dyn NavigationMode>) -> bool {
        let kind = mode.kind();
        if self.contains(kind) {
            log::warn!("{} mode already registered", kind);
            return false;
        }
        if !mode.initialize(self.scene.clone(), self.surface.clone()) {
            log::warn!("{} mode failed to initialize and is unavailable", kind);
            return false;
        }
        self.modes.push(mode);
        true
    }

    pub fn contains(&self, kind: ModeKind) -> bool {
        self.modes.iter().any(|m| m.kind() == kind)
    }

    pub fn available(&self) -> Vec<ModeKind> {
        self.modes.iter().map(|m| m.kind()).collect()
    }

    pub fn active_kind(&self) -> Option<ModeKind> {
        self.active
    }

    pub fn mode(&self, kind: ModeKind) -> Option<&dyn NavigationMode> {
        self.modes.iter().find(|m| m.kind() == kind).map(|m| m.as_ref())
    }

    fn mode_mut(&mut self, kind: ModeKind) -> Option<&mut Box<dyn NavigationMode>> {
        self.modes.iter_mut().find(|m| m.kind() == kind)
    }

    /// Make `kind` the only enabled mode; false if it was never registered
    pub fn switch_to(&mut self, kind: ModeKind) -> bool {
        if !self.contains(kind) {
            log::warn!("cannot switch to {} mode: not available", kind);
            return false;
        }
        if self.active == Some(kind) {
            return true;
        }
        if let Some(previous) = self.active.take() {
            if let Some(mode) = self.mode_mut(previous) {
                mode.disable();
            }
        }
        if let Some(mode) = self.mode_mut(kind) {
            mode.enable();
        }
        self.active = Some(kind);
        log::info!("switched to {} mode", kind);
        true
    }

    /// Disable the active mode without enabling another
    pub fn deactivate(&mut self) {
        if let Some(previous) = self.active.take() {
            if let Some(mode) = self.mode_mut(previous) {
                mode.disable();
            }
        }
    }

    pub fn reset_active(&mut self) {
        if let Some(kind) = self.active {
            if let Some(mode) = self.mode_mut(kind) {
                mode.reset();
            }
        }
    }

    pub fn camera(&self) -> Option<&Camera> {
        self.active.and_then(|kind| self.mode(kind)).and_then(|m| m.camera())
    }

    /// Tick only the enabled mode
    pub fn update(&mut self, frame: &FrameInfo) {
        if let Some(kind) = self.active {
            if let Some(mode) = self.mode_mut(kind) {
                mode.update(frame);
            }
        }
    }

    /// Dispose every mode; the coordinator is empty afterwards
    pub fn dispose(&mut self) {
        self.active = None;
        for mut mode in self.modes.drain(..) {
            mode.dispose();
        }
    }
}

impl Drop for ModeCoordinator {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FlySettings, WalkSettings};
    use crate::core::InputSurface;
    use crate::modes::{FlyMode, WalkMode};
    use crate::scene::StaticScene;

    fn coordinator() -> (ModeCoordinator, SharedInputSurface) {
        let scene = StaticScene::new("test").into_shared();
        let surface = InputSurface::shared();
        let mut coordinator = ModeCoordinator::new(scene, surface.clone());
        assert!(coordinator.register(Box::new(FlyMode::new(FlySettings::default()))));
        assert!(coordinator.register(Box::new(WalkMode::new(WalkSettings::default()))));
        (coordinator, surface)
    }

    #[test]
    fn switching_keeps_a_single_listener() {
        let (mut coordinator, surface) = coordinator();
        assert!(coordinator.switch_to(ModeKind::Fly));
        assert!(coordinator.switch_to(ModeKind::Walk));
        assert_eq!(surface.borrow().listener_count(), 1);
        assert!(surface.borrow().is_attached(ModeKind::Walk));
        assert!(!coordinator.mode(ModeKind::Fly).map_or(true, |m| m.is_enabled()));
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let (mut coordinator, _surface) = coordinator();
        assert!(!coordinator.switch_to(ModeKind::Waypoint));
        assert_eq!(coordinator.active_kind(), None);
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let (mut coordinator, _surface) = coordinator();
        assert!(!coordinator.register(Box::new(FlyMode::new(FlySettings::default()))));
        assert_eq!(coordinator.available(), vec![ModeKind::Fly, ModeKind::Walk]);
    }

    #[test]
    fn camera_follows_active_mode() {
        let (mut coordinator, _surface) = coordinator();
        assert!(coordinator.camera().is_none());
        coordinator.switch_to(ModeKind::Walk);
        assert_eq!(coordinator.camera().map(|c| c.name), Some("walkCamera"));
    }
}
