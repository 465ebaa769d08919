use std::fmt;

use crate::camera::Camera;
use crate::core::SharedInputSurface;
use crate::frame::FrameInfo;

use super::scene::SharedScene;

/// Identifies a navigation mode; also used as the listener owner on the input surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeKind {
    Fly,
    Walk,
    Waypoint,
}

impl ModeKind {
    pub const ALL: [ModeKind; 3] = [ModeKind::Fly, ModeKind::Walk, ModeKind::Waypoint];

    /// Name of the camera the mode allocates
    pub fn camera_name(self) -> &'static str {
        match self {
            ModeKind::Fly => "flyCamera",
            ModeKind::Walk => "walkCamera",
            ModeKind::Waypoint => "waypointCamera",
        }
    }
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModeKind::Fly => "fly",
            ModeKind::Walk => "walk",
            ModeKind::Waypoint => "waypoint",
        };
        f.write_str(name)
    }
}

/// Lifecycle contract shared by every camera navigation mode.
///
/// No method here may panic or return an error across the mode boundary:
/// calls made before `initialize` (or after `dispose`) are no-ops, and
/// `initialize` reports unrecoverable failure by returning `false`.
pub trait NavigationMode {
    fn kind(&self) -> ModeKind;

    /// Allocate the mode's camera and load mode-specific data
    fn initialize(&mut self, scene: SharedScene, surface: SharedInputSurface) -> bool;

    /// Activate the camera and attach input; idempotent
    fn enable(&mut self);

    /// Detach everything `enable` attached and hide mode-owned markers
    fn disable(&mut self);

    /// Return to the mode's default view
    fn reset(&mut self);

    /// Release the camera and all references; the mode is unusable afterwards
    fn dispose(&mut self);

    fn camera(&self) -> Option<&Camera>;

    fn is_enabled(&self) -> bool;

    /// Advance one animation frame: drain queued input, then integrate
    fn update(&mut self, frame: &FrameInfo);
}
