pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod frame;
pub mod math;
pub mod modes;
pub mod scene;
pub mod traits;
pub mod waypoint;

pub use camera::{Camera, CameraState};
pub use config::NavigationConfig;
pub use error::{NavError, NavResult};
pub use frame::{FixedStepFrames, FrameInfo, FrameIterator};
pub use modes::{FlyMode, ModeCoordinator, WalkMode};
pub use scene::{create_gallery_scene, StaticScene};
pub use traits::{ModeKind, NavigationMode, Scene};
pub use waypoint::WaypointEngine;
