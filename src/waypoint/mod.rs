//! Curated waypoint tour: dataset loading, lens maths, eased transitions and
//! look-around composition.

pub mod data;
pub mod engine;
pub mod input;
pub mod lens;
pub mod orientation;
pub mod transition;

pub use data::{load_waypoints, parse_waypoints, ResolvedWaypoint, Waypoint, WaypointCollection};
pub use engine::{WaypointEngine, WaypointSource};
pub use input::{InputSensitivity, InputUnifier};
pub use orientation::{OrientationComposer, RotationOffset};
pub use transition::{ease_in_out_cubic, TransitionAnimation, TransitionAnimator, TransitionStep, TRANSITION_DURATION_MS};
