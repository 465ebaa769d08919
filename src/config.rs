//! Host configuration for the navigation modes.
//!
//! The host hands over loosely-typed JSON; everything is validated here, at
//! the boundary, so no missing or non-finite value ever reaches the camera
//! maths. Unusable values are replaced by the documented defaults and logged.

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{NavError, NavResult};
use crate::math::coords::mm_to_metres;

pub const DEFAULT_WAYPOINT_FILE: &str = "camera_waypoints.json";

pub const DEFAULT_FLY_SPEED: f32 = 5.0;
pub const DEFAULT_FLY_SENSITIVITY: f32 = 0.003;

pub const DEFAULT_EYE_HEIGHT: f32 = 1.7;
pub const DEFAULT_WALK_SPEED: f32 = 2.5;
pub const DEFAULT_RUN_MULTIPLIER: f32 = 2.3;

pub const DEFAULT_TRANSITION_MS: f64 = 2000.0;
pub const DEFAULT_LOOKAHEAD: f32 = 10.0;
pub const DEFAULT_POINTER_SENSITIVITY: f32 = 0.005;
pub const DEFAULT_TOUCH_SENSITIVITY: f32 = 0.006;
pub const DEFAULT_ORIENTATION_SENSITIVITY: f32 = 1.0;

/// Camera pose in scene units: metres and radians
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlySettings {
    /// Configured start pose; `None` means the fallback pose is used
    pub start: Option<Pose>,
    pub speed: f32,
    pub sensitivity: f32,
}

impl Default for FlySettings {
    fn default() -> Self {
        Self {
            start: None,
            speed: DEFAULT_FLY_SPEED,
            sensitivity: DEFAULT_FLY_SENSITIVITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WalkSettings {
    pub spawn: Option<Pose>,
    pub eye_height: f32,
    pub walk_speed: f32,
    pub run_multiplier: f32,
}

impl Default for WalkSettings {
    fn default() -> Self {
        Self {
            spawn: None,
            eye_height: DEFAULT_EYE_HEIGHT,
            walk_speed: DEFAULT_WALK_SPEED,
            run_multiplier: DEFAULT_RUN_MULTIPLIER,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WaypointSettings {
    pub data_path: PathBuf,
    pub transition_ms: f64,
    pub lookahead: f32,
    pub pointer_sensitivity: f32,
    pub touch_sensitivity: f32,
    pub orientation_sensitivity: f32,
}

impl Default for WaypointSettings {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_WAYPOINT_FILE),
            transition_ms: DEFAULT_TRANSITION_MS,
            lookahead: DEFAULT_LOOKAHEAD,
            pointer_sensitivity: DEFAULT_POINTER_SENSITIVITY,
            touch_sensitivity: DEFAULT_TOUCH_SENSITIVITY,
            orientation_sensitivity: DEFAULT_ORIENTATION_SENSITIVITY,
        }
    }
}

/// Validated configuration for all three navigation modes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavigationConfig {
    pub fly: FlySettings,
    pub walk: WalkSettings,
    pub waypoints: WaypointSettings,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawConfig {
    waypoint_data_path: Option<Value>,
    fly_camera: Option<Value>,
    walk_camera: Option<Value>,
    waypoints: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawVec3 {
    x: f32,
    y: f32,
    z: f32,
}

impl RawVec3 {
    fn to_vec3(&self) -> Option<Vec3> {
        let v = Vec3::new(self.x, self.y, self.z);
        v.is_finite().then_some(v)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPose {
    position_mm: RawVec3,
    #[serde(default)]
    rotation_deg: Option<RawVec3>,
}

impl NavigationConfig {
    pub fn from_json_str(json: &str) -> NavResult<Self> {
        let raw: RawConfig = serde_json::from_str(json)?;
        Ok(Self::from_raw(raw))
    }

    /// Load from a file; a relative waypoint path is resolved against the file's directory
    pub fn load(path: impl AsRef<Path>) -> NavResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| NavError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_json_str(&json)?;
        if config.waypoints.data_path.is_relative() {
            if let Some(dir) = path.parent() {
                config.waypoints.data_path = dir.join(&config.waypoints.data_path);
            }
        }
        Ok(config)
    }

    fn from_raw(raw: RawConfig) -> Self {
        let mut config = Self::default();

        match raw.waypoint_data_path {
            Some(Value::String(s)) if !s.trim().is_empty() => {
                config.waypoints.data_path = PathBuf::from(s.trim());
            }
            Some(other) => log::warn!(
                "waypointDataPath {} is not a usable path, using {}",
                other,
                DEFAULT_WAYPOINT_FILE
            ),
            None => {}
        }

        if let Some(block) = raw.fly_camera.as_ref() {
            config.fly.start = parse_pose(block, "flyCamera");
            config.fly.speed = positive_field(block, "speed", DEFAULT_FLY_SPEED);
            config.fly.sensitivity = positive_field(block, "sensitivity", DEFAULT_FLY_SENSITIVITY);
        }

        if let Some(block) = raw.walk_camera.as_ref() {
            config.walk.spawn = parse_pose(block, "walkCamera");
            config.walk.eye_height = positive_field(block, "eyeHeight", DEFAULT_EYE_HEIGHT);
            config.walk.walk_speed = positive_field(block, "walkSpeed", DEFAULT_WALK_SPEED);
            config.walk.run_multiplier =
                positive_field(block, "runMultiplier", DEFAULT_RUN_MULTIPLIER);
        }

        if let Some(block) = raw.waypoints.as_ref() {
            let w = &mut config.waypoints;
            w.transition_ms = positive_field(block, "transitionMs", DEFAULT_TRANSITION_MS as f32) as f64;
            w.lookahead = positive_field(block, "lookaheadM", DEFAULT_LOOKAHEAD);
            w.pointer_sensitivity =
                positive_field(block, "pointerSensitivity", DEFAULT_POINTER_SENSITIVITY);
            w.touch_sensitivity =
                positive_field(block, "touchSensitivity", DEFAULT_TOUCH_SENSITIVITY);
            w.orientation_sensitivity =
                positive_field(block, "orientationSensitivity", DEFAULT_ORIENTATION_SENSITIVITY);
        }

        config
    }
}

/// Pose in millimetres/degrees converted to metres/radians; `None` (logged) when malformed
fn parse_pose(block: &Value, label: &str) -> Option<Pose> {
    if block.get("positionMm").is_none() {
        return None;
    }
    let raw: RawPose = match serde_json::from_value(block.clone()) {
        Ok(raw) => raw,
        Err(err) => {
            log::warn!("{} pose is malformed ({}), using fallback pose", label, err);
            return None;
        }
    };
    let Some(position_mm) = raw.position_mm.to_vec3() else {
        log::warn!("{} position is not finite, using fallback pose", label);
        return None;
    };
    let rotation = match raw.rotation_deg.as_ref().map(RawVec3::to_vec3) {
        Some(Some(r)) => r,
        Some(None) => {
            log::warn!("{} rotation is not finite, using fallback pose", label);
            return None;
        }
        None => Vec3::ZERO,
    };
    Some(Pose {
        position: mm_to_metres(position_mm),
        yaw: rotation.y.to_radians(),
        pitch: rotation.x.to_radians(),
    })
}

fn positive_field(block: &Value, key: &str, default: f32) -> f32 {
    let Some(value) = block.get(key) else {
        return default;
    };
    positive_number(key, value).unwrap_or_else(|err| {
        log::warn!("{}, using {}", err, default);
        default
    })
}

fn positive_number(key: &str, value: &Value) -> NavResult<f32> {
    match value.as_f64().map(|v| v as f32) {
        Some(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(NavError::Configuration(format!("{} = {} is not a positive number", key, value))),
    }
}
