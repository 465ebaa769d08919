use std::path::Path;

use glam::Vec3;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{NavError, NavResult};
use crate::math::{source_to_scene_direction, source_to_scene_position};

use super::lens::{self, DEFAULT_ASPECT_RATIO};

/// One authored camera station. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    /// Position in the sorted collection
    pub index: usize,
    /// Authored 1-based ordering key
    pub waypoint_number: i64,
    pub agent_name: String,
    pub source_position_mm: Vec3,
    /// Capture-space direction, not necessarily normalised
    pub source_direction: Vec3,
    pub lens_mm: f32,
    /// `"W:H"` as authored (or the default)
    pub aspect_ratio: String,
}

/// Scene-space pose derived from a waypoint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedWaypoint {
    pub index: usize,
    pub position: Vec3,
    /// Unit look direction
    pub direction: Vec3,
    pub fov_radians: f32,
}

impl Waypoint {
    /// Position in metres, scene axes
    pub fn scene_position(&self) -> Vec3 {
        source_to_scene_position(self.source_position_mm)
    }

    /// Unit direction in scene axes; a zero vector falls back to +Z
    pub fn scene_direction(&self) -> Vec3 {
        let dir = source_to_scene_direction(self.source_direction).normalize_or_zero();
        if dir == Vec3::ZERO { Vec3::Z } else { dir }
    }

    pub fn fov_degrees(&self) -> f32 {
        lens::fov_degrees(self.lens_mm, lens::parse_aspect_ratio(Some(&self.aspect_ratio)))
    }

    pub fn fov_radians(&self) -> f32 {
        self.fov_degrees().to_radians()
    }

    pub fn resolve(&self) -> ResolvedWaypoint {
        ResolvedWaypoint {
            index: self.index,
            position: self.scene_position(),
            direction: self.scene_direction(),
            fov_radians: self.fov_radians(),
        }
    }
}

/// Waypoints sorted by `waypoint_number`, never empty, with a current index
#[derive(Debug, Clone, PartialEq)]
pub struct WaypointCollection {
    waypoints: Vec<Waypoint>,
    current: usize,
}

impl WaypointCollection {
    /// Sort, re-index and validate; fails on an empty set
    pub fn new(mut waypoints: Vec<Waypoint>) -> NavResult<Self> {
        if waypoints.is_empty() {
            return Err(NavError::Data("no waypoints".to_string()));
        }
        waypoints.sort_by_key(|w| w.waypoint_number);
        for (index, waypoint) in waypoints.iter_mut().enumerate() {
            waypoint.index = index;
        }
        Ok(Self { waypoints, current: 0 })
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Always false; present for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Waypoint> {
        self.waypoints.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Waypoint> {
        self.waypoints.iter()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &Waypoint {
        &self.waypoints[self.current]
    }

    /// Returns false (and changes nothing) when out of range
    pub fn set_current(&mut self, index: usize) -> bool {
        if index >= self.waypoints.len() {
            return false;
        }
        self.current = index;
        true
    }
}

#[derive(Debug, Deserialize)]
struct RawVec3 {
    x: f32,
    y: f32,
    z: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAgent {
    waypoint_number: i64,
    #[serde(default)]
    agent_name: Option<String>,
    position: RawVec3,
    direction: RawVec3,
    #[serde(default)]
    camera: Option<Value>,
}

impl RawAgent {
    fn into_waypoint(self) -> Option<Waypoint> {
        let position = Vec3::new(self.position.x, self.position.y, self.position.z);
        let direction = Vec3::new(self.direction.x, self.direction.y, self.direction.z);
        if !position.is_finite() || !direction.is_finite() {
            return None;
        }

        let camera = self.camera.as_ref();
        let lens_mm = lens::lens_or_default(
            camera
                .and_then(|c| c.get("lensMm"))
                .and_then(Value::as_f64)
                .map(|v| v as f32),
        );
        let aspect_ratio = match camera.and_then(|c| c.get("aspectRatio")).and_then(Value::as_str) {
            Some(text) if text.contains(':') => text.to_string(),
            Some(text) => {
                log::warn!("waypoint {} aspect ratio {:?} is malformed", self.waypoint_number, text);
                DEFAULT_ASPECT_RATIO.to_string()
            }
            None => DEFAULT_ASPECT_RATIO.to_string(),
        };

        Some(Waypoint {
            index: 0,
            waypoint_number: self.waypoint_number,
            agent_name: self
                .agent_name
                .unwrap_or_else(|| format!("Waypoint {}", self.waypoint_number)),
            source_position_mm: position,
            source_direction: direction,
            lens_mm,
            aspect_ratio,
        })
    }
}

/// Parse a `{ "cameraAgents": [...] }` document.
///
/// Fails closed when the array is missing, not an array, empty, or holds no
/// usable entry; individual malformed entries are skipped with a warning.
pub fn parse_waypoints(json: &str) -> NavResult<WaypointCollection> {
    let document: Value = serde_json::from_str(json)?;
    let agents = match document.get("cameraAgents") {
        None => return Err(NavError::Data("cameraAgents is missing".to_string())),
        Some(Value::Array(agents)) => agents,
        Some(_) => return Err(NavError::Data("cameraAgents is not an array".to_string())),
    };
    if agents.is_empty() {
        return Err(NavError::Data("cameraAgents is empty".to_string()));
    }

    let waypoints: Vec<Waypoint> = agents
        .iter()
        .enumerate()
        .filter_map(|(i, agent)| {
            let parsed = serde_json::from_value::<RawAgent>(agent.clone())
                .ok()
                .and_then(RawAgent::into_waypoint);
            if parsed.is_none() {
                log::warn!("skipping malformed camera agent at position {}", i);
            }
            parsed
        })
        .collect();

    if waypoints.is_empty() {
        return Err(NavError::Data("no usable camera agents".to_string()));
    }
    log::info!("loaded {} of {} camera agents", waypoints.len(), agents.len());
    WaypointCollection::new(waypoints)
}

pub fn load_waypoints(path: impl AsRef<Path>) -> NavResult<WaypointCollection> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| NavError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_waypoints(&json)
}
