use std::path::PathBuf;

use crate::camera::{Camera, CameraState};
use crate::config::WaypointSettings;
use crate::core::{InputEvent, SharedInputSurface};
use crate::error::{NavError, NavResult};
use crate::frame::FrameInfo;
use crate::modes::ModeHandle;
use crate::traits::{Button, ModeKind, NavigationMode, SharedScene};

use super::data::{load_waypoints, parse_waypoints, ResolvedWaypoint, Waypoint, WaypointCollection};
use super::input::{InputSensitivity, InputUnifier};
use super::orientation::{OrientationComposer, RotationOffset};
use super::transition::{TransitionAnimation, TransitionAnimator, TransitionStep};

/// Where the engine gets its dataset from on `initialize`
#[derive(Debug, Clone)]
pub enum WaypointSource {
    File(PathBuf),
    Json(String),
    Collection(WaypointCollection),
}

type WaypointChanged = Box<dyn FnMut(&Waypoint)>;

/// Curated tour through authored camera stations.
///
/// Navigation either snaps to a waypoint or starts a 2 s eased transition;
/// while a transition runs every navigation, rotation-reset and look request
/// is dropped. Between transitions the look direction is the waypoint's
/// authored direction plus the accumulated [`RotationOffset`].
pub struct WaypointEngine {
    handle: ModeHandle,
    settings: WaypointSettings,
    source: WaypointSource,
    collection: Option<WaypointCollection>,
    active: Option<ResolvedWaypoint>,
    offset: RotationOffset,
    composer: OrientationComposer,
    animator: TransitionAnimator,
    unifier: InputUnifier,
    last_frame_ms: Option<f64>,
    last_error: Option<NavError>,
    on_waypoint_changed: Option<WaypointChanged>,
}

impl WaypointEngine {
    /// Engine that loads `settings.data_path` on initialize
    pub fn new(settings: WaypointSettings) -> Self {
        let source = WaypointSource::File(settings.data_path.clone());
        Self::with_source(settings, source)
    }

    pub fn with_source(settings: WaypointSettings, source: WaypointSource) -> Self {
        let composer = OrientationComposer::new(settings.lookahead);
        let unifier = InputUnifier::new(InputSensitivity::from(&settings));
        Self {
            handle: ModeHandle::new(ModeKind::Waypoint),
            settings,
            source,
            collection: None,
            active: None,
            offset: RotationOffset::ZERO,
            composer,
            animator: TransitionAnimator::new(),
            unifier,
            last_frame_ms: None,
            last_error: None,
            on_waypoint_changed: None,
        }
    }

    /// Called when a waypoint becomes current (instantly or at the end of a transition)
    pub fn set_on_waypoint_changed(&mut self, callback: impl FnMut(&Waypoint) + 'static) {
        self.on_waypoint_changed = Some(Box::new(callback));
    }

    pub fn last_error(&self) -> Option<&NavError> {
        self.last_error.as_ref()
    }

    pub fn waypoints(&self) -> Option<&WaypointCollection> {
        self.collection.as_ref()
    }

    pub fn waypoint_count(&self) -> usize {
        self.collection.as_ref().map_or(0, WaypointCollection::len)
    }

    pub fn current_index(&self) -> Option<usize> {
        self.collection.as_ref().map(WaypointCollection::current_index)
    }

    pub fn current_waypoint(&self) -> Option<&Waypoint> {
        self.collection.as_ref().map(WaypointCollection::current)
    }

    pub fn rotation_offset(&self) -> RotationOffset {
        self.offset
    }

    pub fn is_transitioning(&self) -> bool {
        self.animator.is_transitioning()
    }

    pub fn active_transition(&self) -> Option<&TransitionAnimation> {
        self.animator.active()
    }

    pub fn camera_state(&self) -> Option<CameraState> {
        self.handle.camera().map(Camera::state)
    }

    fn load(&self) -> NavResult<WaypointCollection> {
        match &self.source {
            WaypointSource::File(path) => load_waypoints(path),
            WaypointSource::Json(json) => parse_waypoints(json),
            WaypointSource::Collection(collection) => Ok(collection.clone()),
        }
    }

    /// Go to `index`, snapping or animating. Out-of-range indices, calls made
    /// before initialize and calls made mid-transition are ignored; the return
    /// value says whether the request was accepted. A disabled engine is not
    /// ticked, so it always snaps.
    pub fn navigate_to(&mut self, index: usize, animate: bool) -> bool {
        if !self.handle.is_initialized() {
            log::debug!("{}", NavError::NotReady("navigate_to"));
            return false;
        }
        if self.animator.is_transitioning() {
            log::debug!("navigate_to({}) dropped: transition in progress", index);
            return false;
        }
        let Some(target) = self.collection.as_ref().and_then(|c| c.get(index)).map(Waypoint::resolve) else {
            log::debug!("navigate_to({}) ignored: out of range", index);
            return false;
        };

        self.offset.reset();

        if !animate || !self.handle.is_enabled() {
            self.apply_waypoint(index);
            return true;
        }

        let Some(camera) = self.handle.camera() else {
            self.apply_waypoint(index);
            return true;
        };
        let animation = TransitionAnimation {
            start_position: camera.position,
            target_position: target.position,
            start_fov: camera.fov,
            target_fov: target.fov_radians,
            start_direction: camera.look_direction(),
            target_direction: target.direction,
            start_timestamp: self.last_frame_ms,
            duration_ms: self.settings.transition_ms,
            target_index: index,
        };
        log::debug!("transition to waypoint {} started", index);
        self.animator.start(animation)
    }

    /// Animate to the following waypoint; no-op on the last one
    pub fn next(&mut self) -> bool {
        match self.current_index() {
            Some(current) if current + 1 < self.waypoint_count() => self.navigate_to(current + 1, true),
            _ => false,
        }
    }

    /// Animate to the preceding waypoint; no-op on the first one
    pub fn previous(&mut self) -> bool {
        match self.current_index() {
            Some(current) if current > 0 => self.navigate_to(current - 1, true),
            _ => false,
        }
    }

    /// Return to the authored direction of the current waypoint
    pub fn reset_rotation(&mut self) -> bool {
        if !self.handle.is_initialized() || self.animator.is_transitioning() {
            return false;
        }
        self.offset.reset();
        self.orient();
        self.handle.publish_camera();
        true
    }

    /// Make `index` current immediately: pose, exact orientation, notification
    fn apply_waypoint(&mut self, index: usize) {
        let Some(collection) = self.collection.as_mut() else {
            return;
        };
        if !collection.set_current(index) {
            return;
        }
        let waypoint = collection.current();
        let resolved = waypoint.resolve();
        self.active = Some(resolved);
        self.offset.reset();

        if let Some(camera) = self.handle.camera_mut() {
            camera.apply_state(CameraState {
                position: resolved.position,
                fov_radians: resolved.fov_radians,
            });
            camera.target = self.composer.look_target(resolved.position, resolved.direction, self.offset);
        }
        log::info!(
            "waypoint {} ({}) active, fov {:.1} deg",
            index,
            waypoint.agent_name,
            resolved.fov_radians.to_degrees()
        );
        if let Some(callback) = self.on_waypoint_changed.as_mut() {
            callback(waypoint);
        }
        self.handle.publish_camera();
    }

    fn orient(&mut self) {
        let Some(active) = self.active else {
            return;
        };
        let offset = self.offset;
        let composer = self.composer;
        if let Some(camera) = self.handle.camera_mut() {
            camera.target = composer.look_target(camera.position, active.direction, offset);
        }
    }

    fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(Button::ArrowRight) => {
                self.next();
            }
            InputEvent::KeyDown(Button::ArrowLeft) => {
                self.previous();
            }
            InputEvent::KeyDown(Button::KeyR) => {
                self.reset_rotation();
            }
            InputEvent::KeyDown(Button::Escape) => {
                self.navigate_to(0, true);
            }
            InputEvent::MarkerPicked(index) => {
                self.navigate_to(index, true);
            }
            other => {
                let inert = self.animator.is_transitioning();
                self.unifier.apply(&other, &mut self.offset, inert);
            }
        }
    }

    fn step_transition(&mut self, now_ms: f64) {
        let lookahead = self.composer.lookahead();
        match self.animator.step(now_ms) {
            Some(TransitionStep::InProgress(sample)) => {
                if let Some(camera) = self.handle.camera_mut() {
                    camera.apply_state(CameraState {
                        position: sample.position,
                        fov_radians: sample.fov,
                    });
                    camera.look_along(sample.direction, lookahead);
                }
            }
            Some(TransitionStep::Finished(_, animation)) => {
                log::debug!("transition to waypoint {} finished", animation.target_index);
                self.apply_waypoint(animation.target_index);
            }
            None => {}
        }
    }

    fn abandon_transition(&mut self) {
        if self.animator.cancel().is_some() {
            if let Some(current) = self.current_index() {
                log::debug!("transition abandoned, restoring waypoint {}", current);
                self.apply_waypoint(current);
            }
        }
    }
}

impl NavigationMode for WaypointEngine {
    fn kind(&self) -> ModeKind {
        ModeKind::Waypoint
    }

    fn initialize(&mut self, scene: SharedScene, surface: SharedInputSurface) -> bool {
        if self.handle.is_initialized() {
            self.dispose();
        }

        let collection = match self.load() {
            Ok(collection) => collection,
            Err(err) => {
                log::error!("waypoint engine failed to initialize: {}", err);
                self.last_error = Some(err);
                return false;
            }
        };
        self.last_error = None;

        let first = collection.current().resolve();
        {
            let mut scene = scene.borrow_mut();
            for waypoint in collection.iter() {
                scene.add_waypoint_marker(waypoint.index, waypoint.scene_position(), &waypoint.agent_name);
            }
            scene.set_waypoint_markers_visible(false);
        }
        log::info!("waypoint engine loaded {} waypoints", collection.len());

        let camera = Camera::new(ModeKind::Waypoint.camera_name(), first.position);
        self.collection = Some(collection);
        self.handle.bind(scene, surface, camera);
        self.offset.reset();
        self.apply_waypoint(0);
        true
    }

    fn enable(&mut self) {
        if self.handle.enable() {
            self.unifier.reset_baseline();
            if let Some(scene) = self.handle.scene() {
                scene.borrow_mut().set_waypoint_markers_visible(true);
            }
        }
    }

    fn disable(&mut self) {
        if !self.handle.disable() {
            return;
        }
        self.abandon_transition();
        self.unifier.reset_baseline();
        if let Some(scene) = self.handle.scene() {
            scene.borrow_mut().set_waypoint_markers_visible(false);
        }
    }

    fn reset(&mut self) {
        if !self.handle.is_initialized() {
            log::debug!("{}", NavError::NotReady("reset"));
            return;
        }
        self.animator.cancel();
        self.navigate_to(0, false);
    }

    fn dispose(&mut self) {
        self.animator.cancel();
        if let Some(scene) = self.handle.scene() {
            scene.borrow_mut().clear_waypoint_markers();
        }
        self.handle.dispose();
        self.unifier.reset_baseline();
        self.collection = None;
        self.active = None;
        self.offset.reset();
    }

    fn camera(&self) -> Option<&Camera> {
        self.handle.camera()
    }

    fn is_enabled(&self) -> bool {
        self.handle.is_enabled()
    }

    fn update(&mut self, frame: &FrameInfo) {
        self.last_frame_ms = Some(frame.time_ms);
        if !self.handle.is_enabled() {
            return;
        }
        for event in self.handle.drain_input() {
            self.handle_event(event);
        }
        if self.animator.is_transitioning() {
            self.step_transition(frame.time_ms);
        } else {
            self.orient();
        }
        self.handle.publish_camera();
    }
}
