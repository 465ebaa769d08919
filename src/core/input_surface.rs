use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::traits::{Button, ModeKind};

/// Backend-neutral input event, queued by the host and drained by the enabled mode once per frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Button),
    KeyUp(Button),
    /// Primary pointer pressed at surface coordinates
    PointerDown { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerUp,
    /// Single-finger touch
    TouchStart { x: f32, y: f32 },
    TouchMove { x: f32, y: f32 },
    TouchEnd,
    /// Absolute device attitude in degrees (alpha: heading, beta: front/back tilt, gamma: left/right tilt)
    DeviceOrientation { alpha: f32, beta: f32, gamma: f32 },
    Wheel { delta: f32 },
    /// A waypoint marker was clicked/tapped
    MarkerPicked(usize),
    /// Window lost focus; held keys must be released
    FocusLost,
}

/// Input queue shared by the host window and the navigation modes.
///
/// Modes attach themselves as listeners on `enable` and detach on `disable`.
/// Events arriving while nobody listens are discarded.
#[derive(Debug, Default)]
pub struct InputSurface {
    queue: VecDeque<InputEvent>,
    listeners: Vec<ModeKind>,
    discarded: u64,
}

pub type SharedInputSurface = Rc<RefCell<InputSurface>>;

impl InputSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedInputSurface {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Returns false when `owner` was already attached
    pub fn attach(&mut self, owner: ModeKind) -> bool {
        if self.listeners.contains(&owner) {
            return false;
        }
        self.listeners.push(owner);
        true
    }

    /// Returns false when `owner` was not attached
    pub fn detach(&mut self, owner: ModeKind) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|&l| l != owner);
        if self.listeners.is_empty() {
            self.queue.clear();
        }
        before != self.listeners.len()
    }

    pub fn is_attached(&self, owner: ModeKind) -> bool {
        self.listeners.contains(&owner)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn push(&mut self, event: InputEvent) {
        if self.listeners.is_empty() {
            self.discarded += 1;
            return;
        }
        self.queue.push_back(event);
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        for event in events {
            self.push(event);
        }
    }

    /// Take every queued event, but only for an attached listener
    pub fn drain(&mut self, owner: ModeKind) -> Vec<InputEvent> {
        if !self.is_attached(owner) {
            return Vec::new();
        }
        self.queue.drain(..).collect()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Events thrown away because no listener was attached
    pub fn discarded(&self) -> u64 {
        self.discarded
    }
}
