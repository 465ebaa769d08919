use crate::config::WaypointSettings;
use crate::core::{DragTracker, InputEvent};
use crate::math::rotation::wrap_degrees;

use super::orientation::RotationOffset;

/// Per-source look sensitivities
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputSensitivity {
    /// Radians per pixel of pointer drag
    pub pointer: f32,
    /// Radians per pixel of single-touch drag
    pub touch: f32,
    /// Scale applied to device-orientation degrees before conversion to radians
    pub orientation: f32,
}

impl From<&WaypointSettings> for InputSensitivity {
    fn from(settings: &WaypointSettings) -> Self {
        Self {
            pointer: settings.pointer_sensitivity,
            touch: settings.touch_sensitivity,
            orientation: settings.orientation_sensitivity,
        }
    }
}

/// Normalises pointer drags, touch drags and device orientation into one
/// rotation-offset signal.
///
/// Drags accumulate into the offset. Device orientation is absolute: the
/// first reading after `reset_baseline` becomes the baseline and every later
/// reading overwrites the offset with its delta from that baseline.
#[derive(Debug, Clone)]
pub struct InputUnifier {
    sensitivity: InputSensitivity,
    pointer: DragTracker,
    touch: DragTracker,
    orientation_baseline: Option<(f32, f32)>,
}

impl InputUnifier {
    pub fn new(sensitivity: InputSensitivity) -> Self {
        Self {
            sensitivity,
            pointer: DragTracker::new(),
            touch: DragTracker::new(),
            orientation_baseline: None,
        }
    }

    pub fn sensitivity(&self) -> InputSensitivity {
        self.sensitivity
    }

    pub fn has_orientation_baseline(&self) -> bool {
        self.orientation_baseline.is_some()
    }

    /// Forget drags in progress and the orientation baseline
    pub fn reset_baseline(&mut self) {
        self.pointer.end();
        self.touch.end();
        self.orientation_baseline = None;
    }

    /// Feed one event. While `inert`, drag positions are still tracked (so a
    /// drag spanning the end of a transition does not jump) but `offset` is
    /// left alone. Returns true when the event belonged to a look source.
    pub fn apply(&mut self, event: &InputEvent, offset: &mut RotationOffset, inert: bool) -> bool {
        match *event {
            InputEvent::PointerDown { x, y } => self.pointer.begin(x, y),
            InputEvent::PointerMove { x, y } => {
                if let Some((dx, dy)) = self.pointer.move_to(x, y) {
                    if !inert {
                        offset.add(dx * self.sensitivity.pointer, -dy * self.sensitivity.pointer);
                    }
                }
            }
            InputEvent::PointerUp => self.pointer.end(),
            InputEvent::TouchStart { x, y } => self.touch.begin(x, y),
            InputEvent::TouchMove { x, y } => {
                if let Some((dx, dy)) = self.touch.move_to(x, y) {
                    if !inert {
                        offset.add(dx * self.sensitivity.touch, -dy * self.sensitivity.touch);
                    }
                }
            }
            InputEvent::TouchEnd => self.touch.end(),
            InputEvent::DeviceOrientation { alpha, beta, .. } => {
                if inert || !alpha.is_finite() || !beta.is_finite() {
                    return true;
                }
                match self.orientation_baseline {
                    None => {
                        self.orientation_baseline = Some((alpha, beta));
                    }
                    Some((base_alpha, base_beta)) => {
                        // Heading grows when the device turns left, yaw grows to the right
                        let delta_alpha = wrap_degrees(alpha - base_alpha);
                        let delta_beta = beta - base_beta;
                        let scale = self.sensitivity.orientation;
                        offset.set(
                            (-delta_alpha * scale).to_radians(),
                            (delta_beta * scale).to_radians(),
                        );
                    }
                }
            }
            InputEvent::Wheel { delta } => {
                // Field of view comes from the capture lens and is not user-adjustable
                log::trace!("wheel {} ignored in waypoint mode", delta);
            }
            _ => return false,
        }
        true
    }
}
