use glam::Vec3;

use crate::math::rotation::nlerp_direction;

pub const TRANSITION_DURATION_MS: f64 = 2000.0;

/// Cubic ease-in-out on [0, 1]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Eased interpolation from the current camera pose to a waypoint pose
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionAnimation {
    pub start_position: Vec3,
    pub target_position: Vec3,
    pub start_fov: f32,
    pub target_fov: f32,
    pub start_direction: Vec3,
    pub target_direction: Vec3,
    /// Stamped with the first frame time when not known at creation
    pub start_timestamp: Option<f64>,
    pub duration_ms: f64,
    /// Waypoint that becomes current on completion
    pub target_index: usize,
}

/// Interpolated pose at one instant of a transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionSample {
    pub position: Vec3,
    pub fov: f32,
    pub direction: Vec3,
    /// Linear (un-eased) progress in [0, 1]
    pub progress: f32,
}

impl TransitionAnimation {
    pub fn progress_at(&self, now_ms: f64) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        let start = self.start_timestamp.unwrap_or(now_ms);
        let elapsed = (now_ms - start).max(0.0);
        (elapsed / self.duration_ms).min(1.0) as f32
    }

    pub fn sample(&self, now_ms: f64) -> TransitionSample {
        let progress = self.progress_at(now_ms);
        if progress >= 1.0 {
            return TransitionSample {
                position: self.target_position,
                fov: self.target_fov,
                direction: self.target_direction,
                progress: 1.0,
            };
        }
        let eased = ease_in_out_cubic(progress);
        TransitionSample {
            position: self.start_position.lerp(self.target_position, eased),
            fov: lerp(self.start_fov, self.target_fov, eased),
            direction: nlerp_direction(self.start_direction, self.target_direction, eased),
            progress,
        }
    }
}

/// Outcome of advancing the animator by one frame
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionStep {
    InProgress(TransitionSample),
    /// Final sample plus the animation that just ended
    Finished(TransitionSample, TransitionAnimation),
}

/// Runs at most one transition at a time; there is no queue
#[derive(Debug, Clone, Default)]
pub struct TransitionAnimator {
    active: Option<TransitionAnimation>,
}

impl TransitionAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_transitioning(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&TransitionAnimation> {
        self.active.as_ref()
    }

    /// Returns false, leaving the running animation untouched, while one is in flight
    pub fn start(&mut self, animation: TransitionAnimation) -> bool {
        if self.active.is_some() {
            return false;
        }
        self.active = Some(animation);
        true
    }

    /// Advance to `now_ms`; `None` when idle
    pub fn step(&mut self, now_ms: f64) -> Option<TransitionStep> {
        let animation = self.active.as_mut()?;
        if animation.start_timestamp.is_none() {
            animation.start_timestamp = Some(now_ms);
        }
        let sample = animation.sample(now_ms);
        if sample.progress >= 1.0 {
            let finished = self.active.take()?;
            Some(TransitionStep::Finished(sample, finished))
        } else {
            Some(TransitionStep::InProgress(sample))
        }
    }

    /// Drop the running animation, if any
    pub fn cancel(&mut self) -> Option<TransitionAnimation> {
        self.active.take()
    }
}
