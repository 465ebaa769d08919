use std::time::Instant;

/// Frame metadata handed to the enabled mode once per animation frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub number: u64,
    /// Timestamp in milliseconds (same clock for every frame of a run)
    pub time_ms: f64,
    /// Seconds since the previous frame
    pub delta: f32,
}

impl FrameInfo {
    pub fn new(number: u64, time_ms: f64, delta: f32) -> Self {
        Self { number, time_ms, delta }
    }
}

/// Infinite iterator of wall-clock frames
/// Use this in a loop: `for frame in frames { ... }`
pub struct FrameIterator {
    frame_number: u64,
    start_time: Instant,
    last_frame_time: Instant,
}

impl FrameIterator {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            frame_number: 0,
            start_time: now,
            last_frame_time: now,
        }
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }
}

impl Default for FrameIterator {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for FrameIterator {
    type Item = FrameInfo;

    fn next(&mut self) -> Option<FrameInfo> {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame_time).as_secs_f32();
        let time_ms = now.duration_since(self.start_time).as_secs_f64() * 1000.0;

        let info = FrameInfo::new(self.frame_number, time_ms, delta);

        self.frame_number += 1;
        self.last_frame_time = now;

        Some(info)
    }
}

/// Deterministic frames at a fixed rate, for headless runs and tests.
/// The first frame is at `start_ms` with a zero delta.
#[derive(Debug, Clone)]
pub struct FixedStepFrames {
    frame_number: u64,
    time_ms: f64,
    step_ms: f64,
}

impl FixedStepFrames {
    pub fn new(fps: f64) -> Self {
        Self::starting_at(0.0, fps)
    }

    pub fn starting_at(start_ms: f64, fps: f64) -> Self {
        let fps = if fps.is_finite() && fps > 0.0 { fps } else { 60.0 };
        Self {
            frame_number: 0,
            time_ms: start_ms,
            step_ms: 1000.0 / fps,
        }
    }

    pub fn step_ms(&self) -> f64 {
        self.step_ms
    }
}

impl Iterator for FixedStepFrames {
    type Item = FrameInfo;

    fn next(&mut self) -> Option<FrameInfo> {
        let delta = if self.frame_number == 0 {
            0.0
        } else {
            (self.step_ms / 1000.0) as f32
        };
        let info = FrameInfo::new(self.frame_number, self.time_ms, delta);
        self.frame_number += 1;
        self.time_ms += self.step_ms;
        Some(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_step_frames_advance_evenly() {
        let frames: Vec<_> = FixedStepFrames::new(50.0).take(3).collect();
        assert_eq!(frames[0].time_ms, 0.0);
        assert_eq!(frames[0].delta, 0.0);
        assert!((frames[2].time_ms - 40.0).abs() < 1e-9);
        assert!((frames[1].delta - 0.02).abs() < 1e-6);
        assert_eq!(frames[2].number, 2);
    }

    #[test]
    fn invalid_rate_falls_back_to_sixty() {
        let frames = FixedStepFrames::new(0.0);
        assert!((frames.step_ms() - 1000.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn wall_clock_frames_are_monotonic() {
        let mut frames = FrameIterator::new();
        let a = frames.next().unwrap();
        let b = frames.next().unwrap();
        assert!(b.time_ms >= a.time_ms);
        assert_eq!(frames.frame_number(), 2);
    }
}
