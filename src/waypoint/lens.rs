//! Lens intrinsics to field of view.
//!
//! Focal lengths are treated as 35 mm-equivalent against a 36 mm wide
//! reference sensor; the sensor height follows from the authored aspect ratio
//! and the diagonal angle of view is what the camera uses.

use crate::error::{NavError, NavResult};

pub const SENSOR_WIDTH_MM: f32 = 36.0;
pub const DEFAULT_LENS_MM: f32 = 35.0;
pub const DEFAULT_ASPECT_RATIO: &str = "16:9";
pub const MIN_FOV_DEGREES: f32 = 30.0;
pub const MAX_FOV_DEGREES: f32 = 110.0;

const DEFAULT_ASPECT: f32 = 16.0 / 9.0;

/// Strict `"W:H"` parse into `W / H`
pub fn try_parse_aspect_ratio(text: &str) -> NavResult<f32> {
    let parsed = text.split_once(':').and_then(|(w, h)| {
        let w: f32 = w.trim().parse().ok()?;
        let h: f32 = h.trim().parse().ok()?;
        let ratio = w / h;
        (w > 0.0 && h > 0.0 && ratio.is_finite()).then_some(ratio)
    });
    parsed.ok_or_else(|| NavError::Configuration(format!("aspect ratio {:?} is malformed", text)))
}

/// Parse `"W:H"` into `W / H`; anything unusable yields 16:9
pub fn parse_aspect_ratio(value: Option<&str>) -> f32 {
    let Some(text) = value else {
        return DEFAULT_ASPECT;
    };
    try_parse_aspect_ratio(text).unwrap_or_else(|err| {
        log::warn!("{}, using {}", err, DEFAULT_ASPECT_RATIO);
        DEFAULT_ASPECT
    })
}

/// Positive finite focal length, or the default
pub fn lens_or_default(lens_mm: Option<f32>) -> f32 {
    match lens_mm {
        Some(lens) if lens.is_finite() && lens > 0.0 => lens,
        Some(lens) => {
            let err = NavError::Configuration(format!("lens {} mm is unusable", lens));
            log::warn!("{}, using {} mm", err, DEFAULT_LENS_MM);
            DEFAULT_LENS_MM
        }
        None => DEFAULT_LENS_MM,
    }
}

/// Unclamped diagonal field of view in degrees
pub fn raw_fov_degrees(lens_mm: f32, aspect: f32) -> f32 {
    let sensor_height = SENSOR_WIDTH_MM / aspect;
    let sensor_diagonal = SENSOR_WIDTH_MM.hypot(sensor_height);
    (2.0 * (sensor_diagonal / (2.0 * lens_mm)).atan()).to_degrees()
}

/// Field of view in degrees, clamped to [30, 110]
pub fn fov_degrees(lens_mm: f32, aspect: f32) -> f32 {
    raw_fov_degrees(lens_mm, aspect).clamp(MIN_FOV_DEGREES, MAX_FOV_DEGREES)
}
