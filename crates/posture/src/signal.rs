//! Slouch signal extraction and threshold mapping

use crate::config::{clamp_sensitivity, DetectorConfig};
use crate::landmarks::{CoordinateSpace, FaceLandmarks, LandmarkFrame};

/// Mean vertical position of the four eye corners
pub fn eye_level(face: &FaceLandmarks) -> f32 {
    let left = (face.left_eye_inner.y + face.left_eye_outer.y) / 2.0;
    let right = (face.right_eye_inner.y + face.right_eye_outer.y) / 2.0;
    (left + right) / 2.0
}

/// How far the nose sits below eye level, as a fraction of frame height.
///
/// Returns `None` for absent or invalid frames.
pub fn vertical_offset(frame: &LandmarkFrame) -> Option<f32> {
    let face = frame.valid_face()?;
    let offset = face.nose.y - eye_level(face);
    Some(match frame.space {
        CoordinateSpace::Normalized => offset,
        CoordinateSpace::Pixels { frame_height } => offset / frame_height,
    })
}

/// Map the sensitivity dial onto `[min, max]`.
///
/// Sensitivity 100 gives `min`; lower sensitivity moves linearly toward `max`.
/// Values outside `[1, 100]` are clamped first. Expects `min < max`.
pub fn threshold(sensitivity: u8, min: f32, max: f32) -> f32 {
    let s = f32::from(clamp_sensitivity(sensitivity)) / 100.0;
    // f32 rounding can land a hair outside the bounds at s = 1.0
    (max - s * (max - min)).max(min).min(max)
}

/// Decision threshold for a configuration
pub fn threshold_for(config: &DetectorConfig) -> f32 {
    threshold(config.sensitivity, config.min_threshold, config.max_threshold)
}
