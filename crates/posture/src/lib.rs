//! Slouch Detection
//!
//! Turns per-frame facial landmarks into a debounced posture alert:
//! - Nose-below-eyes offset extraction
//! - Sensitivity to threshold mapping
//! - Hysteresis counter with sustain window
//! - Deadline-based cooldown between alerts

pub mod analysis;
pub mod config;
pub mod detector;
pub mod landmarks;
pub mod signal;
pub mod state;

pub use analysis::{DetectionResult, DetectionState};
pub use config::{clamp_raw_sensitivity, DetectorConfig, Profile};
pub use detector::SlouchDetector;
pub use landmarks::{CoordinateSpace, FaceLandmarks, LandmarkFrame, Point2D};
pub use state::DetectorState;

use thiserror::Error;

/// Posture error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PostureError {
    #[error("Configuration error: {0}")]
    Config(String),
}
