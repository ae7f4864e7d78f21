//! Debounced slouch detector

use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::analysis::{DetectionResult, DetectionState};
use crate::config::{clamp_sensitivity, DetectorConfig};
use crate::landmarks::LandmarkFrame;
use crate::signal::{threshold_for, vertical_offset};
use crate::state::DetectorState;

/// Converts per-tick landmark frames into debounced alert decisions.
///
/// Owns its [`DetectorState`] exclusively. Time only enters through the
/// `now` argument of [`SlouchDetector::step`], so the cooldown is a deadline
/// comparison rather than a timer.
#[derive(Debug, Clone)]
pub struct SlouchDetector {
    config: DetectorConfig,
    state: DetectorState,
}

impl SlouchDetector {
    /// Create a detector. Sensitivity is clamped into `[1, 100]`.
    pub fn new(mut config: DetectorConfig) -> Self {
        config.sensitivity = config.clamped_sensitivity();
        Self {
            config,
            state: DetectorState::default(),
        }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn state(&self) -> &DetectorState {
        &self.state
    }

    /// Move the sensitivity dial; takes effect on the next step
    pub fn set_sensitivity(&mut self, sensitivity: u8) {
        self.config.sensitivity = clamp_sensitivity(sensitivity);
    }

    /// Current decision threshold
    pub fn threshold(&self) -> f32 {
        threshold_for(&self.config)
    }

    /// Process one tick
    pub fn step(&mut self, frame: &LandmarkFrame, now: Instant) -> DetectionResult {
        let cooldown_ended = self.state.expire_cooldown(now);
        if cooldown_ended {
            debug!("Cooldown expired");
        }

        // Dropout holds the counter
        let Some(offset) = vertical_offset(frame) else {
            return DetectionResult::no_subject(self.state.counter);
        };

        let threshold = self.threshold();
        let cooling_down = self.state.is_cooling_down();

        if offset > threshold && !cooling_down {
            self.state.counter += 1;
        } else {
            self.state.counter = self.state.counter.saturating_sub(self.config.decay_on_good);
        }

        let (state, alert_requested) =
            if self.state.counter > self.config.sustain_count && !cooling_down {
                info!(
                    "Slouch detected: offset {:.3} > threshold {:.3}",
                    offset, threshold
                );
                self.state
                    .start_cooldown(now, Duration::from_millis(self.config.cooldown_ms));
                self.state.counter = 0;
                (DetectionState::Alerting, true)
            } else if self.state.counter > 0 {
                (DetectionState::Warning, false)
            } else if cooldown_ended {
                (DetectionState::Watching, false)
            } else if !cooling_down {
                (DetectionState::Good, false)
            } else {
                (DetectionState::Cooldown, false)
            };

        debug!(
            offset,
            threshold,
            counter = self.state.counter,
            ?state,
            "Detector step"
        );

        DetectionResult {
            state,
            counter: self.state.counter,
            alert_requested,
            offset: Some(offset),
            threshold: Some(threshold),
        }
    }

    /// Reinitialise state (on stop/restart)
    pub fn reset(&mut self) {
        self.state.reset();
    }
}

impl Default for SlouchDetector {
    fn default() -> Self {
        Self::new(DetectorConfig::default())
    }
}
