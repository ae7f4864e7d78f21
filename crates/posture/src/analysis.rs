//! Per-tick detection results

use serde::{Deserialize, Serialize};

/// Posture state observed on one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetectionState {
    /// No usable face this tick
    NoSubject,

    /// Upright, no pending evidence
    Good,

    /// Cooldown ended on this tick with no pending evidence
    Watching,

    /// Slouch evidence accumulating
    Warning,

    /// Sustained slouch, alert fired this tick
    Alerting,

    /// Refractory period after an alert with no pending evidence
    Cooldown,
}

/// Result of one detector step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub state: DetectionState,

    /// Evidence counter after this step
    pub counter: u32,

    /// Set only on the tick that transitions into [`DetectionState::Alerting`]
    pub alert_requested: bool,

    /// Normalized nose-below-eyes offset, when a face was evaluated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<f32>,

    /// Threshold the offset was compared against
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f32>,
}

impl DetectionResult {
    pub(crate) fn no_subject(counter: u32) -> Self {
        Self {
            state: DetectionState::NoSubject,
            counter,
            alert_requested: false,
            offset: None,
            threshold: None,
        }
    }

    /// Whether a face was evaluated on this tick
    pub fn subject_present(&self) -> bool {
        self.state != DetectionState::NoSubject
    }
}
