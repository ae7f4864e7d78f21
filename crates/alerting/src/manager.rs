//! Alert dispatcher implementation

use std::time::Instant;

use posture::DetectionResult;
use tracing::{debug, error, info, warn};

use crate::audio::{AudioSink, SilentAudio};
use crate::status::{Status, StatusBoard};

/// Counters of dispatched alerts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlertStats {
    /// Alerts raised by the detector
    pub fired: usize,
    /// Alerts whose audio cue failed to play
    pub audio_failures: usize,
    /// When the last alert was raised
    pub last_fired: Option<Instant>,
}

/// Routes detector results to the status board and audio cue
pub struct AlertDispatcher {
    audio: Box<dyn AudioSink + Send>,
    board: StatusBoard,
    stats: AlertStats,
}

impl AlertDispatcher {
    /// Create a dispatcher around an audio sink
    pub fn new(audio: impl AudioSink + Send + 'static) -> Self {
        Self {
            audio: Box::new(audio),
            board: StatusBoard::new(),
            stats: AlertStats::default(),
        }
    }

    /// Handle one detector result.
    ///
    /// Plays the audio cue when an alert was requested; playback failure is
    /// logged and otherwise ignored.
    pub fn dispatch(&mut self, result: &DetectionResult, now: Instant) {
        if result.alert_requested {
            self.stats.fired += 1;
            self.stats.last_fired = Some(now);
            info!("Posture alert raised (count: {})", self.stats.fired);

            if let Err(e) = self.audio.play() {
                self.stats.audio_failures += 1;
                warn!("Alert sound failed: {}", e);
            }
        }

        if self.board.apply(result) {
            self.log_status();
        }
    }

    /// Set a lifecycle status (monitoring, stopped, error)
    pub fn set_status(&mut self, status: Status) {
        if self.board.set(status) {
            self.log_status();
        }
    }

    pub fn status(&self) -> &Status {
        self.board.current()
    }

    pub fn stats(&self) -> AlertStats {
        self.stats
    }

    fn log_status(&self) {
        let status = self.board.current();
        match status {
            Status::Warning(_) => debug!(colour = status.colour(), "Status: {}", status),
            Status::Error(_) => error!("Status: {}", status),
            _ => info!(colour = status.colour(), "Status: {}", status),
        }
    }
}

impl Default for AlertDispatcher {
    fn default() -> Self {
        Self::new(SilentAudio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AlertError;
    use posture::DetectionState;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingAudio {
        plays: Arc<AtomicUsize>,
        fail: bool,
    }

    impl AudioSink for CountingAudio {
        fn play(&mut self) -> Result<(), AlertError> {
            self.plays.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(AlertError::Playback("autoplay rejected".into()))
            } else {
                Ok(())
            }
        }
    }

    fn result(state: DetectionState, alert_requested: bool) -> DetectionResult {
        DetectionResult {
            state,
            counter: 0,
            alert_requested,
            offset: Some(0.12),
            threshold: Some(0.09),
        }
    }

    #[test]
    fn test_plays_once_per_alert() {
        let plays = Arc::new(AtomicUsize::new(0));
        let mut dispatcher = AlertDispatcher::new(CountingAudio {
            plays: plays.clone(),
            fail: false,
        });
        let now = Instant::now();

        dispatcher.dispatch(&result(DetectionState::Alerting, true), now);
        dispatcher.dispatch(&result(DetectionState::Cooldown, false), now);
        dispatcher.dispatch(&result(DetectionState::Cooldown, false), now);

        assert_eq!(plays.load(Ordering::SeqCst), 1);
        assert_eq!(dispatcher.stats().fired, 1);
        assert_eq!(dispatcher.stats().last_fired, Some(now));
        assert_eq!(dispatcher.status(), &Status::Alert);
    }

    #[test]
    fn test_audio_failure_is_not_fatal() {
        let plays = Arc::new(AtomicUsize::new(0));
        let mut dispatcher = AlertDispatcher::new(CountingAudio {
            plays: plays.clone(),
            fail: true,
        });

        dispatcher.dispatch(&result(DetectionState::Alerting, true), Instant::now());
        let stats = dispatcher.stats();
        assert_eq!(stats.fired, 1);
        assert_eq!(stats.audio_failures, 1);
        assert_eq!(dispatcher.status(), &Status::Alert);
    }

    #[test]
    fn test_lifecycle_status() {
        let mut dispatcher = AlertDispatcher::default();
        assert_eq!(dispatcher.status(), &Status::Initializing);
        dispatcher.set_status(Status::Monitoring);
        assert_eq!(dispatcher.status(), &Status::Monitoring);
        dispatcher.set_status(Status::Stopped);
        assert_eq!(dispatcher.status().to_string(), "stopped");
    }
}
