//! Detector state tracking

use std::time::{Duration, Instant};

/// Mutable state of one detector run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectorState {
    /// Consecutive slouch evidence
    pub counter: u32,

    /// End of the refractory period after the last alert
    pub cooldown_expires_at: Option<Instant>,
}

impl DetectorState {
    /// Whether an alert is currently suppressed
    pub fn is_cooling_down(&self) -> bool {
        self.cooldown_expires_at.is_some()
    }

    /// Clear the cooldown once `now` has reached the deadline.
    ///
    /// Returns `true` if the cooldown ended on this call.
    pub fn expire_cooldown(&mut self, now: Instant) -> bool {
        match self.cooldown_expires_at {
            Some(deadline) if now >= deadline => {
                self.cooldown_expires_at = None;
                true
            }
            _ => false,
        }
    }

    /// Start a cooldown lasting `duration` from `now`
    pub fn start_cooldown(&mut self, now: Instant, duration: Duration) {
        self.cooldown_expires_at = Some(now + duration);
    }

    /// Reset state (on stop/restart)
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cooldown_deadline_inclusive() {
        let t0 = Instant::now();
        let mut state = DetectorState::default();
        state.start_cooldown(t0, Duration::from_millis(3000));
        assert!(state.is_cooling_down());

        assert!(!state.expire_cooldown(t0 + Duration::from_millis(2999)));
        assert!(state.is_cooling_down());

        assert!(state.expire_cooldown(t0 + Duration::from_millis(3000)));
        assert!(!state.is_cooling_down());
    }

    #[test]
    fn test_reset() {
        let mut state = DetectorState {
            counter: 7,
            cooldown_expires_at: Some(Instant::now()),
        };
        state.reset();
        assert_eq!(state, DetectorState::default());
    }
}
