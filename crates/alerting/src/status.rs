//! Status text presentation

use std::fmt;

use posture::{DetectionResult, DetectionState};
use serde::Serialize;

/// User-facing monitor status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Status {
    Initializing,
    Monitoring,
    Good,
    Watching,
    Warning(u32),
    Alert,
    NoSubject,
    Stopped,
    Error(String),
}

impl Status {
    /// Display colour as a hex string, where the status has one
    pub fn colour(&self) -> Option<&'static str> {
        match self {
            Status::Monitoring | Status::Watching => Some("#4B5CFF"),
            Status::Good => Some("#22C55E"),
            Status::Warning(_) => Some("#F59E0B"),
            Status::Alert => Some("#FF3030"),
            Status::NoSubject => Some("#A1A5B2"),
            Status::Stopped => Some("#6B7280"),
            Status::Initializing | Status::Error(_) => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Initializing => f.write_str("Initializing landmark source..."),
            Status::Monitoring => f.write_str("MONITORING // ACTIVE"),
            Status::Good => f.write_str("all good"),
            Status::Watching => f.write_str("watching you..."),
            Status::Warning(counter) => write!(f, "hmm... {counter}"),
            Status::Alert => f.write_str("Upright, please!"),
            Status::NoSubject => f.write_str("who dis?"),
            Status::Stopped => f.write_str("stopped"),
            Status::Error(message) => write!(f, "ERROR: {message}"),
        }
    }
}

/// Current status, updated from detector results
#[derive(Debug, Clone)]
pub struct StatusBoard {
    current: Status,
}

impl StatusBoard {
    pub fn new() -> Self {
        Self {
            current: Status::Initializing,
        }
    }

    pub fn current(&self) -> &Status {
        &self.current
    }

    /// Replace the status. Returns `true` if it changed.
    pub fn set(&mut self, status: Status) -> bool {
        if self.current == status {
            return false;
        }
        self.current = status;
        true
    }

    /// Apply a detector result. Returns `true` if the status changed.
    ///
    /// Cooldown ticks leave the alert text in place.
    pub fn apply(&mut self, result: &DetectionResult) -> bool {
        let next = match result.state {
            DetectionState::NoSubject => Status::NoSubject,
            DetectionState::Good => Status::Good,
            DetectionState::Watching => Status::Watching,
            DetectionState::Warning => Status::Warning(result.counter),
            DetectionState::Alerting => Status::Alert,
            DetectionState::Cooldown => return false,
        };
        self.set(next)
    }
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self::new()
    }
}
