//! Alerting System
//!
//! Presentation collaborators of the slouch detector: status text, audio cue,
//! and debug overlay, composed by the alert dispatcher.

mod audio;
mod manager;
mod overlay;
mod status;

pub use audio::{AudioSink, SilentAudio, TerminalBell};
pub use manager::{AlertDispatcher, AlertStats};
pub use overlay::{LogOverlay, OverlaySink};
pub use status::{Status, StatusBoard};

use thiserror::Error;

/// Alert error types
#[derive(Error, Debug)]
pub enum AlertError {
    #[error("Audio playback failed: {0}")]
    Playback(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
