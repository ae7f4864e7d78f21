//! Debug overlay sinks

use posture::LandmarkFrame;
use tracing::debug;

/// Receives landmark points for debug drawing
pub trait OverlaySink {
    fn draw(&mut self, frame: &LandmarkFrame);
    fn clear(&mut self);
}

/// Overlay that logs the landmark points at debug level
#[derive(Debug, Default)]
pub struct LogOverlay {
    drawn: u64,
}

impl LogOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames drawn since the last clear
    pub fn drawn(&self) -> u64 {
        self.drawn
    }
}

impl OverlaySink for LogOverlay {
    fn draw(&mut self, frame: &LandmarkFrame) {
        let Some(face) = frame.face.as_ref() else {
            return;
        };
        self.drawn += 1;
        debug!(
            nose = ?(face.nose.x, face.nose.y),
            left_eye = ?(face.left_eye_inner.y, face.left_eye_outer.y),
            right_eye = ?(face.right_eye_inner.y, face.right_eye_outer.y),
            space = ?frame.space,
            "Overlay landmarks"
        );
    }

    fn clear(&mut self) {
        self.drawn = 0;
    }
}
