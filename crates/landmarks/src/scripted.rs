//! In-memory scripted landmark source

use std::collections::VecDeque;

use posture::LandmarkFrame;

use crate::{LandmarkSource, SourceError};

/// Plays back a fixed sequence of frames and faults, then reports exhaustion
#[derive(Debug, Default)]
pub struct ScriptedSource {
    queue: VecDeque<Result<LandmarkFrame, SourceError>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Source yielding the given frames in order
    pub fn from_frames(frames: impl IntoIterator<Item = LandmarkFrame>) -> Self {
        Self {
            queue: frames.into_iter().map(Ok).collect(),
        }
    }

    /// Queue `count` copies of a frame
    pub fn push_repeated(&mut self, frame: LandmarkFrame, count: usize) -> &mut Self {
        self.queue.extend(std::iter::repeat_with(|| Ok(frame)).take(count));
        self
    }

    /// Queue a source fault
    pub fn push_fault(&mut self, message: impl Into<String>) -> &mut Self {
        self.queue
            .push_back(Err(SourceError::Unavailable(message.into())));
        self
    }

    /// Frames and faults left
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl LandmarkSource for ScriptedSource {
    fn get_landmarks(&mut self) -> Result<LandmarkFrame, SourceError> {
        self.queue.pop_front().unwrap_or(Err(SourceError::Exhausted))
    }
}
