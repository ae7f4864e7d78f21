//! Landmark Sources
//!
//! Supplies one [`LandmarkFrame`] per sampling tick to the slouch detector.
//! Supports:
//! - Face-mesh index extraction (468-point meshes)
//! - JSON-lines replay of recorded landmark streams
//! - Scripted in-memory frames for tests and demos

pub mod mesh;
pub mod replay;
pub mod scripted;

pub use mesh::{from_mesh, MeshIndex};
pub use replay::ReplaySource;
pub use scripted::ScriptedSource;

use posture::LandmarkFrame;
use thiserror::Error;

/// Landmark source error types.
///
/// "No face" is not an error: sources return [`LandmarkFrame::absent`] for it.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Landmark source unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed landmark record on line {line}: {message}")]
    Malformed { line: usize, message: String },

    #[error("Landmark source exhausted")]
    Exhausted,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SourceError {
    /// Whether the stream has ended and no further frames will come
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, SourceError::Exhausted)
    }
}

/// Produces landmark frames, one call per tick
pub trait LandmarkSource {
    fn get_landmarks(&mut self) -> Result<LandmarkFrame, SourceError>;
}

impl<S: LandmarkSource + ?Sized> LandmarkSource for Box<S> {
    fn get_landmarks(&mut self) -> Result<LandmarkFrame, SourceError> {
        (**self).get_landmarks()
    }
}
