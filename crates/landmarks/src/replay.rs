//! JSON-lines replay of recorded landmark streams
//!
//! One record per line:
//!
//! ```json
//! {"faces": [[{"x": 0.5, "y": 0.4}, ...]], "frame_height": 480}
//! ```
//!
//! Each face is either a face-mesh point array or an object with the five
//! named points (`nose`, `left_eye_inner`, ...). Only the first face is used.
//! With `frame_height` set the coordinates are pixels, otherwise normalized.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use posture::{CoordinateSpace, FaceLandmarks, LandmarkFrame, Point2D};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::mesh::from_mesh;
use crate::{LandmarkSource, SourceError};

#[derive(Debug, Deserialize)]
struct ReplayRecord {
    #[serde(default)]
    faces: Vec<FaceRecord>,
    #[serde(default)]
    frame_height: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FaceRecord {
    Mesh(Vec<Point2D>),
    Named(FaceLandmarks),
}

impl ReplayRecord {
    fn into_frame(self) -> LandmarkFrame {
        let space = match self.frame_height {
            Some(frame_height) => CoordinateSpace::Pixels { frame_height },
            None => CoordinateSpace::Normalized,
        };
        match self.faces.into_iter().next() {
            Some(FaceRecord::Mesh(points)) => from_mesh(&points, space),
            Some(FaceRecord::Named(face)) => LandmarkFrame::new(face, space),
            None => LandmarkFrame::absent(),
        }
    }
}

/// Replays landmark frames from a JSON-lines stream
pub struct ReplaySource<R> {
    reader: R,
    line: usize,
    buf: String,
}

impl ReplaySource<BufReader<File>> {
    /// Open a recording on disk
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            SourceError::Unavailable(format!("cannot open {}: {}", path.display(), e))
        })?;
        info!("Replaying landmarks from {}", path.display());
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead> ReplaySource<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: String::new(),
        }
    }

    /// Number of lines consumed so far
    pub fn lines_read(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> LandmarkSource for ReplaySource<R> {
    fn get_landmarks(&mut self) -> Result<LandmarkFrame, SourceError> {
        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => {
                    debug!("Replay finished after {} lines", self.line);
                    return Err(SourceError::Exhausted);
                }
                Ok(_) => self.line += 1,
                // Invalid UTF-8 still consumes the line
                Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                    self.line += 1;
                    warn!("Skipping undecodable replay line {}: {}", self.line, e);
                    return Err(SourceError::Malformed {
                        line: self.line,
                        message: e.to_string(),
                    });
                }
                Err(e) => return Err(e.into()),
            }

            let text = self.buf.trim();
            if text.is_empty() {
                continue;
            }

            return match serde_json::from_str::<ReplayRecord>(text) {
                Ok(record) => Ok(record.into_frame()),
                Err(e) => {
                    warn!("Skipping malformed replay line {}: {}", self.line, e);
                    Err(SourceError::Malformed {
                        line: self.line,
                        message: e.to_string(),
                    })
                }
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::tests::mesh;
    use std::io::{Cursor, Write};

    fn mesh_line(nose_y: f32, eye_y: f32, frame_height: Option<f32>) -> String {
        let record = serde_json::json!({
            "faces": [mesh(nose_y, eye_y)],
            "frame_height": frame_height,
        });
        record.to_string()
    }

    #[test]
    fn test_mesh_record() {
        let input = mesh_line(0.55, 0.4, None);
        let mut source = ReplaySource::from_reader(Cursor::new(input));

        let frame = source.get_landmarks().unwrap();
        assert_eq!(frame.space, CoordinateSpace::Normalized);
        assert_eq!(frame.face.unwrap().nose.y, 0.55);
        assert!(source.get_landmarks().unwrap_err().is_end_of_stream());
    }

    #[test]
    fn test_named_record_in_pixels() {
        let input = r#"{"faces":[{"nose":{"x":320,"y":250},"left_eye_inner":{"x":300,"y":200},"left_eye_outer":{"x":280,"y":200},"right_eye_inner":{"x":340,"y":200},"right_eye_outer":{"x":360,"y":200}}],"frame_height":480}"#;
        let mut source = ReplaySource::from_reader(Cursor::new(input));

        let frame = source.get_landmarks().unwrap();
        assert_eq!(frame.space, CoordinateSpace::Pixels { frame_height: 480.0 });
        let offset = posture::signal::vertical_offset(&frame).unwrap();
        assert!((offset - 50.0 / 480.0).abs() < 1e-6);
    }

    #[test]
    fn test_no_faces_and_blank_lines() {
        let input = "\n{\"faces\": []}\n\n{}\n";
        let mut source = ReplaySource::from_reader(Cursor::new(input));

        assert!(!source.get_landmarks().unwrap().is_present());
        assert!(!source.get_landmarks().unwrap().is_present());
        assert!(matches!(source.get_landmarks(), Err(SourceError::Exhausted)));
        assert_eq!(source.lines_read(), 4);
    }

    #[test]
    fn test_malformed_line_then_recovers() {
        let input = format!("not json\n{}\n", mesh_line(0.6, 0.4, None));
        let mut source = ReplaySource::from_reader(Cursor::new(input));

        match source.get_landmarks() {
            Err(SourceError::Malformed { line, .. }) => assert_eq!(line, 1),
            other => panic!("expected malformed, got {:?}", other),
        }
        assert!(source.get_landmarks().unwrap().is_present());
    }

    #[test]
    fn test_invalid_utf8_line_keeps_line_numbers() {
        let input: &[u8] = b"\xff\xfe\n{}\noops\n";
        let mut source = ReplaySource::from_reader(Cursor::new(input));

        match source.get_landmarks() {
            Err(SourceError::Malformed { line, .. }) => assert_eq!(line, 1),
            other => panic!("expected malformed, got {:?}", other),
        }
        assert!(!source.get_landmarks().unwrap().is_present());
        match source.get_landmarks() {
            Err(SourceError::Malformed { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected malformed, got {:?}", other),
        }
        assert_eq!(source.lines_read(), 3);
    }

    #[test]
    fn test_first_face_only() {
        let record = serde_json::json!({
            "faces": [mesh(0.6, 0.4), mesh(0.9, 0.1)],
        });
        let mut source = ReplaySource::from_reader(Cursor::new(record.to_string()));
        assert_eq!(source.get_landmarks().unwrap().face.unwrap().nose.y, 0.6);
    }

    #[test]
    fn test_open_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", mesh_line(0.6, 0.4, None)).unwrap();
        file.flush().unwrap();

        let mut source = ReplaySource::open(file.path()).unwrap();
        assert!(source.get_landmarks().unwrap().is_present());
    }

    #[test]
    fn test_open_missing_file() {
        let result = ReplaySource::open("/nonexistent/landmarks.jsonl");
        assert!(matches!(result, Err(SourceError::Unavailable(_))));
    }
}
