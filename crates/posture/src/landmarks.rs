//! Per-tick landmark input

use serde::{Deserialize, Serialize};

/// 2-D landmark position
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f32,
    pub y: f32,
}

impl Point2D {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Unit system of landmark coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CoordinateSpace {
    /// Coordinates already divided by frame width/height (0..1)
    #[default]
    Normalized,
    /// Raw pixel coordinates of a frame with the given height
    Pixels { frame_height: f32 },
}

/// The five landmarks the slouch signal needs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceLandmarks {
    pub nose: Point2D,
    pub left_eye_inner: Point2D,
    pub left_eye_outer: Point2D,
    pub right_eye_inner: Point2D,
    pub right_eye_outer: Point2D,
}

impl FaceLandmarks {
    fn points(&self) -> [Point2D; 5] {
        [
            self.nose,
            self.left_eye_inner,
            self.left_eye_outer,
            self.right_eye_inner,
            self.right_eye_outer,
        ]
    }
}

/// Landmarks observed on one sampling tick.
///
/// A frame either carries all five points or none; partial sets are built as
/// [`LandmarkFrame::absent`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LandmarkFrame {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub face: Option<FaceLandmarks>,
    #[serde(default)]
    pub space: CoordinateSpace,
}

impl LandmarkFrame {
    /// Frame with a detected face
    pub fn new(face: FaceLandmarks, space: CoordinateSpace) -> Self {
        Self {
            face: Some(face),
            space,
        }
    }

    /// Frame where no face was found
    pub fn absent() -> Self {
        Self::default()
    }

    /// Whether a face was detected this tick
    pub fn is_present(&self) -> bool {
        self.face.is_some()
    }

    /// Face landmarks, if present and usable.
    ///
    /// Non-finite coordinates or a non-positive pixel frame height make the
    /// frame invalid, which callers treat the same as no face.
    pub fn valid_face(&self) -> Option<&FaceLandmarks> {
        let face = self.face.as_ref()?;
        if let CoordinateSpace::Pixels { frame_height } = self.space {
            if !(frame_height.is_finite() && frame_height > 0.0) {
                return None;
            }
        }
        face.points().iter().all(Point2D::is_finite).then_some(face)
    }
}
