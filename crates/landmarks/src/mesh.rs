//! Face-mesh landmark extraction

use posture::{CoordinateSpace, FaceLandmarks, LandmarkFrame, Point2D};

/// Indices of the required points in a 468-point face mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum MeshIndex {
    NoseTip = 1,
    LeftEyeInner = 33,
    LeftEyeOuter = 133,
    RightEyeInner = 362,
    RightEyeOuter = 263,
}

impl MeshIndex {
    pub fn as_index(self) -> usize {
        self as usize
    }

    fn pick(self, points: &[Point2D]) -> Option<Point2D> {
        points.get(self.as_index()).copied()
    }
}

/// Build a frame from a face mesh.
///
/// Any required index missing from `points` yields an absent frame.
pub fn from_mesh(points: &[Point2D], space: CoordinateSpace) -> LandmarkFrame {
    let face = (|| {
        Some(FaceLandmarks {
            nose: MeshIndex::NoseTip.pick(points)?,
            left_eye_inner: MeshIndex::LeftEyeInner.pick(points)?,
            left_eye_outer: MeshIndex::LeftEyeOuter.pick(points)?,
            right_eye_inner: MeshIndex::RightEyeInner.pick(points)?,
            right_eye_outer: MeshIndex::RightEyeOuter.pick(points)?,
        })
    })();

    match face {
        Some(face) => LandmarkFrame::new(face, space),
        None => LandmarkFrame::absent(),
    }
}
