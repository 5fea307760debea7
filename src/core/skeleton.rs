// Static skeleton topology and overlay styling

use crate::models::pose::{BodyLandmark, BODY_LANDMARK_COUNT};
use serde::{Deserialize, Serialize};

/// Skeleton connections drawn over the camera feed (start joint, end joint).
/// A readability subset of the full MediaPipe topology: arms, shoulders,
/// torso, and legs.
pub const SKELETON_EDGES: [(BodyLandmark, BodyLandmark); 12] = [
    // Left arm
    (BodyLandmark::LeftShoulder, BodyLandmark::LeftElbow),
    (BodyLandmark::LeftElbow, BodyLandmark::LeftWrist),
    // Right arm
    (BodyLandmark::RightShoulder, BodyLandmark::RightElbow),
    (BodyLandmark::RightElbow, BodyLandmark::RightWrist),
    // Shoulders
    (BodyLandmark::LeftShoulder, BodyLandmark::RightShoulder),
    // Torso
    (BodyLandmark::LeftShoulder, BodyLandmark::LeftHip),
    (BodyLandmark::RightShoulder, BodyLandmark::RightHip),
    (BodyLandmark::LeftHip, BodyLandmark::RightHip),
    // Left leg
    (BodyLandmark::LeftHip, BodyLandmark::LeftKnee),
    (BodyLandmark::LeftKnee, BodyLandmark::LeftAnkle),
    // Right leg
    (BodyLandmark::RightHip, BodyLandmark::RightKnee),
    (BodyLandmark::RightKnee, BodyLandmark::RightAnkle),
];

/// Edge set as raw indices into a landmark sequence
pub fn edge_indices() -> Vec<(usize, usize)> {
    SKELETON_EDGES
        .iter()
        .map(|&(a, b)| (a.index(), b.index()))
        .collect()
}

/// Skeleton line color (RGB)
pub const LINE_COLOR: u32 = 0x38BDF8; // sky blue

/// Joint marker color (RGB)
pub const MARKER_COLOR: u32 = 0xF472B6; // pink

pub const LINE_WIDTH: f32 = 3.0;
pub const MARKER_RADIUS: f32 = 4.0;

/// Stroke and fill parameters for the overlay renderer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayStyle {
    pub line_color: u32,
    pub line_width: f32,
    pub marker_color: u32,
    pub marker_radius: f32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            line_color: LINE_COLOR,
            line_width: LINE_WIDTH,
            marker_color: MARKER_COLOR,
            marker_radius: MARKER_RADIUS,
        }
    }
}
