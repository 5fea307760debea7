// Data models for pose landmarks and detector configuration

use serde::{Deserialize, Serialize};

/// A normalized body-joint coordinate produced by the pose detector
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32, // Normalized [0, 1] for image coordinates
    pub y: f32, // Normalized [0, 1] for image coordinates
    pub z: f32, // Depth (relative to reference point, e.g., hip midpoint)
    pub visibility: f32, // Detection confidence [0, 1]
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32, visibility: f32) -> Self {
        Self {
            x,
            y,
            z,
            visibility,
        }
    }
}

/// Number of landmarks in the MediaPipe Pose topology
pub const BODY_LANDMARK_COUNT: usize = 33;

/// MediaPipe Pose landmark indices (33 total)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum BodyLandmark {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl BodyLandmark {
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Detector runtime mode. Video mode tracks across frames and requires
/// increasing timestamps per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunningMode {
    Image,
    Video,
}

impl RunningMode {
    /// Video-mode detectors track across frames and reject a detection call
    /// whose timestamp does not advance past the previous one. Image mode
    /// treats every frame as independent.
    pub const fn requires_increasing_timestamps(self) -> bool {
        matches!(self, RunningMode::Video)
    }
}

/// Configuration handed to the detector factory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    pub model_asset_path: String,
    pub running_mode: RunningMode,
    pub num_poses: u32,
    pub min_detection_confidence: f32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            model_asset_path: "models/pose_landmarker_full.task".to_string(),
            running_mode: RunningMode::Video,
            num_poses: 1,
            min_detection_confidence: 0.5,
        }
    }
}

impl DetectorConfig {
    pub fn validate(&self) -> PoseResult<()> {
        if self.model_asset_path.is_empty() {
            return Err(PoseError::InvalidConfig(
                "model_asset_path must not be empty".to_string(),
            ));
        }
        if self.num_poses == 0 {
            return Err(PoseError::InvalidConfig(
                "num_poses must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.min_detection_confidence) {
            return Err(PoseError::InvalidConfig(
                "min_detection_confidence must be within [0, 1]".to_string(),
            ));
        }
        Ok(())
    }
}

/// Error types for detector operations
#[derive(Debug, thiserror::Error)]
pub enum PoseError {
    #[error("Model loading failed: {0}")]
    ModelLoadFailed(String),

    #[error("Inference failed: {0}")]
    InferenceFailed(String),

    #[error("Overlay surface failed: {0}")]
    SurfaceFailed(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type PoseResult<T> = Result<T, PoseError>;
