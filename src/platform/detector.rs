// Pose detector seam
// Abstraction over MediaPipe PoseLandmarker or an equivalent vision backend

use crate::models::camera::RawFrame;
use crate::models::pose::{DetectorConfig, Landmark, PoseResult};
use async_trait::async_trait;

/// Builds detector instances from a model asset. Creation is asynchronous
/// because model files load off the UI thread; callers must handle teardown
/// racing an in-flight create (see `core::loader`).
#[async_trait]
pub trait DetectorFactory: Send + Sync {
    async fn create(&self, config: &DetectorConfig) -> PoseResult<Box<dyn PoseDetector>>;
}

/// External pose detector. Calls are never pipelined: at most one
/// outstanding `detect` per session.
pub trait PoseDetector: Send {
    /// Run detection on one decoded frame. In video mode timestamps must
    /// increase between calls. Returns the first subject's landmark
    /// sequence, or `None` when no pose is present.
    fn detect(&mut self, frame: &RawFrame, timestamp_ms: i64) -> PoseResult<Option<Vec<Landmark>>>;

    /// Release model resources. Safe to call once.
    fn close(&mut self);
}
