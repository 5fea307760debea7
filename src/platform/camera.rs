// Platform camera capture seam

use crate::models::camera::{CameraRequest, CameraResult, RawFrame};
use async_trait::async_trait;

/// Camera capture provider. The only component permitted to touch raw
/// platform camera handles; everything else sees frames through
/// [`CameraStream`].
#[async_trait]
pub trait CameraProvider: Send + Sync {
    /// Request a live video stream bound to the host's preview surface.
    /// Rejects with a permission or device error when the platform cannot
    /// supply one.
    async fn open(&self, request: CameraRequest) -> CameraResult<Box<dyn CameraStream>>;
}

/// An open camera stream, exclusively owned by one session
pub trait CameraStream: Send {
    /// Sample the current frame. Returns `Ok(None)` while the stream has not
    /// buffered enough data to decode a frame; this is an idle condition,
    /// not a failure. Frames are sampled live, never queued.
    fn try_frame(&mut self) -> CameraResult<Option<RawFrame>>;

    /// Release the underlying capture resource. Safe to call once.
    fn release(&mut self);
}
