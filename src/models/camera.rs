// Data structures for camera capture

use serde::{Deserialize, Serialize};

/// Capability request handed to the camera provider.
/// The pipeline only ever asks for video; audio stays off.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CameraRequest {
    pub video: bool,
    pub audio: bool,
}

impl Default for CameraRequest {
    fn default() -> Self {
        Self {
            video: true,
            audio: false,
        }
    }
}

/// A decoded frame sampled live from the camera stream
#[derive(Debug, Clone)]
pub struct RawFrame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub format: PixelFormat,
}

impl RawFrame {
    /// A frame reported before the stream has real dimensions, or whose
    /// buffer is shorter than its dimensions claim, cannot be handed to the
    /// detector or projected onto the overlay surface.
    pub fn is_decodable(&self) -> bool {
        self.width > 0
            && self.height > 0
            && self.data.len() >= (self.width * self.height) as usize * self.format.bytes_per_pixel()
    }
}

/// Pixel format of captured frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    RGBA8,
    BGRA8,
}

impl PixelFormat {
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::RGBA8 | PixelFormat::BGRA8 => 4,
        }
    }
}

/// Error types for camera operations
#[derive(Debug, thiserror::Error)]
pub enum CameraError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Camera device unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("Stream failed: {0}")]
    StreamFailed(String),

    #[error("Not supported on this platform")]
    NotSupported,
}

pub type CameraResult<T> = Result<T, CameraError>;
