//! Camera-to-render pose pipeline for the Exercises screen.
//!
//! The hosting app supplies the platform collaborators (camera provider,
//! pose detector factory, overlay surface, or a native pose-camera view) and
//! drives the returned [`PosePipeline`] from its start/stop controls.

pub mod core;
pub mod models;
pub mod platform;

pub use crate::core::overlay;
pub use crate::core::session::{CameraSession, PosePipeline, SessionError, SessionResult};
pub use crate::core::skeleton::{edge_indices, OverlayStyle, SKELETON_EDGES};
pub use crate::core::status::{Phase, StatusSnapshot};
pub use crate::models::camera::{
    CameraError, CameraRequest, CameraResult, PixelFormat, RawFrame,
};
pub use crate::models::pose::{
    BodyLandmark, DetectorConfig, Landmark, PoseError, PoseResult, RunningMode,
    BODY_LANDMARK_COUNT,
};
pub use crate::platform::camera::{CameraProvider, CameraStream};
pub use crate::platform::detector::{DetectorFactory, PoseDetector};
pub use crate::platform::native::{NativeSession, PoseCameraView};
pub use crate::platform::surface::{shared_surface, OverlaySurface, SharedSurface};
pub use crate::platform::{
    create_pipeline, NativeServices, PlatformServices, WebServices,
};
