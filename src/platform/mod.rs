// Platform seams and variant selection for the Exercises pipeline
// Each variant provides the same {start, stop, status} capability defined in
// core::session.

pub mod camera;
pub mod detector;
pub mod native;
pub mod surface;

use crate::core::session::{CameraSession, PosePipeline, SessionResult};
use crate::core::skeleton::OverlayStyle;
use crate::models::pose::DetectorConfig;
use camera::CameraProvider;
use detector::DetectorFactory;
use native::{NativeSession, PoseCameraView};
use std::sync::Arc;
use surface::SharedSurface;

/// Collaborators for the web variant: the pipeline pulls frames, runs the
/// detector, and draws the overlay itself.
pub struct WebServices {
    pub camera: Arc<dyn CameraProvider>,
    pub detector_factory: Arc<dyn DetectorFactory>,
    pub surface: SharedSurface,
    pub config: DetectorConfig,
    pub style: OverlayStyle,
}

/// Collaborators for the native variant: a platform view owns capture and
/// drawing and reports landmarks back through a callback.
pub struct NativeServices {
    pub view: Arc<dyn PoseCameraView>,
}

/// Collaborator bundle for the platform the app is running on
pub enum PlatformServices {
    Web(WebServices),
    Native(NativeServices),
}

/// Build the pipeline variant for the current platform. Picked once at
/// screen startup; shared logic never branches on the platform again.
pub async fn create_pipeline(services: PlatformServices) -> SessionResult<Arc<dyn PosePipeline>> {
    match services {
        PlatformServices::Web(web) => {
            let session = CameraSession::new(
                web.camera,
                web.detector_factory,
                web.surface,
                web.config,
                web.style,
            )
            .await?;
            Ok(session as Arc<dyn PosePipeline>)
        }
        PlatformServices::Native(native) => {
            Ok(NativeSession::new(native.view) as Arc<dyn PosePipeline>)
        }
    }
}
