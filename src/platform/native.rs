// Native pipeline variant
// The platform pose-camera view owns capture, detection, and skeleton
// drawing; this side consumes its landmark callback and keeps screen state.

use crate::core::session::{PosePipeline, SessionError, SessionResult};
use crate::core::status::{Phase, StatusCell, StatusSnapshot};
use crate::models::camera::CameraResult;
use async_trait::async_trait;
use log::{info, warn};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// Platform view rendering the camera feed and skeleton itself, emitting
/// landmark payloads back to the host.
#[async_trait]
pub trait PoseCameraView: Send + Sync {
    async fn start(&self) -> CameraResult<()>;

    async fn stop(&self) -> CameraResult<()>;

    /// Flip between front and back camera
    async fn switch_camera(&self) -> CameraResult<()>;
}

/// Native-mobile pipeline: lifecycle control over the platform view plus
/// status bookkeeping driven by its landmark callback.
pub struct NativeSession {
    id: Uuid,
    view: Arc<dyn PoseCameraView>,
    status: StatusCell,
    active: AtomicBool,
}

impl NativeSession {
    pub fn new(view: Arc<dyn PoseCameraView>) -> Arc<Self> {
        let status = StatusCell::new();
        // The native view ships with its model bundled, so there is no
        // separate loading phase.
        status.transition(Phase::Ready, "Camera view ready.");
        Arc::new(Self {
            id: Uuid::new_v4(),
            view,
            status,
            active: AtomicBool::new(false),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Landmark callback from the platform view. Any non-empty landmark
    /// array counts as one tracked pose; payloads that are not arrays are
    /// tolerated as "no pose" rather than escalated, since the view keeps
    /// emitting well-formed frames afterwards.
    pub fn on_landmarks(&self, payload: &Value) {
        if !self.active.load(Ordering::Acquire) {
            return;
        }
        let detected = match payload {
            Value::Array(points) => !points.is_empty(),
            Value::Null => false,
            _ => {
                warn!("session {}: non-array landmark payload ignored", self.id);
                false
            }
        };
        if detected {
            self.status.set_detection(1, "Pose detected");
        } else {
            self.status.set_detection(0, "No pose detected");
        }
    }

    pub async fn switch_camera(&self) -> SessionResult<()> {
        if let Err(e) = self.view.switch_camera().await {
            self.status.fail(format!("Camera switch failed: {}", e));
            return Err(e.into());
        }
        self.status.set_message("Camera switched");
        Ok(())
    }
}

#[async_trait]
impl PosePipeline for NativeSession {
    async fn start(&self) -> SessionResult<()> {
        if self.active.load(Ordering::Acquire) {
            return Err(SessionError::AlreadyRunning);
        }
        if self.status.phase() == Phase::Error {
            return Err(SessionError::Failed);
        }
        if let Err(e) = self.view.start().await {
            self.status.fail(e.to_string());
            return Err(e.into());
        }
        self.active.store(true, Ordering::Release);
        self.status.transition(Phase::Running, "Processing...");
        info!("session {}: native view started", self.id);
        Ok(())
    }

    async fn stop(&self) -> SessionResult<()> {
        if !self.active.swap(false, Ordering::AcqRel) {
            return Ok(());
        }
        if let Err(e) = self.view.stop().await {
            self.status.fail(e.to_string());
            return Err(e.into());
        }
        self.status.transition(Phase::Ready, "Camera stopped.");
        info!("session {}: native view stopped", self.id);
        Ok(())
    }

    fn status(&self) -> StatusSnapshot {
        self.status.snapshot()
    }

    async fn shutdown(&self) {
        let _ = self.stop().await;
    }
}
