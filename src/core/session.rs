// Camera session controller and frame processing loop

use crate::core::loader::DetectorCell;
use crate::core::overlay;
use crate::core::skeleton::{self, OverlayStyle};
use crate::core::status::{Phase, StatusCell, StatusSnapshot};
use crate::models::camera::{CameraError, CameraRequest};
use crate::models::pose::{DetectorConfig, PoseError, RunningMode};
use crate::platform::camera::{CameraProvider, CameraStream};
use crate::platform::detector::DetectorFactory;
use crate::platform::surface::SharedSurface;
use async_trait::async_trait;
use log::{error, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex as StdMutex, MutexGuard};
use std::time::{Duration, Instant};
use tokio::sync::Mutex as AsyncMutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use uuid::Uuid;

/// Frame budget for the processing loop, roughly a 30 Hz display refresh.
/// One iteration runs per period; the detector is never spun faster than
/// the camera can produce distinct frames.
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Error types for session lifecycle operations
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session already running")]
    AlreadyRunning,

    #[error("Model not ready yet")]
    DetectorNotReady,

    #[error("Session is in error state; start a new session")]
    Failed,

    #[error(transparent)]
    Camera(#[from] CameraError),

    #[error(transparent)]
    Pose(#[from] PoseError),
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Platform-agnostic pipeline capability driven by the Exercises screen.
/// Two variants exist: the web pipeline ([`CameraSession`]) which pulls
/// frames and draws the overlay itself, and the native pipeline
/// (`platform::native::NativeSession`) which wraps a platform view.
#[async_trait]
pub trait PosePipeline: Send + Sync {
    async fn start(&self) -> SessionResult<()>;

    async fn stop(&self) -> SessionResult<()>;

    fn status(&self) -> StatusSnapshot;

    /// Full teardown: stop plus detector release. Safe while a model load is
    /// still in flight.
    async fn shutdown(&self);
}

fn lock<T>(mutex: &StdMutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

type SharedStream = Arc<StdMutex<Option<Box<dyn CameraStream>>>>;

struct LoopTask {
    handle: JoinHandle<()>,
    running: Arc<AtomicBool>,
}

/// One camera-to-render pipeline instance.
///
/// Owns at most one camera stream and one pending loop task at a time. The
/// detector model starts loading when the session is created; `start()` is
/// refused until the load completes.
pub struct CameraSession {
    id: Uuid,
    camera: Arc<dyn CameraProvider>,
    surface: SharedSurface,
    detector: DetectorCell,
    status: StatusCell,
    style: OverlayStyle,
    mode: RunningMode,
    stream: SharedStream,
    task: AsyncMutex<Option<LoopTask>>,
}

impl CameraSession {
    /// Create a session and begin loading the detector model in the
    /// background.
    pub async fn new(
        camera: Arc<dyn CameraProvider>,
        factory: Arc<dyn DetectorFactory>,
        surface: SharedSurface,
        config: DetectorConfig,
        style: OverlayStyle,
    ) -> SessionResult<Arc<Self>> {
        config.validate()?;

        let session = Arc::new(Self {
            id: Uuid::new_v4(),
            camera,
            surface,
            detector: DetectorCell::new(),
            status: StatusCell::new(),
            style,
            mode: config.running_mode,
            stream: Arc::new(StdMutex::new(None)),
            task: AsyncMutex::new(None),
        });

        session.status.transition(Phase::Loading, "Loading model...");

        let cell = session.detector.clone();
        let status = session.status.clone();
        let id = session.id;
        tokio::spawn(async move {
            match factory.create(&config).await {
                Ok(detector) => {
                    if cell.install(detector) {
                        status.transition(Phase::Ready, "Model loaded. Press start.");
                        info!("session {}: detector ready", id);
                    }
                    // When install is refused the session was torn down while
                    // the model was loading; the cell already released the
                    // instance.
                }
                Err(e) => {
                    cell.mark_failed(e.to_string());
                    status.fail(format!("Model loading failed: {}", e));
                    error!("session {}: model load failed: {}", id, e);
                }
            }
        });

        Ok(session)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    async fn start_inner(&self) -> SessionResult<()> {
        let mut task = self.task.lock().await;
        // Phase first: a loop that halted on an error leaves its finished
        // task behind, and the refusal should name the error, not the task.
        if self.status.phase() == Phase::Error {
            return Err(SessionError::Failed);
        }
        if task.is_some() {
            return Err(SessionError::AlreadyRunning);
        }
        if !self.detector.is_ready() {
            return Err(SessionError::DetectorNotReady);
        }

        self.status
            .transition(Phase::Running, "Requesting camera access...");

        let stream = match self.camera.open(CameraRequest::default()).await {
            Ok(stream) => stream,
            Err(e) => {
                self.status.fail(e.to_string());
                return Err(e.into());
            }
        };
        *lock(&self.stream) = Some(stream);
        self.status.set_detection(0, "Processing...");

        let running = Arc::new(AtomicBool::new(true));
        let mut frame_loop = FrameLoop::new(
            self.stream.clone(),
            self.detector.clone(),
            self.surface.clone(),
            self.status.clone(),
            self.style.clone(),
            self.mode,
        );
        let loop_running = running.clone();
        let handle = tokio::spawn(async move {
            // Live streams always hold a current frame; without pacing the
            // detector would re-run on the same physical frame as fast as
            // the runtime allows.
            let mut ticker = tokio::time::interval(FRAME_INTERVAL);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if !loop_running.load(Ordering::Acquire) {
                    break;
                }
                if let FrameOutcome::Halt = frame_loop.process_frame() {
                    loop_running.store(false, Ordering::Release);
                    break;
                }
            }
        });

        *task = Some(LoopTask { handle, running });
        info!("session {}: started", self.id);
        Ok(())
    }

    async fn stop_inner(&self) -> SessionResult<()> {
        let mut task = self.task.lock().await;

        let had_task = task.is_some();
        if let Some(LoopTask { handle, running }) = task.take() {
            running.store(false, Ordering::Release);
            handle.abort();
            // Wait for the loop to wind down so no detector call or draw can
            // land after stop() returns.
            let _ = handle.await;
        }

        let stream = lock(&self.stream).take();
        let had_stream = stream.is_some();
        if let Some(mut stream) = stream {
            stream.release();
        }

        if had_task || had_stream {
            self.status.transition(Phase::Ready, "Camera stopped.");
            info!("session {}: stopped", self.id);
        }
        Ok(())
    }
}

#[async_trait]
impl PosePipeline for CameraSession {
    async fn start(&self) -> SessionResult<()> {
        self.start_inner().await
    }

    async fn stop(&self) -> SessionResult<()> {
        self.stop_inner().await
    }

    fn status(&self) -> StatusSnapshot {
        self.status.snapshot()
    }

    async fn shutdown(&self) {
        let _ = self.stop_inner().await;
        self.detector.close();
        info!("session {}: shut down", self.id);
    }
}

impl Drop for CameraSession {
    fn drop(&mut self) {
        if let Some(task) = self.task.get_mut().take() {
            task.running.store(false, Ordering::Release);
            task.handle.abort();
        }
        if let Some(mut stream) = lock(&self.stream).take() {
            stream.release();
        }
        self.detector.close();
    }
}

// ==============================================================================
// Frame Processing Loop
// ==============================================================================

enum FrameOutcome {
    /// Frame not yet decodable; reschedule without touching the detector
    Idle,
    /// One detector invocation completed and the overlay was updated
    Processed,
    /// Unrecoverable failure; do not reschedule
    Halt,
}

struct FrameLoop {
    stream: SharedStream,
    detector: DetectorCell,
    surface: SharedSurface,
    status: StatusCell,
    style: OverlayStyle,
    mode: RunningMode,
    edges: Vec<(usize, usize)>,
    started: Instant,
    last_timestamp: i64,
}

impl FrameLoop {
    fn new(
        stream: SharedStream,
        detector: DetectorCell,
        surface: SharedSurface,
        status: StatusCell,
        style: OverlayStyle,
        mode: RunningMode,
    ) -> Self {
        Self {
            stream,
            detector,
            surface,
            status,
            style,
            mode,
            edges: skeleton::edge_indices(),
            started: Instant::now(),
            last_timestamp: -1,
        }
    }

    /// Milliseconds since loop start. Video-mode detectors reject a
    /// timestamp that does not advance, so a clock tie (two iterations
    /// within the same millisecond) is bumped past the previous value.
    fn next_timestamp(&mut self) -> i64 {
        let mut timestamp = self.started.elapsed().as_millis() as i64;
        if self.mode.requires_increasing_timestamps() && timestamp <= self.last_timestamp {
            timestamp = self.last_timestamp + 1;
        }
        self.last_timestamp = timestamp;
        timestamp
    }

    fn process_frame(&mut self) -> FrameOutcome {
        let frame = {
            let mut slot = lock(&self.stream);
            let Some(stream) = slot.as_mut() else {
                return FrameOutcome::Idle;
            };
            match stream.try_frame() {
                Ok(Some(frame)) => frame,
                Ok(None) => return FrameOutcome::Idle,
                Err(e) => {
                    self.status.fail(e.to_string());
                    return FrameOutcome::Halt;
                }
            }
        };
        if !frame.is_decodable() {
            return FrameOutcome::Idle;
        }

        let timestamp = self.next_timestamp();

        let mut surface = match self.surface.lock() {
            Ok(guard) => guard,
            Err(_) => {
                let e = PoseError::SurfaceFailed("overlay surface lock poisoned".to_string());
                self.status.fail(e.to_string());
                return FrameOutcome::Halt;
            }
        };
        if surface.width() != frame.width || surface.height() != frame.height {
            surface.resize(frame.width, frame.height);
        }
        // Cleared every frame, also when no subject is found, so a missed
        // detection never leaves a stale skeleton behind.
        surface.clear();

        match self.detector.with_detector(|d| d.detect(&frame, timestamp)) {
            Some(Ok(Some(landmarks))) => {
                overlay::render(&mut **surface, &self.edges, &landmarks, &self.style);
                self.status.set_detection(1, "Pose detected");
                FrameOutcome::Processed
            }
            Some(Ok(None)) => {
                self.status.set_detection(0, "No pose detected");
                FrameOutcome::Processed
            }
            Some(Err(e)) => {
                self.status.fail(e.to_string());
                FrameOutcome::Halt
            }
            // Detector slot closed underneath us (teardown); halt quietly.
            None => FrameOutcome::Halt,
        }
    }
}
