// Scripted collaborator doubles shared by the integration tests

use async_trait::async_trait;
use posecam::{
    CameraError, CameraProvider, CameraRequest, CameraResult, CameraStream, DetectorConfig,
    DetectorFactory, Landmark, OverlaySurface, PixelFormat, PoseDetector, PoseError, PoseResult,
    RawFrame, BODY_LANDMARK_COUNT,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Poll until `condition` holds; panics after ~2 seconds.
pub async fn wait_for(condition: impl Fn() -> bool) {
    for _ in 0..400 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("timed out waiting for condition");
}

pub fn frame(width: u32, height: u32) -> RawFrame {
    RawFrame {
        width,
        height,
        data: vec![0; (width * height * 4) as usize],
        format: PixelFormat::RGBA8,
    }
}

pub fn full_pose() -> Vec<Landmark> {
    (0..BODY_LANDMARK_COUNT)
        .map(|i| Landmark::new(i as f32 / BODY_LANDMARK_COUNT as f32, 0.5, 0.0, 1.0))
        .collect()
}

// ==============================================================================
// Surface double
// ==============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Resize(u32, u32),
    Clear,
    Line { from: (f32, f32), to: (f32, f32) },
    Marker { at: (f32, f32) },
}

pub struct RecordingSurface {
    width: u32,
    height: u32,
    ops: Arc<Mutex<Vec<DrawOp>>>,
}

impl RecordingSurface {
    pub fn new() -> (Box<Self>, Arc<Mutex<Vec<DrawOp>>>) {
        let ops = Arc::new(Mutex::new(Vec::new()));
        (
            Box::new(Self {
                width: 0,
                height: 0,
                ops: ops.clone(),
            }),
            ops,
        )
    }
}

impl OverlaySurface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.ops.lock().unwrap().push(DrawOp::Resize(width, height));
    }

    fn clear(&mut self) {
        self.ops.lock().unwrap().push(DrawOp::Clear);
    }

    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), _color: u32, _width: f32) {
        self.ops.lock().unwrap().push(DrawOp::Line { from, to });
    }

    fn draw_marker(&mut self, at: (f32, f32), _color: u32, _radius: f32) {
        self.ops.lock().unwrap().push(DrawOp::Marker { at });
    }
}

// ==============================================================================
// Camera doubles
// ==============================================================================

pub struct ScriptedStream {
    frames: VecDeque<CameraResult<Option<RawFrame>>>,
    releases: Arc<AtomicUsize>,
}

impl CameraStream for ScriptedStream {
    fn try_frame(&mut self) -> CameraResult<Option<RawFrame>> {
        // An exhausted script behaves like a live stream between frames
        self.frames.pop_front().unwrap_or(Ok(None))
    }

    fn release(&mut self) {
        self.releases.fetch_add(1, Ordering::SeqCst);
    }
}

/// A stream that always has a current frame, like a running camera between
/// the host's sample points.
pub struct LiveStream {
    frame: RawFrame,
    releases: Arc<AtomicUsize>,
}

impl CameraStream for LiveStream {
    fn try_frame(&mut self) -> CameraResult<Option<RawFrame>> {
        Ok(Some(self.frame.clone()))
    }

    fn release(&mut self) {
        self.releases.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct FakeCamera {
    script: Mutex<Option<VecDeque<CameraResult<Option<RawFrame>>>>>,
    live: Option<RawFrame>,
    deny: Option<fn() -> CameraError>,
    pub opens: AtomicUsize,
    pub releases: Arc<AtomicUsize>,
}

impl FakeCamera {
    pub fn with_frames(frames: Vec<CameraResult<Option<RawFrame>>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(Some(frames.into())),
            live: None,
            deny: None,
            opens: AtomicUsize::new(0),
            releases: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Streams that repeat `frame` forever instead of following a script.
    pub fn live(frame: RawFrame) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(None),
            live: Some(frame),
            deny: None,
            opens: AtomicUsize::new(0),
            releases: Arc::new(AtomicUsize::new(0)),
        })
    }

    pub fn denying(deny: fn() -> CameraError) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(None),
            live: None,
            deny: Some(deny),
            opens: AtomicUsize::new(0),
            releases: Arc::new(AtomicUsize::new(0)),
        })
    }
}

#[async_trait]
impl CameraProvider for FakeCamera {
    async fn open(&self, request: CameraRequest) -> CameraResult<Box<dyn CameraStream>> {
        assert!(request.video && !request.audio);
        self.opens.fetch_add(1, Ordering::SeqCst);
        if let Some(deny) = self.deny {
            return Err(deny());
        }
        if let Some(frame) = &self.live {
            return Ok(Box::new(LiveStream {
                frame: frame.clone(),
                releases: self.releases.clone(),
            }));
        }
        let frames = self.script.lock().unwrap().take().unwrap_or_default();
        Ok(Box::new(ScriptedStream {
            frames,
            releases: self.releases.clone(),
        }))
    }
}

// ==============================================================================
// Detector doubles
// ==============================================================================

pub struct FakeDetector {
    results: VecDeque<PoseResult<Option<Vec<Landmark>>>>,
    pub calls: Arc<AtomicUsize>,
    pub closed: Arc<AtomicBool>,
}

impl FakeDetector {
    pub fn new(results: Vec<PoseResult<Option<Vec<Landmark>>>>) -> Self {
        Self {
            results: results.into(),
            calls: Arc::new(AtomicUsize::new(0)),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl PoseDetector for FakeDetector {
    fn detect(&mut self, _frame: &RawFrame, _timestamp_ms: i64) -> PoseResult<Option<Vec<Landmark>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.results.pop_front().unwrap_or(Ok(None))
    }

    fn close(&mut self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

pub struct FakeFactory {
    detector: Mutex<Option<FakeDetector>>,
    gate: Option<Arc<Notify>>,
    fail: bool,
}

impl FakeFactory {
    pub fn ready(detector: FakeDetector) -> Arc<Self> {
        Arc::new(Self {
            detector: Mutex::new(Some(detector)),
            gate: None,
            fail: false,
        })
    }

    /// Creation blocks until the returned gate is notified, modelling a slow
    /// model download.
    pub fn gated(detector: FakeDetector) -> (Arc<Self>, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        (
            Arc::new(Self {
                detector: Mutex::new(Some(detector)),
                gate: Some(gate.clone()),
                fail: false,
            }),
            gate,
        )
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            detector: Mutex::new(None),
            gate: None,
            fail: true,
        })
    }
}

#[async_trait]
impl DetectorFactory for FakeFactory {
    async fn create(&self, config: &DetectorConfig) -> PoseResult<Box<dyn PoseDetector>> {
        config.validate()?;
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.fail {
            return Err(PoseError::ModelLoadFailed(
                "model asset missing".to_string(),
            ));
        }
        let detector = self
            .detector
            .lock()
            .unwrap()
            .take()
            .expect("factory used more than once");
        Ok(Box::new(detector))
    }
}
