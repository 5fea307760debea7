// Detector slot with teardown-safe asynchronous installation

use crate::platform::detector::PoseDetector;
use log::info;
use std::sync::{Arc, Mutex, MutexGuard};

enum DetectorSlot {
    Loading,
    Ready(Box<dyn PoseDetector>),
    Failed(String),
    Closed,
}

/// Shared slot the model-load task installs into and the frame loop reads
/// from. Closing the cell while a load is in flight makes the eventual
/// `install` release the instance instead of keeping it, so navigating away
/// mid-load cannot leak a detector.
#[derive(Clone)]
pub(crate) struct DetectorCell {
    slot: Arc<Mutex<DetectorSlot>>,
}

impl DetectorCell {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Mutex::new(DetectorSlot::Loading)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, DetectorSlot> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Install a freshly created detector. Returns `false` when the cell was
    /// closed while the load was in flight; the instance is released before
    /// returning.
    pub fn install(&self, mut detector: Box<dyn PoseDetector>) -> bool {
        let mut slot = self.lock();
        if matches!(*slot, DetectorSlot::Closed) {
            drop(slot);
            detector.close();
            info!("detector finished loading after teardown; released");
            return false;
        }
        *slot = DetectorSlot::Ready(detector);
        true
    }

    /// Record a load failure. Ignored once the cell is closed.
    pub fn mark_failed(&self, message: String) {
        let mut slot = self.lock();
        if matches!(*slot, DetectorSlot::Closed) {
            return;
        }
        *slot = DetectorSlot::Failed(message);
    }

    pub fn is_ready(&self) -> bool {
        matches!(*self.lock(), DetectorSlot::Ready(_))
    }

    /// Run `f` against the installed detector. Holds the slot lock for the
    /// duration of the call, which keeps detector invocations sequential.
    pub fn with_detector<R>(&self, f: impl FnOnce(&mut dyn PoseDetector) -> R) -> Option<R> {
        let mut slot = self.lock();
        match &mut *slot {
            DetectorSlot::Ready(detector) => Some(f(detector.as_mut())),
            _ => None,
        }
    }

    /// Release the detector (if installed) and mark the cell closed.
    /// Idempotent.
    pub fn close(&self) {
        let mut slot = self.lock();
        if let DetectorSlot::Ready(detector) = &mut *slot {
            detector.close();
        }
        *slot = DetectorSlot::Closed;
    }
}
