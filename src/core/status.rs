// Session status state machine exposed to the UI shell

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Lifecycle phase of one camera-to-render session.
/// `Error` is terminal; recovery requires a fresh session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Loading,
    Ready,
    Running,
    Error,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Loading => "loading",
            Phase::Ready => "ready",
            Phase::Running => "running",
            Phase::Error => "error",
        }
    }
}

/// Immutable status record, replaced as a whole on every transition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub phase: Phase,
    pub message: String,
    pub pose_count: u32,
    pub updated_at: i64,
}

impl StatusSnapshot {
    fn new(phase: Phase, message: String, pose_count: u32) -> Self {
        Self {
            phase,
            message,
            pose_count,
            updated_at: Utc::now().timestamp_millis(),
        }
    }
}

/// Shared cell holding the current snapshot. Mutated only by the owning
/// session's transitions; readers get a plain clone.
#[derive(Clone)]
pub struct StatusCell {
    inner: Arc<RwLock<StatusSnapshot>>,
}

impl StatusCell {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(StatusSnapshot::new(
                Phase::Idle,
                "Allow the camera and press start.".to_string(),
                0,
            ))),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, StatusSnapshot> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, StatusSnapshot> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        self.read().clone()
    }

    pub fn phase(&self) -> Phase {
        self.read().phase
    }

    /// Lifecycle transition. Resets the pose count and is ignored once the
    /// cell is in the terminal `Error` phase.
    pub fn transition(&self, phase: Phase, message: impl Into<String>) {
        let mut current = self.write();
        if current.phase == Phase::Error {
            return;
        }
        *current = StatusSnapshot::new(phase, message.into(), 0);
    }

    /// Enter the terminal `Error` phase. The first error message wins.
    pub fn fail(&self, message: impl Into<String>) {
        let mut current = self.write();
        if current.phase == Phase::Error {
            return;
        }
        *current = StatusSnapshot::new(Phase::Error, message.into(), 0);
    }

    /// Per-frame detection update. Only meaningful while running; ignored in
    /// any other phase so a late frame cannot resurrect a stopped session.
    pub fn set_detection(&self, pose_count: u32, message: impl Into<String>) {
        let mut current = self.write();
        if current.phase != Phase::Running {
            return;
        }
        *current = StatusSnapshot::new(Phase::Running, message.into(), pose_count);
    }

    /// Replace the message while keeping phase and pose count.
    pub fn set_message(&self, message: impl Into<String>) {
        let mut current = self.write();
        if current.phase == Phase::Error {
            return;
        }
        *current = StatusSnapshot {
            message: message.into(),
            updated_at: Utc::now().timestamp_millis(),
            ..current.clone()
        };
    }
}

impl Default for StatusCell {
    fn default() -> Self {
        Self::new()
    }
}
