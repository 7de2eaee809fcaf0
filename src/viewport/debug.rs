//! Debug inspection hook.
//!
//! An inspector is injected at construction (or later) and receives one
//! [`DebugSnapshot`] per rendered frame. Without one, nothing is collected.

use serde::Serialize;

use crate::camera::navigation::NavigationState;
use crate::error::ViewportError;

/// Controller state captured after a frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebugSnapshot {
    /// Frames rendered so far, including this one.
    pub frame: u64,
    /// Smoothed frames per second.
    pub fps: f32,
    /// Output size in pixels.
    pub viewport: (u32, u32),
    /// Eye position.
    pub eye: [f32; 3],
    /// Look-at target.
    pub target: [f32; 3],
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Viewport aspect ratio.
    pub aspect: f32,
    /// Orbit state.
    pub navigation: NavigationState,
    /// Whether pointer navigation is enabled.
    pub navigation_enabled: bool,
    /// Registered pointer handlers.
    pub subscriptions: usize,
}

impl DebugSnapshot {
    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// [`ViewportError::Serialization`] if the encoder fails.
    pub fn to_json(&self) -> Result<String, ViewportError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ViewportError::Serialization(e.to_string()))
    }
}

/// Receiver for per-frame debug snapshots.
pub trait DebugInspector {
    /// Called once after each rendered frame.
    fn inspect(&mut self, snapshot: &DebugSnapshot);
}

/// Inspector that logs each snapshot at trace level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogInspector;

impl DebugInspector for LogInspector {
    fn inspect(&mut self, snapshot: &DebugSnapshot) {
        log::trace!(
            "frame {} eye {:?} target {:?} ({:.1} fps)",
            snapshot.frame,
            snapshot.eye,
            snapshot.target,
            snapshot.fps
        );
    }
}
