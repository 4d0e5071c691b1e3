//! Pointer tracking
//!
//! "No pointer" is an off-surface sentinel rather than an `Option`, so the
//! force computation never branches on pointer presence.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::POINTER_SENTINEL;

/// Where the pointer is, as seen by the simulation step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerState {
    pub position: DVec2,
}

impl PointerState {
    pub const SENTINEL: DVec2 = DVec2::new(POINTER_SENTINEL.0, POINTER_SENTINEL.1);

    pub fn at(x: f64, y: f64) -> Self {
        Self {
            position: DVec2::new(x, y),
        }
    }

    /// Whether this is the "no pointer" sentinel
    pub fn is_absent(&self) -> bool {
        self.position == Self::SENTINEL
    }
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            position: Self::SENTINEL,
        }
    }
}

/// Owns the pointer state; the only writer
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    pointer: PointerState,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer moved to absolute surface coordinates.
    ///
    /// Non-finite coordinates count as the pointer leaving.
    pub fn set_pointer(&mut self, x: f64, y: f64) {
        if x.is_finite() && y.is_finite() {
            self.pointer = PointerState::at(x, y);
        } else {
            self.clear_pointer();
        }
    }

    /// Pointer left the interaction region
    pub fn clear_pointer(&mut self) {
        self.pointer = PointerState::default();
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }
}
