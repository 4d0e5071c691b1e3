//! Headless host for native runs and tests
//!
//! Frames come from a fixed-interval timer driven by `Engine::run_frames`.
//! Subscription and frame bookkeeping is exposed so lifecycle symmetry can
//! be checked from the outside.

use std::time::Duration;

use super::{EventKind, FrameHandle, FramePacer, Host, SubscriptionId};
use crate::consts::FRAME_INTERVAL_MS;
use crate::engine::Engine;
use crate::renderer::Surface;

/// Host without a window system
#[derive(Debug, Clone)]
pub struct HeadlessHost {
    viewport: (u32, u32),
    interval: Duration,
    active: Vec<(SubscriptionId, EventKind)>,
    pending_frame: Option<FrameHandle>,
    /// Refuse frame requests, like a page whose rAF throws
    frames_refused: bool,
    next_id: u64,
    // Call counters
    subscribes: u64,
    unsubscribes: u64,
    frame_requests: u64,
    frame_cancels: u64,
}

impl HeadlessHost {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            viewport: (width, height),
            interval: Duration::from_millis(FRAME_INTERVAL_MS),
            active: Vec::new(),
            pending_frame: None,
            frames_refused: false,
            next_id: 1,
            subscribes: 0,
            unsubscribes: 0,
            frame_requests: 0,
            frame_cancels: 0,
        }
    }

    /// Frame timer interval; zero runs frames back to back
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Change what `viewport()` reports. Delivering the resize is up to the caller.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }

    /// Make subsequent frame requests fail (or succeed again)
    pub fn set_frames_refused(&mut self, refused: bool) {
        self.frames_refused = refused;
    }

    /// Fire the timer: hand out the pending frame, if any
    pub fn take_frame(&mut self) -> Option<FrameHandle> {
        self.pending_frame.take()
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending_frame
    }

    pub fn active_subscriptions(&self) -> usize {
        self.active.len()
    }

    pub fn is_subscribed(&self, kind: EventKind) -> bool {
        self.active.iter().any(|(_, k)| *k == kind)
    }

    pub fn subscribe_calls(&self) -> u64 {
        self.subscribes
    }

    pub fn unsubscribe_calls(&self) -> u64 {
        self.unsubscribes
    }

    pub fn frame_requests(&self) -> u64 {
        self.frame_requests
    }

    pub fn frame_cancels(&self) -> u64 {
        self.frame_cancels
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl FramePacer for HeadlessHost {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        self.frame_requests += 1;
        if self.frames_refused {
            return None;
        }
        let handle = FrameHandle(self.next_id());
        self.pending_frame = Some(handle);
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending_frame == Some(handle) {
            self.pending_frame = None;
            self.frame_cancels += 1;
        }
    }
}

impl Host for HeadlessHost {
    fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    fn subscribe(&mut self, kind: EventKind) -> SubscriptionId {
        let id = SubscriptionId(self.next_id());
        self.active.push((id, kind));
        self.subscribes += 1;
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        let before = self.active.len();
        self.active.retain(|(sub, _)| *sub != id);
        if self.active.len() != before {
            self.unsubscribes += 1;
        }
    }
}

impl<S: Surface> Engine<S, HeadlessHost> {
    /// Run up to `frames` ticks on the fixed-interval timer.
    ///
    /// Returns the number of ticks that ran; stops early once the engine
    /// stops requesting frames. A late frame just starts late.
    pub fn run_frames(&mut self, frames: u64) -> u64 {
        let mut ran = 0;
        while ran < frames {
            let Some(handle) = self.host_mut().take_frame() else {
                break;
            };
            let interval = self.host().interval();
            if !interval.is_zero() {
                std::thread::sleep(interval);
            }
            if self.on_frame(handle) {
                ran += 1;
            }
        }
        ran
    }
}
