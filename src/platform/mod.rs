//! Platform abstraction layer
//!
//! The engine never talks to a window system directly. A host provides:
//! - Frame pacing (vsync callback on web, fixed-interval timer headless)
//! - Event subscriptions (viewport resize, pointer move, pointer leave)
//! - The current viewport size
//!
//! The host delivers subscribed events by calling `Engine::notify` and frame
//! callbacks by calling `Engine::on_frame`, always on the engine's own thread.

pub mod headless;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use headless::HeadlessHost;

/// Identifies one pending frame request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Identifies one event subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Notification kinds the engine subscribes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Resize,
    PointerMove,
    PointerLeave,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [EventKind::Resize, EventKind::PointerMove, EventKind::PointerLeave];
}

/// A notification delivered by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// Viewport is now `width`×`height`
    Resize { width: u32, height: u32 },
    /// Pointer at absolute surface coordinates
    PointerMove { x: f64, y: f64 },
    /// Pointer left the interaction region
    PointerLeave,
}

impl HostEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            HostEvent::Resize { .. } => EventKind::Resize,
            HostEvent::PointerMove { .. } => EventKind::PointerMove,
            HostEvent::PointerLeave => EventKind::PointerLeave,
        }
    }
}

/// Schedules frame callbacks
pub trait FramePacer {
    /// Ask for one callback at the next frame.
    ///
    /// `None` if the host could not schedule one; no callback will arrive.
    fn request_frame(&mut self) -> Option<FrameHandle>;

    /// Withdraw a request. Unknown or already-fired handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Window-system side of the engine
pub trait Host: FramePacer {
    /// Current viewport size in pixels
    fn viewport(&self) -> (u32, u32);

    /// Start delivering events of `kind`
    fn subscribe(&mut self, kind: EventKind) -> SubscriptionId;

    /// Stop delivering events for `id`. Unknown ids are ignored.
    fn unsubscribe(&mut self, id: SubscriptionId);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kinds() {
        assert_eq!(HostEvent::Resize { width: 1, height: 2 }.kind(), EventKind::Resize);
        assert_eq!(HostEvent::PointerMove { x: 0.0, y: 0.0 }.kind(), EventKind::PointerMove);
        assert_eq!(HostEvent::PointerLeave.kind(), EventKind::PointerLeave);
        assert_eq!(EventKind::ALL.len(), 3);
    }
}
