//! Frame loop lifecycle
//!
//! `Stopped -> Running -> Stopped`. While running there is exactly one
//! outstanding frame request; a tick consumes it and asks for the next one.
//! No frame skipping or catch-up. If the host cannot schedule a frame the
//! clock falls back to `Stopped`.

use crate::platform::{FrameHandle, FramePacer};

/// Clock state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Stopped,
    Running,
}

/// Drives ticks off the host's frame pacer
#[derive(Debug, Clone)]
pub struct SimulationClock {
    state: ClockState,
    /// The one frame request we will accept
    pending: Option<FrameHandle>,
    /// Completed ticks since creation
    ticks: u64,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationClock {
    pub fn new() -> Self {
        Self {
            state: ClockState::Stopped,
            pending: None,
            ticks: 0,
        }
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == ClockState::Running
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Start ticking. Returns false if already running (nothing is requested)
    /// or if the pacer refused the first frame (the clock stays stopped).
    pub fn start<P: FramePacer + ?Sized>(&mut self, pacer: &mut P) -> bool {
        if self.is_running() {
            return false;
        }
        match pacer.request_frame() {
            Some(handle) => {
                self.state = ClockState::Running;
                self.pending = Some(handle);
                true
            }
            None => {
                log::error!("Clock not started: no frame could be scheduled");
                false
            }
        }
    }

    /// Stop ticking and withdraw the pending request. Returns false if already stopped.
    pub fn stop<P: FramePacer + ?Sized>(&mut self, pacer: &mut P) -> bool {
        if !self.is_running() {
            return false;
        }
        if let Some(handle) = self.pending.take() {
            pacer.cancel_frame(handle);
        }
        self.state = ClockState::Stopped;
        true
    }

    /// A frame callback arrived. Returns true if a tick should run now.
    ///
    /// Anything but the pending request (stale, cancelled, repeated) is refused.
    pub fn begin_tick(&mut self, handle: FrameHandle) -> bool {
        if !self.is_running() || self.pending != Some(handle) {
            return false;
        }
        self.pending = None;
        true
    }

    /// Tick finished: count it and schedule the next one
    pub fn end_tick<P: FramePacer + ?Sized>(&mut self, pacer: &mut P) {
        self.ticks += 1;
        if self.is_running() && self.pending.is_none() {
            self.pending = pacer.request_frame();
            if self.pending.is_none() {
                log::error!("Clock stopped after {} ticks: next frame could not be scheduled", self.ticks);
                self.state = ClockState::Stopped;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::HeadlessHost;

    /// Pacer whose frame requests always fail
    #[derive(Default)]
    struct RefusingPacer {
        requests: u32,
        cancels: u32,
    }

    impl FramePacer for RefusingPacer {
        fn request_frame(&mut self) -> Option<FrameHandle> {
            self.requests += 1;
            None
        }

        fn cancel_frame(&mut self, _handle: FrameHandle) {
            self.cancels += 1;
        }
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut host = HeadlessHost::new(1, 1);
        let mut clock = SimulationClock::new();
        assert!(clock.start(&mut host));
        assert!(!clock.start(&mut host));
        assert_eq!(host.frame_requests(), 1);
        assert_eq!(clock.state(), ClockState::Running);
    }

    #[test]
    fn test_stop_cancels_pending_once() {
        let mut host = HeadlessHost::new(1, 1);
        let mut clock = SimulationClock::new();
        assert!(!clock.stop(&mut host));

        clock.start(&mut host);
        assert!(clock.stop(&mut host));
        assert!(!clock.stop(&mut host));
        assert_eq!(host.frame_cancels(), 1);
        assert_eq!(host.pending_frame(), None);
        assert_eq!(clock.state(), ClockState::Stopped);
    }

    #[test]
    fn test_tick_consumes_and_reschedules() {
        let mut host = HeadlessHost::new(1, 1);
        let mut clock = SimulationClock::new();
        clock.start(&mut host);

        let handle = host.take_frame().unwrap();
        assert!(clock.begin_tick(handle));
        // Same callback delivered twice: refused
        assert!(!clock.begin_tick(handle));
        clock.end_tick(&mut host);

        assert_eq!(clock.ticks(), 1);
        assert_eq!(host.frame_requests(), 2);
        assert_eq!(clock.pending(), host.pending_frame());
    }

    #[test]
    fn test_stale_frame_after_stop_is_refused() {
        let mut host = HeadlessHost::new(1, 1);
        let mut clock = SimulationClock::new();
        clock.start(&mut host);
        let handle = clock.pending().unwrap();
        clock.stop(&mut host);
        assert!(!clock.begin_tick(handle));
        assert_eq!(clock.ticks(), 0);
    }

    #[test]
    fn test_restart_after_stop() {
        let mut host = HeadlessHost::new(1, 1);
        let mut clock = SimulationClock::new();
        clock.start(&mut host);
        let old = clock.pending().unwrap();
        clock.stop(&mut host);
        clock.start(&mut host);
        let new = clock.pending().unwrap();
        assert_ne!(old, new);
        assert!(!clock.begin_tick(old));
        assert!(clock.begin_tick(new));
    }

    #[test]
    fn test_refused_start_stays_stopped() {
        let mut pacer = RefusingPacer::default();
        let mut clock = SimulationClock::new();
        assert!(!clock.start(&mut pacer));
        assert_eq!(clock.state(), ClockState::Stopped);
        assert_eq!(clock.pending(), None);

        // Not wedged: a later start asks again
        assert!(!clock.start(&mut pacer));
        assert_eq!(pacer.requests, 2);
        assert!(!clock.stop(&mut pacer));
        assert_eq!(pacer.cancels, 0);
    }

    #[test]
    fn test_refused_reschedule_stops_clock() {
        let mut host = HeadlessHost::new(1, 1);
        let mut clock = SimulationClock::new();
        clock.start(&mut host);

        let handle = host.take_frame().unwrap();
        host.set_frames_refused(true);
        assert!(clock.begin_tick(handle));
        clock.end_tick(&mut host);

        assert_eq!(clock.ticks(), 1);
        assert_eq!(clock.state(), ClockState::Stopped);
        assert_eq!(clock.pending(), None);

        host.set_frames_refused(false);
        assert!(clock.start(&mut host));
        assert!(clock.pending().is_some());
    }
}
