//! Engine: the composition root
//!
//! Owns the surface, particle pool, pointer tracker, clock and host adapter.
//! One engine per mounted surface; engines share nothing.

use glam::DVec2;

use crate::clock::SimulationClock;
use crate::error::Result;
use crate::platform::{EventKind, FrameHandle, Host, HostEvent, SubscriptionId};
use crate::renderer::Surface;
use crate::settings::Settings;
use crate::sim::{ForceField, InputTracker, Particle, ParticlePool, PointerState, SpawnParams};

/// A running (or stoppable) particle field
pub struct Engine<S: Surface, H: Host> {
    surface: S,
    host: H,
    pool: ParticlePool,
    field: ForceField,
    input: InputTracker,
    clock: SimulationClock,
    /// Everything `start()` subscribed, released by `stop()`
    subscriptions: Vec<(EventKind, SubscriptionId)>,
    settings: Settings,
}

impl<S: Surface, H: Host> Engine<S, H> {
    /// Build a stopped engine drawing onto `surface`.
    ///
    /// Fails if the settings are out of range.
    pub fn new(surface: S, host: H, settings: Settings) -> Result<Self> {
        settings.validate()?;

        let seed = settings.seed.unwrap_or_else(rand::random);
        let field = ForceField::new(settings.interaction_radius, settings.effective_push_strength());
        let pool = ParticlePool::new(SpawnParams::from_settings(&settings), seed);

        log::info!(
            "Engine created (seed {}, quality {}, divisor {})",
            seed,
            settings.quality.as_str(),
            settings.effective_density_divisor()
        );

        Ok(Self {
            surface,
            host,
            pool,
            field,
            input: InputTracker::new(),
            clock: SimulationClock::new(),
            subscriptions: Vec::new(),
            settings,
        })
    }

    /// Mount: subscribe to host events, size to the viewport, start ticking.
    ///
    /// No-op while already running.
    pub fn start(&mut self) {
        if self.clock.is_running() {
            log::debug!("start() ignored: already running");
            return;
        }

        for kind in EventKind::ALL {
            let id = self.host.subscribe(kind);
            self.subscriptions.push((kind, id));
        }

        let (width, height) = self.host.viewport();
        self.resize(width, height);

        if !self.clock.start(&mut self.host) {
            log::error!("Engine not started: host refused to schedule frames");
            self.release_subscriptions();
            return;
        }
        log::info!("Engine started at {}x{} with {} particles", width, height, self.pool.len());
    }

    /// Unmount: release every subscription and the pending frame.
    ///
    /// Idempotent, and safe before `start()`. No tick runs after this returns.
    pub fn stop(&mut self) {
        if self.subscriptions.is_empty() && !self.clock.is_running() {
            return;
        }

        self.release_subscriptions();
        self.clock.stop(&mut self.host);
        self.input.clear_pointer();

        log::info!("Engine stopped after {} ticks", self.clock.ticks());
    }

    fn release_subscriptions(&mut self) {
        for (_, id) in self.subscriptions.drain(..) {
            self.host.unsubscribe(id);
        }
    }

    /// Resize the surface and rebuild the population for it
    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface.resize(width, height);
        self.pool.rebuild(width, height);
        log::debug!("Resized to {}x{}", width, height);
    }

    pub fn set_pointer(&mut self, x: f64, y: f64) {
        self.input.set_pointer(x, y);
    }

    pub fn clear_pointer(&mut self) {
        self.input.clear_pointer();
    }

    /// Deliver a host notification. Kinds we are not subscribed to are dropped.
    pub fn notify(&mut self, event: HostEvent) {
        let kind = event.kind();
        if !self.subscriptions.iter().any(|(k, _)| *k == kind) {
            log::trace!("Dropping unsubscribed {:?}", event);
            return;
        }

        match event {
            HostEvent::Resize { width, height } => self.resize(width, height),
            HostEvent::PointerMove { x, y } => self.set_pointer(x, y),
            HostEvent::PointerLeave => self.clear_pointer(),
        }
    }

    /// Deliver a frame callback. Returns true if a tick ran.
    pub fn on_frame(&mut self, handle: FrameHandle) -> bool {
        if !self.clock.begin_tick(handle) {
            log::trace!("Ignoring frame {:?}", handle);
            return false;
        }
        self.step();
        self.clock.end_tick(&mut self.host);
        if !self.clock.is_running() {
            // Frame loop died under us; leave the engine restartable
            self.release_subscriptions();
            self.input.clear_pointer();
        }
        true
    }

    /// One simulation + render step: clear, advance, draw
    fn step(&mut self) {
        let (width, height) = self.surface.size();
        let bounds = DVec2::new(width as f64, height as f64);
        let pointer = self.input.pointer();

        self.surface.clear();
        self.pool.advance_all(&pointer, bounds, &self.field);
        self.pool.render_all(&mut self.surface);
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn particles(&self) -> &[Particle] {
        self.pool.particles()
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    pub fn pointer(&self) -> PointerState {
        self.input.pointer()
    }

    pub fn force_field(&self) -> &ForceField {
        &self.field
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl<S: Surface, H: Host> Drop for Engine<S, H> {
    fn drop(&mut self) {
        self.stop();
    }
}
