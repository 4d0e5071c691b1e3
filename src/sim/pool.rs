//! The particle population
//!
//! Sized by surface area and rebuilt wholesale on every resize; particles are
//! never inserted or removed individually.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::force::ForceField;
use super::particle::Particle;
use super::pointer::PointerState;
use crate::renderer::{Color, Surface};
use crate::settings::Settings;

/// How new particles are drawn
#[derive(Debug, Clone)]
pub struct SpawnParams {
    /// Surface area (px²) per particle
    pub density_divisor: u32,
    /// Size range [min, max)
    pub min_size: f64,
    pub max_size: f64,
    /// Per-axis velocity range [min, max]
    pub min_velocity: f64,
    pub max_velocity: f64,
    pub palette: Vec<Color>,
}

impl SpawnParams {
    /// Derive spawn parameters from (validated) settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            density_divisor: settings.effective_density_divisor(),
            min_size: settings.min_size,
            max_size: settings.max_size,
            min_velocity: settings.min_velocity,
            max_velocity: settings.max_velocity,
            palette: settings.palette.clone(),
        }
    }

    /// Ranges non-empty and palette populated, so sampling cannot panic
    pub fn is_sampleable(&self) -> bool {
        let finite = [self.min_size, self.max_size, self.min_velocity, self.max_velocity]
            .iter()
            .all(|v| v.is_finite());
        finite
            && self.density_divisor > 0
            && self.min_size < self.max_size
            && self.min_velocity <= self.max_velocity
            && !self.palette.is_empty()
    }
}

impl Default for SpawnParams {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Number of particles for a `width`×`height` surface
pub fn particle_count(width: u32, height: u32, density_divisor: u32) -> usize {
    if density_divisor == 0 {
        return 0;
    }
    (width as u64 * height as u64 / density_divisor as u64) as usize
}

/// Owns every particle on the surface
#[derive(Debug, Clone)]
pub struct ParticlePool {
    particles: Vec<Particle>,
    params: SpawnParams,
    rng: Pcg32,
    /// Bounds the current population was spawned for
    bounds: DVec2,
}

impl ParticlePool {
    /// Empty pool; call `rebuild` once the surface size is known
    pub fn new(params: SpawnParams, seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            params,
            rng: Pcg32::seed_from_u64(seed),
            bounds: DVec2::ZERO,
        }
    }

    /// Replace the population with a fresh one sized for `width`×`height`
    pub fn rebuild(&mut self, width: u32, height: u32) {
        let count = if self.params.is_sampleable() {
            particle_count(width, height, self.params.density_divisor)
        } else {
            log::warn!("Spawn parameters are degenerate, leaving pool empty");
            0
        };
        self.bounds = DVec2::new(width as f64, height as f64);

        let mut particles = Vec::with_capacity(count);
        for _ in 0..count {
            particles.push(self.spawn());
        }
        self.particles = particles;

        log::debug!("Rebuilt pool: {} particles for {}x{}", count, width, height);
    }

    fn spawn(&mut self) -> Particle {
        let p = &self.params;
        let pos = DVec2::new(
            self.rng.random_range(0.0..self.bounds.x),
            self.rng.random_range(0.0..self.bounds.y),
        );
        let vel = DVec2::new(
            self.rng.random_range(p.min_velocity..=p.max_velocity),
            self.rng.random_range(p.min_velocity..=p.max_velocity),
        );
        let size = self.rng.random_range(p.min_size..p.max_size);
        let color = p.palette[self.rng.random_range(0..p.palette.len())];
        Particle::new(pos, vel, size, color)
    }

    /// Step every particle one frame. Order is irrelevant: particles don't interact.
    pub fn advance_all(&mut self, pointer: &PointerState, bounds: DVec2, field: &ForceField) {
        for particle in &mut self.particles {
            particle.advance(pointer, bounds, field);
        }
    }

    /// Draw every particle in stored order (later ones on top)
    pub fn render_all<S: Surface + ?Sized>(&self, surface: &mut S) {
        for particle in &self.particles {
            particle.render(surface);
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn bounds(&self) -> DVec2 {
        self.bounds
    }
}
