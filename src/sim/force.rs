//! Pointer repulsion
//!
//! Linear falloff: full strength at the pointer, zero at the radius edge.
//! Pure functions only, no particle or surface state involved.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::{INTERACTION_RADIUS, PUSH_STRENGTH};

/// Repulsion parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForceField {
    /// Distance (px) beyond which the pointer has no effect
    pub radius: f64,
    /// Displacement (px) at zero distance
    pub strength: f64,
}

impl Default for ForceField {
    fn default() -> Self {
        Self {
            radius: INTERACTION_RADIUS,
            strength: PUSH_STRENGTH,
        }
    }
}

impl ForceField {
    pub fn new(radius: f64, strength: f64) -> Self {
        Self { radius, strength }
    }

    /// Falloff factor in [0, 1]: `(radius - d) / radius` inside the radius, 0 outside
    #[inline]
    pub fn falloff(&self, distance: f64) -> f64 {
        if distance < self.radius && self.radius > 0.0 {
            (self.radius - distance) / self.radius
        } else {
            0.0
        }
    }

    /// Push magnitude (px) at `distance` from the pointer
    #[inline]
    pub fn magnitude(&self, distance: f64) -> f64 {
        self.falloff(distance) * self.strength
    }

    /// Displacement to add to a particle at `particle`, pointing away from `pointer`.
    ///
    /// Zero outside the radius, and zero when the particle sits exactly on the
    /// pointer (the direction is undefined there).
    pub fn displacement(&self, particle: DVec2, pointer: DVec2) -> DVec2 {
        let delta = pointer - particle;
        let distance = delta.x.hypot(delta.y);
        if distance <= 0.0 || !distance.is_finite() {
            return DVec2::ZERO;
        }

        let force = self.falloff(distance);
        if force == 0.0 {
            return DVec2::ZERO;
        }

        let direction = delta / distance;
        -direction * force * self.strength
    }
}
