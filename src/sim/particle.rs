//! A single drifting pixel

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::force::ForceField;
use super::pointer::PointerState;
use crate::renderer::{Color, Surface};
use crate::wrap_coord;

/// A simulated pixel-point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    /// Surface-pixel coordinates, always inside the surface after `advance`
    pub pos: DVec2,
    /// Per-frame drift
    pub vel: DVec2,
    /// Side length of the drawn square
    pub size: f64,
    pub color: Color,
}

impl Particle {
    pub fn new(pos: DVec2, vel: DVec2, size: f64, color: Color) -> Self {
        Self {
            pos,
            vel,
            size,
            color,
        }
    }

    /// One frame of motion: drift, wrap, then get pushed away from the pointer.
    ///
    /// Steps are per frame, not per second. The position is wrapped again
    /// after the push so it never leaves `[0, w) × [0, h)`.
    pub fn advance(&mut self, pointer: &PointerState, bounds: DVec2, field: &ForceField) {
        self.pos += self.vel;
        self.wrap(bounds);

        let push = field.displacement(self.pos, pointer.position);
        if push != DVec2::ZERO {
            self.pos += push;
            self.wrap(bounds);
        }
    }

    #[inline]
    fn wrap(&mut self, bounds: DVec2) {
        self.pos.x = wrap_coord(self.pos.x, bounds.x);
        self.pos.y = wrap_coord(self.pos.y, bounds.y);
    }

    /// Draw as an axis-aligned square
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.fill_rect(self.pos.x, self.pos.y, self.size, self.color);
    }
}
