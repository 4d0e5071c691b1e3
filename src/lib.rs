//! Pixel Blast - an interactive particle-field background layer
//!
//! Core modules:
//! - `sim`: Particle simulation (drift, wraparound, pointer repulsion)
//! - `renderer`: Drawable surfaces (Canvas 2D on web, pixel buffer headless)
//! - `platform`: Host integration (frame pacing, event subscriptions)
//! - `clock`: Frame loop lifecycle
//! - `engine`: Composition root
//! - `settings`: Tunable configuration

pub mod clock;
pub mod engine;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use engine::Engine;
pub use error::{Error, Result};
pub use settings::{QualityPreset, Settings};

/// Simulation tuning defaults
pub mod consts {
    /// Surface area (px²) per particle
    pub const DENSITY_DIVISOR: u32 = 10_000;

    /// Pointer influence radius (px)
    pub const INTERACTION_RADIUS: f64 = 120.0;
    /// Displacement (px) applied at zero distance from the pointer
    pub const PUSH_STRENGTH: f64 = 8.0;

    /// Particle side length range [min, max)
    pub const MIN_PARTICLE_SIZE: f64 = 0.5;
    pub const MAX_PARTICLE_SIZE: f64 = 2.5;

    /// Per-axis velocity range [min, max] (px per frame)
    pub const MIN_VELOCITY: f64 = -0.75;
    pub const MAX_VELOCITY: f64 = 0.75;

    /// Pointer position meaning "no pointer" - far enough off-surface that
    /// no particle is ever within the interaction radius
    pub const POINTER_SENTINEL: (f64, f64) = (-1000.0, -1000.0);

    /// Electric cyan, two slate darks, razor red, white
    pub const DEFAULT_PALETTE: [&str; 5] = ["#00F0FF", "#161b22", "#0d1117", "#FF003C", "#ffffff"];

    /// Opacity of the background layer
    pub const LAYER_OPACITY: f64 = 0.5;

    /// Headless frame interval (60 Hz)
    pub const FRAME_INTERVAL_MS: u64 = 16;
}

/// Wrap a coordinate onto `[0, extent)`.
///
/// Leaving past the far edge re-enters at 0; leaving past the near edge
/// re-enters from the far side. Zero or negative extents collapse to 0.
#[inline]
pub fn wrap_coord(coord: f64, extent: f64) -> f64 {
    if extent.is_nan() || extent <= 0.0 || !coord.is_finite() {
        return 0.0;
    }
    if coord >= extent {
        0.0
    } else if coord < 0.0 {
        let wrapped = coord.rem_euclid(extent);
        // rem_euclid can round up to `extent` for tiny negatives
        if wrapped >= extent { 0.0 } else { wrapped }
    } else {
        coord
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_far_edge_resets_to_zero() {
        assert_eq!(wrap_coord(100.0, 100.0), 0.0);
        assert_eq!(wrap_coord(100.4, 100.0), 0.0);
        assert_eq!(wrap_coord(350.0, 100.0), 0.0);
    }

    #[test]
    fn test_wrap_near_edge_reenters_far_side() {
        let x = wrap_coord(-0.5, 100.0);
        assert!((x - 99.5).abs() < 1e-9);
        let tiny = wrap_coord(-1e-300, 100.0);
        assert!(tiny >= 0.0 && tiny < 100.0);
    }

    #[test]
    fn test_wrap_inside_is_identity() {
        assert_eq!(wrap_coord(0.0, 100.0), 0.0);
        assert_eq!(wrap_coord(42.25, 100.0), 42.25);
    }

    #[test]
    fn test_wrap_degenerate_extent() {
        assert_eq!(wrap_coord(5.0, 0.0), 0.0);
        assert_eq!(wrap_coord(f64::NAN, 10.0), 0.0);
    }
}
