//! Effect settings and preferences
//!
//! Persisted in LocalStorage on the web; everything has a default so partial
//! JSON is accepted.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};
use crate::renderer::Color;
use crate::renderer::color::default_palette;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    #[serde(alias = "low")]
    Low,
    #[default]
    #[serde(alias = "medium", alias = "med")]
    Medium,
    #[serde(alias = "high")]
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Scale applied to the density divisor (higher = fewer particles)
    pub fn density_scale(&self) -> f64 {
        match self {
            QualityPreset::Low => 2.0,
            QualityPreset::Medium => 1.0,
            QualityPreset::High => 0.5,
        }
    }
}

/// Effect settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Particle density preset
    pub quality: QualityPreset,

    // === Population ===
    /// Surface area (px²) per particle at Medium quality
    pub density_divisor: u32,
    /// Particle size range [min, max)
    pub min_size: f64,
    pub max_size: f64,
    /// Per-axis drift range [min, max] (px per frame)
    pub min_velocity: f64,
    pub max_velocity: f64,
    /// Colors particles are drawn from
    pub palette: Vec<Color>,

    // === Pointer blast ===
    /// Pointer influence radius (px)
    pub interaction_radius: f64,
    /// Push (px) at zero distance
    pub push_strength: f64,

    // === Layer ===
    /// Canvas opacity (0.0 - 1.0)
    pub opacity: f64,

    // === Accessibility ===
    /// Reduced motion (no pointer blast)
    pub reduced_motion: bool,

    /// Fixed RNG seed; random per mount when unset
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            density_divisor: DENSITY_DIVISOR,
            min_size: MIN_PARTICLE_SIZE,
            max_size: MAX_PARTICLE_SIZE,
            min_velocity: MIN_VELOCITY,
            max_velocity: MAX_VELOCITY,
            palette: default_palette(),

            interaction_radius: INTERACTION_RADIUS,
            push_strength: PUSH_STRENGTH,

            opacity: LAYER_OPACITY,

            reduced_motion: false,

            seed: None,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Parse settings JSON and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Density divisor after the quality preset is applied (never 0)
    pub fn effective_density_divisor(&self) -> u32 {
        let scaled = (self.density_divisor as f64 * self.quality.density_scale()).round();
        (scaled as u32).max(1)
    }

    /// Effective push strength (respects reduced_motion)
    pub fn effective_push_strength(&self) -> f64 {
        if self.reduced_motion {
            0.0
        } else {
            self.push_strength
        }
    }

    /// Check every value is usable by the simulation
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(Error::InvalidSettings(msg.to_string()));

        if self.density_divisor == 0 {
            return invalid("density_divisor must be > 0");
        }
        if !self.min_size.is_finite() || !self.max_size.is_finite() {
            return invalid("particle sizes must be finite");
        }
        if self.min_size <= 0.0 || self.min_size >= self.max_size {
            return invalid("particle size range must satisfy 0 < min_size < max_size");
        }
        if !self.min_velocity.is_finite() || !self.max_velocity.is_finite() {
            return invalid("velocities must be finite");
        }
        if self.min_velocity > self.max_velocity {
            return invalid("min_velocity must be <= max_velocity");
        }
        if self.palette.is_empty() {
            return invalid("palette must contain at least one color");
        }
        if !self.interaction_radius.is_finite() || self.interaction_radius <= 0.0 {
            return invalid("interaction_radius must be finite and > 0");
        }
        if !self.push_strength.is_finite() || self.push_strength < 0.0 {
            return invalid("push_strength must be finite and >= 0");
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return invalid("opacity must be within [0, 1]");
        }
        Ok(())
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "pixel_blast_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Validated JSON as it is persisted
    fn stored_json(&self) -> Result<String> {
        self.validate()?;
        Ok(serde_json::to_string(self)?)
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) -> Result<()> {
        let json = self.stored_json()?;
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| Error::Storage("LocalStorage not available".to_string()))?;

        storage
            .set_item(Self::STORAGE_KEY, &json)
            .map_err(|e| Error::Storage(format!("{:?}", e)))?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Native stubs: nothing is persisted, but invalid settings are still refused
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) -> Result<()> {
        self.stored_json()?;
        log::debug!("No settings storage on native, not persisted");
        Ok(())
    }
}
