//! Particle simulation
//!
//! Pure per-frame state updates:
//! - Integer-step Euler drift (per frame, no delta time)
//! - Toroidal wraparound at the surface edges
//! - Linear-falloff repulsion away from the pointer
//! - No platform dependencies; drawing goes through the `Surface` trait

pub mod force;
pub mod particle;
pub mod pointer;
pub mod pool;

pub use force::ForceField;
pub use particle::Particle;
pub use pointer::{InputTracker, PointerState};
pub use pool::{ParticlePool, SpawnParams, particle_count};
