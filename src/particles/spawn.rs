//! Random placement helpers for (re)spawning particles.

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

/// Seeded random source used by a particle field.
///
/// Each field owns its own spawner so fields seeded identically behave
/// identically, which keeps tests and replays deterministic.
#[derive(Debug, Clone)]
pub struct Spawner {
    rng: SmallRng,
}

impl Spawner {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Borrow the underlying RNG, e.g. for picking a texture.
    pub fn rng(&mut self) -> &mut SmallRng {
        &mut self.rng
    }

    /// Random f32 between 0.0 and 1.0.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in `[min, max)`. Returns `min` for an empty range.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..max)
    }

    /// Random value centred on zero: `(random() - 0.5) * width`.
    #[inline]
    pub fn centered(&mut self, width: f32) -> f32 {
        (self.random() - 0.5) * width
    }

    /// Random point in a square of the given half-size in the XZ plane at y=0.
    pub fn random_in_square(&mut self, half_size: f32) -> Vec3 {
        Vec3::new(
            self.centered(half_size * 2.0),
            0.0,
            self.centered(half_size * 2.0),
        )
    }

    /// Random point inside a disk in the XZ plane at y=0.
    pub fn random_in_disk(&mut self, radius: f32) -> Vec3 {
        let theta = self.rng.gen_range(0.0..TAU);
        let r = radius * self.rng.gen::<f32>().sqrt(); // sqrt for uniform disk
        Vec3::new(r * theta.cos(), 0.0, r * theta.sin())
    }
}
