//! Field profiles: what kind of plume a particle field simulates.
//!
//! A profile fixes everything about a field that does not change with the
//! UI parameters: where particles spawn, how big they get, how they move
//! and how they are tinted.
//!
//! # Presets
//!
//! ```ignore
//! let smoke = ParticleField::new(150, FieldProfile::smoke(), 1);
//! let ash = ParticleField::new(200, FieldProfile::ash(), 2);
//! ```

use super::texture_state::TextureVariant;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Vent position of the model's crater.
pub const VENT: Vec3 = Vec3::new(0.29, 7.26, 0.78);

/// How particles move.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Motion {
    /// Temperature-driven rising plume; velocity is recomputed every frame.
    Buoyant,
    /// Launched upward on respawn, then pulled down by gravity.
    Ballistic {
        /// Upward launch speed (units/s) at full gas.
        launch_speed: f32,
        /// Horizontal launch spread radius (units/s).
        spread: f32,
        /// Downward acceleration (units/s²).
        gravity: f32,
    },
}

/// How the target color is chosen.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Tint {
    /// Grey for dense gas, fading to white for thin gas.
    GasDensity,
    Fixed { color: Vec3 },
}

/// What drives the number of active particles.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Activity {
    /// Normalized gas density.
    GasDensity,
    /// A fixed fraction set by the owner.
    Manual { fraction: f32 },
}

/// Static description of a particle field.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldProfile {
    pub spawn_point: Vec3,
    /// Half-size of the square around the spawn point where particles appear.
    pub spawn_jitter: f32,
    /// Scale at birth.
    pub min_scale: f32,
    /// Range of the per-particle random max scale.
    pub max_scale: (f32, f32),
    /// Multiplies the computed lifetime.
    pub lifetime_scale: f32,
    /// Normalized depth below which the chamber counts as shallow.
    pub shallow_threshold: f32,
    /// Horizontal drift per frame per m/s of wind.
    pub wind_drift: f32,
    pub motion: Motion,
    pub tint: Tint,
    pub activity: Activity,
    /// Texture set requested at creation.
    pub textures: TextureVariant,
}

impl FieldProfile {
    /// Rising volcanic smoke.
    pub fn smoke() -> Self {
        Self {
            spawn_point: VENT,
            spawn_jitter: 0.75,
            min_scale: 0.1,
            max_scale: (0.1, 1.6),
            lifetime_scale: 1.0,
            shallow_threshold: 0.15,
            wind_drift: 0.002,
            motion: Motion::Buoyant,
            tint: Tint::GasDensity,
            activity: Activity::GasDensity,
            textures: TextureVariant::Default,
        }
    }

    /// Ash thrown out of the vent. Inactive until given a fraction.
    pub fn ash() -> Self {
        Self {
            spawn_point: VENT,
            spawn_jitter: 0.4,
            min_scale: 0.05,
            max_scale: (0.1, 0.5),
            lifetime_scale: 1.5,
            shallow_threshold: 0.15,
            wind_drift: 0.003,
            motion: Motion::Ballistic {
                launch_speed: 6.0,
                spread: 1.2,
                gravity: 3.0,
            },
            tint: Tint::Fixed {
                color: Vec3::new(0.2, 0.19, 0.18),
            },
            activity: Activity::Manual { fraction: 0.0 },
            textures: TextureVariant::Ash,
        }
    }

    /// Move the spawn point, e.g. to match a differently placed model.
    pub fn with_spawn_point(mut self, point: Vec3) -> Self {
        self.spawn_point = point;
        self
    }

    pub fn with_spawn_jitter(mut self, half_size: f32) -> Self {
        self.spawn_jitter = half_size.max(0.0);
        self
    }

    pub fn with_activity(mut self, activity: Activity) -> Self {
        self.activity = activity;
        self
    }
}

impl Default for FieldProfile {
    fn default() -> Self {
        Self::smoke()
    }
}
