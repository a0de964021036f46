//! Plume physics shared by the smoke and ash fields.
//!
//! Smoke motion is not integrated. Each frame a fresh upward push is
//! computed from three temperature presets, then shaped by how deep the
//! magma chamber is and how old the particle is. Values are per-frame
//! displacements at 60 fps; the field scales them by the real frame time.

/// Frame rate the per-frame constants are tuned for.
pub const REFERENCE_FPS: f32 = 60.0;

/// Lifetimes never drop below this, so age/lifetime stays finite.
pub const MIN_LIFETIME: f32 = 0.05;

/// How strongly the deepest chamber damps the plume (0.8 = 80% slower).
pub const DEPTH_DAMPING: f32 = 0.8;

/// Length of the initial burst for shallow chambers, in seconds.
pub const SHALLOW_BURST_SECS: f32 = 0.2;

/// Motion characteristics at one temperature.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThermalPreset {
    /// Multiplies the particle lifetime.
    pub lifetime_multiplier: f32,
    /// Base upward push per frame.
    pub vertical_force: f32,
    /// Multiplies the temperature-driven buoyancy term.
    pub buoyancy: f32,
    pub drift_x: f32,
    pub drift_z: f32,
}

impl ThermalPreset {
    pub const LOW: ThermalPreset = ThermalPreset {
        lifetime_multiplier: 1.0,
        vertical_force: 0.01,
        buoyancy: 0.1,
        drift_x: 0.015,
        drift_z: 0.015,
    };

    pub const MEDIUM: ThermalPreset = ThermalPreset {
        lifetime_multiplier: 1.0,
        vertical_force: 0.375,
        buoyancy: 1.5,
        drift_x: 0.005,
        drift_z: 0.01,
    };

    pub const HIGH: ThermalPreset = ThermalPreset {
        lifetime_multiplier: 3.0,
        vertical_force: 0.5,
        buoyancy: 1.5,
        drift_x: 0.005,
        drift_z: 0.01,
    };

    pub fn lerp(&self, other: &ThermalPreset, t: f32) -> ThermalPreset {
        ThermalPreset {
            lifetime_multiplier: lerp(self.lifetime_multiplier, other.lifetime_multiplier, t),
            vertical_force: lerp(self.vertical_force, other.vertical_force, t),
            buoyancy: lerp(self.buoyancy, other.buoyancy, t),
            drift_x: lerp(self.drift_x, other.drift_x, t),
            drift_z: lerp(self.drift_z, other.drift_z, t),
        }
    }
}

/// How horizontal drift is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Drift {
    /// Random jiggle each frame (cool plumes).
    Jiggle,
    /// Steady drift in a fixed direction (hot plumes).
    Directed,
}

/// Presets blended for the current temperature.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThermalState {
    pub preset: ThermalPreset,
    pub drift: Drift,
    /// Temperature on a 0..100 scale, used by the buoyancy term.
    pub heat: f32,
}

impl ThermalState {
    /// Blend presets for a normalized temperature in `[0, 1]`.
    ///
    /// The lower half blends LOW→MEDIUM with jiggling drift; the upper half
    /// blends MEDIUM→HIGH with directed drift.
    pub fn from_normalized(temperature: f32) -> Self {
        let t = temperature.clamp(0.0, 1.0);
        if t <= 0.5 {
            ThermalState {
                preset: ThermalPreset::LOW.lerp(&ThermalPreset::MEDIUM, t / 0.5),
                drift: Drift::Jiggle,
                heat: t * 100.0,
            }
        } else {
            ThermalState {
                preset: ThermalPreset::MEDIUM.lerp(&ThermalPreset::HIGH, (t - 0.5) / 0.5),
                drift: Drift::Directed,
                heat: t * 100.0,
            }
        }
    }

    /// Buoyancy contribution to the upward push.
    #[inline]
    pub fn buoyancy_term(&self) -> f32 {
        self.heat * 0.001 * self.preset.buoyancy
    }
}

/// Particle lifetime in seconds for the current inputs.
///
/// More gas keeps particles alive longer: 20% of the base at no gas, 100% at full.
pub fn lifetime(base: f32, gas: f32, thermal: &ThermalState, scale: f32) -> f32 {
    let gas = gas.clamp(0.0, 1.0);
    let value = base * (0.2 + 0.8 * gas) * thermal.preset.lifetime_multiplier * scale;
    if value.is_finite() {
        value.max(MIN_LIFETIME)
    } else {
        MIN_LIFETIME
    }
}

/// Multiplier on all motion from chamber depth in `[0, 1]`; deeper is slower.
#[inline]
pub fn depth_dampening(depth: f32) -> f32 {
    1.0 - depth.clamp(0.0, 1.0) * DEPTH_DAMPING
}

/// Multiplier on the upward push from life progress in `[0, 1]`.
///
/// Shallow plumes die down faster.
#[inline]
pub fn age_damping(progress: f32, shallow: bool) -> f32 {
    let k = if shallow { 0.95 } else { 0.85 };
    1.0 - progress.clamp(0.0, 1.0) * k
}

/// Shallow chambers give a short strong burst, then almost stall.
#[inline]
pub fn burst_factor(age: f32, shallow: bool) -> f32 {
    if !shallow {
        1.0
    } else if age < SHALLOW_BURST_SECS {
        4.0
    } else {
        0.1
    }
}

/// Opacity multiplier from gas: thin plumes are faint.
#[inline]
pub fn gas_opacity(gas: f32) -> f32 {
    0.1 + 0.7 * gas.clamp(0.0, 1.0)
}

/// Scale multiplier from gas: dense plumes billow wider.
#[inline]
pub fn gas_scale(gas: f32) -> f32 {
    0.5 + 1.5 * gas.clamp(0.0, 1.0)
}

/// Exact at both ends: `t = 0` gives `a`, `t = 1` gives `b`.
#[inline]
pub(crate) fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}
