//! Per-regime eruption features.
//!
//! Each [`Regime`] maps to one constant [`EruptionFeatures`] describing how
//! the scene should look and sound while that regime is active.

use crate::regime::Regime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which smoke texture set and tint to use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmokeType {
    /// White steam-like plume.
    Light,
    /// Grey ash-laden plume.
    Dark,
}

/// How much ash the vent throws out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AshAmount {
    #[default]
    None,
    Small,
    Large,
}

impl AshAmount {
    /// Fraction of the ash pool that is active.
    pub fn active_fraction(self) -> f32 {
        match self {
            AshAmount::None => 0.0,
            AshAmount::Small => 0.35,
            AshAmount::Large => 1.0,
        }
    }
}

/// Identifier of a sound clip known to the audio frontend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundId {
    Silence,
    MildEruption,
    StrongEruption,
}

impl SoundId {
    pub const ALL: [SoundId; 3] = [SoundId::Silence, SoundId::MildEruption, SoundId::StrongEruption];

    /// Element id of the clip in the web frontend.
    pub fn element_id(self) -> &'static str {
        match self {
            SoundId::Silence => "silence",
            SoundId::MildEruption => "mild_eruption_sfx",
            SoundId::StrongEruption => "strong_eruption_sfx",
        }
    }
}

impl fmt::Display for SoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_id())
    }
}

/// What a regime looks and sounds like.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EruptionFeatures {
    /// Smoke style, or `None` to leave the plume untouched.
    pub smoke: Option<SmokeType>,
    pub ash: AshAmount,
    /// Camera shake strength, or `None` for a steady camera.
    pub shake_intensity: Option<f32>,
    pub sound: SoundId,
    /// Text for the info box, or `None` to leave it unchanged.
    pub info_text: Option<&'static str>,
}

const IDLE: EruptionFeatures = EruptionFeatures {
    smoke: None,
    ash: AshAmount::None,
    shake_intensity: None,
    sound: SoundId::Silence,
    info_text: None,
};

const WEAK: EruptionFeatures = EruptionFeatures {
    smoke: Some(SmokeType::Light),
    ash: AshAmount::None,
    shake_intensity: None,
    sound: SoundId::Silence,
    info_text: Some(
        "Weak Eruption\n\n\
         Gas escapes from low-viscosity magma without significant fragmentation, \
         producing a visible steam plume with little or no ash.",
    ),
};

const TRANSITIONAL: EruptionFeatures = EruptionFeatures {
    smoke: Some(SmokeType::Dark),
    ash: AshAmount::Small,
    shake_intensity: Some(0.5),
    sound: SoundId::MildEruption,
    info_text: Some(
        "Transitional Eruption\n\n\
         Gas bubbles burst intermittently at the surface, fragmenting magma and \
         ejecting moderate amounts of ash in discrete explosions.",
    ),
};

const PLINIAN: EruptionFeatures = EruptionFeatures {
    smoke: Some(SmokeType::Dark),
    ash: AshAmount::Large,
    shake_intensity: Some(1.0),
    sound: SoundId::StrongEruption,
    info_text: Some(
        "Plinian Eruption\n\n\
         Sustained, highly explosive release of gas-rich magma. Violent \
         fragmentation feeds a tall eruption column and dense ash clouds.",
    ),
};

impl EruptionFeatures {
    /// Features of a regime.
    pub fn of(regime: Regime) -> &'static EruptionFeatures {
        match regime {
            Regime::Idle => &IDLE,
            Regime::Weak => &WEAK,
            Regime::Transitional => &TRANSITIONAL,
            Regime::Plinian => &PLINIAN,
        }
    }
}
