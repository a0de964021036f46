//! # volcano-fx - Volcano eruption effects engine
//!
//! Per-frame simulation behind an interactive volcano model: billboard
//! smoke and ash, chamber-depth stretching of the model, and camera moves,
//! all driven by a handful of eruption parameters.
//!
//! Rendering, audio playback and UI are left to the host. The crate hands
//! out plain data (billboard instances, vertex positions, camera poses) and
//! a queue of [`SceneEvent`]s.
//!
//! ## Quick Start
//!
//! ```ignore
//! use volcano_fx::prelude::*;
//!
//! let mut bank = TextureBank::new();
//! let mut scene = VolcanoScene::new(SceneConfig::default());
//! scene.load_textures(&mut bank);
//!
//! scene.set_param(Param::GasDensity, 5.0);
//! scene.set_param(Param::Depth, 7.5);
//!
//! while scene.frame(1.0 / 60.0) {
//!     let smoke: &[u8] = bytemuck::cast_slice(&scene.smoke().instances());
//!     // upload and draw
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Parameters
//!
//! Seven sliders ([`Param`]) feed everything: gas density, chamber depth,
//! temperature, wind speed, and smoke speed, height and lifetime. Values
//! are clamped into their domain on every write; unparsable text becomes 0.
//!
//! ### Regimes
//!
//! The (depth, gas) point is matched against a fixed table of eruption
//! regimes by nearest neighbour ([`RegimeClassifier`]). Each [`Regime`]
//! carries constant [`EruptionFeatures`]: smoke look, ash amount, camera
//! shake and sound. Only real regime changes have side effects.
//!
//! ### Particle fields
//!
//! A [`ParticleField`] is a fixed pool of billboards. Gas density decides how
//! many are active; temperature, depth and age shape how they move.
//!
//! ### Animations
//!
//! The model deformer, the camera animator and the camera shake implement
//! [`Animation`] and are driven by one [`Scheduler`]. Tearing the scene down
//! cancels them all.
//!
//! ## Feature Overview
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`parameters`] | [`ParameterStore`], domains, coercion |
//! | [`regime`] | regime table, classifier, change tracking |
//! | [`eruption`] | per-regime features |
//! | [`particles`] | smoke/ash fields, physics, texture switching |
//! | [`deform`] | model stretching |
//! | [`camera`], [`shake`] | camera poses, transitions, shake |
//! | [`emission`] | emission map markers and charts |
//! | [`scene`] | the owning [`VolcanoScene`] |

pub mod camera;
pub mod config;
pub mod deform;
pub mod emission;
pub mod error;
pub mod eruption;
pub mod parameters;
pub mod particles;
pub mod regime;
pub mod scene;
pub mod scheduler;
pub mod shake;
pub mod sound;
pub mod textures;
pub mod time;

pub use bytemuck;
pub use camera::{Camera, CameraAnimator, Pose};
pub use config::SceneConfig;
pub use deform::{DeformableGeometry, GeometryDeformer, StretchBand};
pub use emission::{
    emission_radius, format_emission, volcano_names, EmissionSeries, Place, RadiusOptions,
    YearCursor,
};
pub use error::{ConfigError, ParameterError, TextureError};
pub use eruption::{AshAmount, EruptionFeatures, SmokeType, SoundId};
pub use glam::{Quat, Vec3};
pub use parameters::{Param, ParameterStore, SimulationParameters};
pub use particles::{BillboardInstance, FieldProfile, FrameContext, ParticleField, TextureVariant};
pub use regime::{Regime, RegimeClassifier, RegimeTracker};
pub use scene::{SceneEvent, VolcanoScene};
pub use scheduler::{Animation, Progress, Scheduler};
pub use shake::CameraShake;
pub use sound::{AudioSink, SoundSelector};
pub use textures::{TextureBank, TextureImage, TextureRef, TextureSet};
pub use time::FrameClock;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use volcano_fx::prelude::*;
/// ```
pub mod prelude {
    pub use crate::camera::{Camera, Pose};
    pub use crate::config::SceneConfig;
    pub use crate::deform::DeformableGeometry;
    pub use crate::eruption::SoundId;
    pub use crate::parameters::Param;
    pub use crate::particles::{BillboardInstance, TextureVariant};
    pub use crate::regime::Regime;
    pub use crate::scene::{SceneEvent, VolcanoScene};
    pub use crate::sound::AudioSink;
    pub use crate::textures::{TextureBank, TextureSet};
    pub use crate::time::FrameClock;
    pub use glam::Vec3;
}
