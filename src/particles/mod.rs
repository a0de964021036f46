//! Billboard particle fields for the eruption plume.
//!
//! - [`ParticleField`] owns a fixed pool and simulates it each frame.
//! - [`FieldProfile`] describes a kind of plume (smoke, ash).
//! - [`physics`] holds the temperature/depth shaping shared by both.
//! - [`TextureSlots`] tracks which texture set particles draw from.

mod field;
mod particle;
pub mod physics;
mod profile;
mod spawn;
mod texture_state;

pub use field::{FrameContext, ParticleField, INITIAL_SPREAD_SECS, RESPAWN_SPREAD_SECS, STAGGER_SECS};
pub use particle::{BillboardInstance, Particle};
pub use profile::{Activity, FieldProfile, Motion, Tint, VENT};
pub use spawn::Spawner;
pub use texture_state::{TextureSetState, TextureSlots, TextureVariant};
