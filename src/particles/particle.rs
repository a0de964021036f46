//! Particle state and the per-instance data handed to renderers.

use crate::textures::TextureRef;
use glam::{Quat, Vec3};

/// One billboard in a particle pool.
///
/// Particles are allocated once with their field and recycled forever.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    /// Last applied velocity. Smoke recomputes it every frame; ash integrates it.
    pub velocity: Vec3,
    /// Frame-clock time (seconds) at which the particle was (re)born.
    pub birth_time: f32,
    /// Randomized scale reached at end of life, before the gas multiplier.
    pub max_scale: f32,
    pub scale: f32,
    pub opacity: f32,
    pub color: Vec3,
    /// Orientation facing the camera.
    pub rotation: Quat,
    pub texture: Option<TextureRef>,
    pub visible: bool,
}

impl Particle {
    /// Seconds since birth at `now`.
    #[inline]
    pub fn age(&self, now: f32) -> f32 {
        now - self.birth_time
    }

    pub fn instance(&self) -> BillboardInstance {
        BillboardInstance {
            position: self.position.to_array(),
            scale: self.scale,
            rotation: self.rotation.to_array(),
            color: self.color.to_array(),
            opacity: self.opacity,
            texture: self.texture.map_or(BillboardInstance::NO_TEXTURE, |t| t.0),
            _pad: [0; 3],
        }
    }
}

/// GPU-ready instance record for one visible particle.
///
/// 64 bytes, no implicit padding, so a slice of these can be uploaded
/// directly with `bytemuck::cast_slice`.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BillboardInstance {
    pub position: [f32; 3],
    pub scale: f32,
    /// Quaternion `[x, y, z, w]`.
    pub rotation: [f32; 4],
    pub color: [f32; 3],
    pub opacity: f32,
    /// Texture index, or [`BillboardInstance::NO_TEXTURE`].
    pub texture: u32,
    pub _pad: [u32; 3],
}

impl BillboardInstance {
    pub const NO_TEXTURE: u32 = u32::MAX;
}
