//! Billboard textures for smoke and ash particles.
//!
//! Images are decoded once into a [`TextureBank`]; particles refer to them
//! by [`TextureRef`]. A [`TextureSet`] is the group of interchangeable
//! textures a field picks from at random when a particle respawns.
//!
//! Loading is forgiving: a file that fails to decode is logged and left out
//! of its set, and the field simply has fewer variants to choose from.
//!
//! # Supported Formats
//!
//! - PNG (recommended)
//! - JPEG

use crate::error::TextureError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Decoded RGBA image.
#[derive(Debug, Clone)]
pub struct TextureImage {
    /// Raw RGBA pixel data (width * height * 4 bytes).
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl TextureImage {
    /// Wrap raw RGBA data.
    ///
    /// # Panics
    ///
    /// Panics if `data` is not `width * height * 4` bytes long.
    pub fn from_rgba(data: Vec<u8>, width: u32, height: u32) -> Self {
        assert_eq!(
            data.len(),
            (width * height * 4) as usize,
            "RGBA data size mismatch"
        );
        Self { data, width, height }
    }

    /// Decode an image file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let img = image::open(path.as_ref())?.into_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self {
            data: img.into_raw(),
            width,
            height,
        })
    }

    /// Decode an image already in memory.
    pub fn from_memory(bytes: &[u8]) -> Result<Self, TextureError> {
        let img = image::load_from_memory(bytes)?.into_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self {
            data: img.into_raw(),
            width,
            height,
        })
    }

    /// Soft round puff: opaque `color` in the middle fading to transparent at the rim.
    ///
    /// Used in place of artwork when no image files are available.
    pub fn puff(size: u32, color: [u8; 3]) -> Self {
        let size = size.max(1);
        let mut data = Vec::with_capacity((size * size * 4) as usize);
        let half = size as f32 / 2.0;
        for y in 0..size {
            for x in 0..size {
                let dx = (x as f32 + 0.5 - half) / half;
                let dy = (y as f32 + 0.5 - half) / half;
                let falloff = (1.0 - (dx * dx + dy * dy).sqrt()).clamp(0.0, 1.0);
                data.extend_from_slice(&color);
                data.push((falloff * falloff * 255.0).round() as u8);
            }
        }
        Self {
            data,
            width: size,
            height: size,
        }
    }
}

/// Index of a texture in a [`TextureBank`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureRef(pub u32);

/// Interchangeable textures for one look (default smoke, white smoke, ash).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextureSet {
    refs: Vec<TextureRef>,
}

impl TextureSet {
    pub fn new(refs: Vec<TextureRef>) -> Self {
        Self { refs }
    }

    pub fn len(&self) -> usize {
        self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    pub fn refs(&self) -> &[TextureRef] {
        &self.refs
    }

    /// A random member, or `None` for an empty set.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<TextureRef> {
        if self.refs.is_empty() {
            return None;
        }
        Some(self.refs[rng.gen_range(0..self.refs.len())])
    }
}

/// All decoded textures for a scene.
#[derive(Debug, Clone, Default)]
pub struct TextureBank {
    textures: Vec<(String, TextureImage)>,
}

impl TextureBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a decoded image.
    pub fn add(&mut self, name: impl Into<String>, image: TextureImage) -> TextureRef {
        self.textures.push((name.into(), image));
        TextureRef(self.textures.len() as u32 - 1)
    }

    /// Decode and add an image file.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<TextureRef, TextureError> {
        let path = path.as_ref();
        let image = TextureImage::from_file(path)?;
        log::debug!("Loaded texture {} ({}x{})", path.display(), image.width, image.height);
        Ok(self.add(path.display().to_string(), image))
    }

    /// Load every file of a set, skipping (and logging) the ones that fail.
    pub fn load_set<P: AsRef<Path>>(&mut self, paths: &[P]) -> TextureSet {
        let mut refs = Vec::with_capacity(paths.len());
        for path in paths {
            match self.load(path) {
                Ok(r) => refs.push(r),
                Err(e) => log::error!("Error loading texture {}: {}", path.as_ref().display(), e),
            }
        }
        TextureSet::new(refs)
    }

    /// Add `count` generated puffs of `color` as a set.
    pub fn generate_set(&mut self, name: &str, count: usize, color: [u8; 3]) -> TextureSet {
        let refs = (0..count)
            .map(|i| self.add(format!("{name}_{i}"), TextureImage::puff(64, color)))
            .collect();
        TextureSet::new(refs)
    }

    pub fn get(&self, r: TextureRef) -> Option<&TextureImage> {
        self.textures.get(r.0 as usize).map(|(_, img)| img)
    }

    pub fn name(&self, r: TextureRef) -> Option<&str> {
        self.textures.get(r.0 as usize).map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_puff_is_transparent_at_corners() {
        let img = TextureImage::puff(16, [255, 255, 255]);
        assert_eq!(img.data.len(), 16 * 16 * 4);
        assert_eq!(img.data[3], 0);
        let center = ((8 * 16 + 8) * 4 + 3) as usize;
        assert!(img.data[center] > 200);
    }

    #[test]
    fn test_missing_file_is_skipped() {
        let mut bank = TextureBank::new();
        let set = bank.load_set(&["does/not/exist.png"]);
        assert!(set.is_empty());
        assert!(bank.is_empty());
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        assert!(TextureImage::from_memory(b"not an image").is_err());
    }

    #[test]
    fn test_pick_from_set() {
        let mut bank = TextureBank::new();
        let set = bank.generate_set("smoke", 3, [128, 128, 128]);
        assert_eq!(set.len(), 3);
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..20 {
            let r = set.pick(&mut rng).unwrap();
            assert!(set.refs().contains(&r));
            assert!(bank.get(r).is_some());
        }
        assert_eq!(TextureSet::default().pick(&mut rng), None);
    }
}
