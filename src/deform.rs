//! Chamber-depth stretching of the volcano model.
//!
//! The model is stretched along its vertical (z) axis to show how deep the
//! magma chamber sits. Vertices below the stretch band stay put, vertices
//! above it move fully, and those inside are displaced proportionally.
//! The stretch factor eases towards its target a few percent per frame and
//! is always applied to the untouched original vertices, so repeated
//! ticks never accumulate error.

use crate::scheduler::{Animation, Progress};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Fraction of the remaining distance covered per tick.
pub const EASE_RATE: f32 = 0.05;

/// Closer than this, the stretch snaps to its target and stops.
pub const SETTLE_EPSILON: f32 = 0.01;

/// A mesh whose vertices can be displaced from a fixed original.
#[derive(Clone, Debug, PartialEq)]
pub struct DeformableGeometry {
    original: Vec<Vec3>,
    positions: Vec<Vec3>,
}

impl DeformableGeometry {
    pub fn new(vertices: Vec<Vec3>) -> Self {
        Self {
            positions: vertices.clone(),
            original: vertices,
        }
    }

    /// Build from a flat `[x, y, z, x, y, z, ...]` buffer. A trailing
    /// partial vertex is dropped.
    pub fn from_flat(buffer: &[f32]) -> Self {
        let vertices = buffer
            .chunks_exact(3)
            .map(|c| Vec3::new(c[0], c[1], c[2]))
            .collect();
        Self::new(vertices)
    }

    pub fn original(&self) -> &[Vec3] {
        &self.original
    }

    /// Current (displaced) positions.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn vertex_count(&self) -> usize {
        self.original.len()
    }

    /// Positions as a flat buffer for upload.
    pub fn to_flat(&self) -> Vec<f32> {
        self.positions.iter().flat_map(|p| p.to_array()).collect()
    }

    fn apply(&mut self, band: &StretchBand, stretch: f32) {
        for (live, orig) in self.positions.iter_mut().zip(&self.original) {
            *live = *orig;
            live.z += band.displacement(orig.z, stretch);
        }
    }
}

/// Vertical band over which the stretch fades in.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StretchBand {
    /// Below this height vertices do not move.
    pub min: f32,
    /// At or above this height vertices get the full displacement.
    pub max: f32,
    pub max_displacement: f32,
}

impl Default for StretchBand {
    fn default() -> Self {
        Self {
            min: 35.0,
            max: 90.0,
            max_displacement: 30.0,
        }
    }
}

impl StretchBand {
    /// Displacement weight for a vertex at height `z`, in `[0, 1]`.
    ///
    /// A degenerate band (`min >= max`) is a step at `max`.
    pub fn weight(&self, z: f32) -> f32 {
        if z >= self.max {
            1.0
        } else if z < self.min || self.min >= self.max {
            0.0
        } else {
            (z - self.min) / (self.max - self.min)
        }
    }

    /// Z offset for a vertex at height `z` under stretch factor `stretch`.
    #[inline]
    pub fn displacement(&self, z: f32, stretch: f32) -> f32 {
        self.weight(z) * (stretch - 1.0) * self.max_displacement
    }
}

/// Eases the model's stretch towards the normalized chamber depth.
#[derive(Clone, Debug)]
pub struct GeometryDeformer {
    band: StretchBand,
    meshes: Vec<DeformableGeometry>,
    current: f32,
    target: f32,
    running: bool,
}

impl GeometryDeformer {
    pub fn new(band: StretchBand) -> Self {
        Self {
            band,
            meshes: Vec::new(),
            current: 1.0,
            target: 1.0,
            running: false,
        }
    }

    pub fn band(&self) -> &StretchBand {
        &self.band
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn meshes(&self) -> &[DeformableGeometry] {
        &self.meshes
    }

    /// Aim for a new stretch factor (normalized depth, `[0, 1]`).
    ///
    /// Without meshes the target is kept and easing starts once meshes arrive.
    pub fn set_target(&mut self, factor: f32) {
        let factor = if factor.is_finite() {
            factor.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.target = factor;
        self.running = self.current != factor;
    }

    /// Replace the deformed meshes, showing the current stretch right away.
    pub fn attach(&mut self, meshes: Vec<DeformableGeometry>) {
        self.meshes = meshes;
        let (band, stretch) = (self.band, self.current);
        for mesh in &mut self.meshes {
            mesh.apply(&band, stretch);
        }
        log::debug!(
            "attached {} meshes, stretch {:.3} -> {:.3}",
            self.meshes.len(),
            self.current,
            self.target
        );
    }

    /// One easing step. Returns `true` while more steps are needed.
    pub fn tick(&mut self) -> bool {
        if !self.running || self.meshes.is_empty() {
            return false;
        }

        self.current += EASE_RATE * (self.target - self.current);
        let settled = (self.current - self.target).abs() < SETTLE_EPSILON;
        if settled {
            self.current = self.target;
            self.running = false;
        }

        let (band, stretch) = (self.band, self.current);
        for mesh in &mut self.meshes {
            mesh.apply(&band, stretch);
        }
        log::trace!("stretch {:.4}", self.current);
        !settled
    }
}

impl Default for GeometryDeformer {
    fn default() -> Self {
        Self::new(StretchBand::default())
    }
}

impl Animation for GeometryDeformer {
    fn advance(&mut self, _now: f32) -> Progress {
        let was_running = self.running && !self.meshes.is_empty();
        if self.tick() {
            Progress::Running
        } else if was_running {
            Progress::Finished
        } else {
            Progress::Idle
        }
    }

    fn cancel(&mut self) {
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }
}
