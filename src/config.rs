//! Scene configuration.
//!
//! Everything that is fixed for the lifetime of a scene (pool sizes, seed,
//! model placement, asset paths, initial slider values) lives in a
//! [`SceneConfig`] that can be serialized to JSON and loaded by the runner.
//! Every field has a default, so a config file only needs the values it
//! changes.

use crate::camera::Pose;
use crate::deform::StretchBand;
use crate::error::ConfigError;
use crate::parameters::SimulationParameters;
use crate::particles::{TextureVariant, VENT};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Texture files for each smoke/ash look.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TexturePaths {
    pub smoke: Vec<PathBuf>,
    pub white_smoke: Vec<PathBuf>,
    pub ash: Vec<PathBuf>,
}

impl Default for TexturePaths {
    fn default() -> Self {
        let res = |name: &str| PathBuf::from("resources").join(name);
        Self {
            smoke: vec![
                res("volcano_smoke1.png"),
                res("smoke_var2.png"),
                res("smoke_var3.png"),
            ],
            white_smoke: vec![
                res("white_smoke1.png"),
                res("white_smoke2.png"),
                res("white_smoke3.png"),
            ],
            ash: Vec::new(),
        }
    }
}

impl TexturePaths {
    pub fn for_variant(&self, variant: TextureVariant) -> &[PathBuf] {
        match variant {
            TextureVariant::Default => &self.smoke,
            TextureVariant::White => &self.white_smoke,
            TextureVariant::Ash => &self.ash,
        }
    }
}

/// Complete scene configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Smoke pool size.
    pub smoke_capacity: usize,
    /// Ash pool size.
    pub ash_capacity: usize,
    /// Seed for every random source in the scene.
    pub seed: u64,
    /// Crater vent, where particles spawn.
    pub spawn_point: Vec3,
    /// Half-size of the square particles spawn in.
    pub spawn_jitter: f32,
    pub stretch: StretchBand,
    /// Camera pose at rest.
    pub default_pose: Pose,
    /// Seconds for animated camera moves.
    pub transition_secs: f32,
    pub textures: TexturePaths,
    /// Slider values at startup.
    pub parameters: SimulationParameters,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            smoke_capacity: 150,
            ash_capacity: 200,
            seed: 0x5eed,
            spawn_point: VENT,
            spawn_jitter: 0.75,
            stretch: StretchBand::default(),
            default_pose: Pose::DEFAULT,
            transition_secs: 1.5,
            textures: TexturePaths::default(),
            parameters: SimulationParameters::default(),
        }
    }
}

impl SceneConfig {
    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parse a configuration. Out-of-range parameters are clamped.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: SceneConfig = serde_json::from_str(json)?;
        config.parameters = config.parameters.sanitized();
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        let config = SceneConfig::from_json("{}").unwrap();
        assert_eq!(config, SceneConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config =
            SceneConfig::from_json(r#"{"smoke_capacity": 40, "parameters": {"gas_density": 99}}"#)
                .unwrap();
        assert_eq!(config.smoke_capacity, 40);
        assert_eq!(config.parameters.gas_density, 6.0);
        assert_eq!(config.parameters.depth, 5.0);
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            SceneConfig::from_json("{ not json"),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            SceneConfig::load("/nonexistent/volcano-fx.json"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_save_load() {
        let path = std::env::temp_dir().join(format!("volcano-fx-config-{}.json", std::process::id()));
        let mut config = SceneConfig::default();
        config.seed = 99;
        config.save(&path).unwrap();
        let loaded = SceneConfig::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, config);
    }
}
