/*
 * Configuration Module
 *
 * FlockConfig is the fixed construction-time configuration of an engine:
 * the three extents of the bounding volume and the perception radius.
 * SceneConfig bundles everything the viewer needs to set up a scene and can
 * be loaded from a JSON file; any field left out takes its default.
 */

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::params::FlockParams;

// Construction-time configuration of a FlockEngine
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlockConfig {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub perception_radius: f32,
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self {
            width: 2000.0,
            height: 600.0,
            depth: 2000.0,
            perception_radius: 10.0,
        }
    }
}

impl FlockConfig {
    pub fn new(width: f32, height: f32, depth: f32, perception_radius: f32) -> Self {
        Self {
            width,
            height,
            depth,
            perception_radius,
        }
    }

    // All four values must be finite and strictly positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (axis, value) in [("width", self.width), ("height", self.height), ("depth", self.depth)] {
            if !is_positive(value) {
                return Err(ConfigError::NonPositiveExtent { axis, value });
            }
        }

        if !is_positive(self.perception_radius) {
            return Err(ConfigError::NonPositivePerceptionRadius(self.perception_radius));
        }

        Ok(())
    }
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

// Everything needed to set up the aquarium scene
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub flock: FlockConfig,
    pub params: FlockParams,
    pub num_fish: usize,
    pub max_speed: f32,
    // Fixed seed for a reproducible starting flock
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            flock: FlockConfig::default(),
            params: FlockParams::default(),
            num_fish: 150,
            max_speed: 1.0,
            seed: None,
        }
    }
}

impl SceneConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.flock.validate()?;
        self.params.validate()?;

        if !is_positive(self.max_speed) {
            return Err(ConfigError::InvalidParam {
                name: "max_speed",
                value: self.max_speed,
            });
        }

        Ok(())
    }
}
