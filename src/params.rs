/*
 * Flock Parameters Module
 *
 * This module defines the FlockParams struct that holds the tunable
 * constants of the flocking rule: rule weights, the minimum separation
 * distance, the force cap and the soft boundary. These can be changed
 * live between steps (the viewer exposes them as sliders).
 *
 * The defaults are calibrated for the aquarium scene: a 2000 x 600 x 2000
 * volume, a perception radius of 10 and speeds around 1 unit per tick.
 */

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// Tunables of the flocking rule
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlockParams {
    // Neighbors closer than this push the entity away
    pub separation_distance: f32,
    pub separation_weight: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    // Cap on the summed separation/alignment/cohesion acceleration
    pub max_force: f32,
    // Distance from a face at which boundary avoidance starts
    pub boundary_margin: f32,
    pub boundary_weight: f32,
    // Performance settings
    pub parallel: bool,
    pub spatial_grid: bool,
}

impl Default for FlockParams {
    fn default() -> Self {
        Self {
            separation_distance: 4.0,
            separation_weight: 0.06,
            alignment_weight: 0.03,
            cohesion_weight: 0.02,
            max_force: 0.1,
            boundary_margin: 50.0,
            boundary_weight: 0.25,
            parallel: true,
            spatial_grid: true,
        }
    }
}

impl FlockParams {
    // Reject negative or non-finite tunables. The margin also divides the
    // boundary push, so it must be strictly positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let values = [
            ("separation_distance", self.separation_distance),
            ("separation_weight", self.separation_weight),
            ("alignment_weight", self.alignment_weight),
            ("cohesion_weight", self.cohesion_weight),
            ("max_force", self.max_force),
            ("boundary_weight", self.boundary_weight),
        ];

        for (name, value) in values {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidParam { name, value });
            }
        }

        if !(self.boundary_margin.is_finite() && self.boundary_margin > 0.0) {
            return Err(ConfigError::InvalidParam {
                name: "boundary_margin",
                value: self.boundary_margin,
            });
        }

        Ok(())
    }

    // Get parameter ranges for UI sliders
    pub fn get_max_speed_range() -> std::ops::RangeInclusive<f32> {
        0.02..=2.0
    }

    pub fn get_weight_range() -> std::ops::RangeInclusive<f32> {
        0.0..=0.2
    }

    pub fn get_separation_distance_range() -> std::ops::RangeInclusive<f32> {
        0.0..=10.0
    }

    pub fn get_margin_range() -> std::ops::RangeInclusive<f32> {
        1.0..=200.0
    }

    pub fn get_num_fish_range() -> std::ops::RangeInclusive<usize> {
        1..=5000
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(FlockParams::default().validate().is_ok());
    }

    #[test]
    fn negative_weight_is_rejected() {
        let params = FlockParams {
            cohesion_weight: -1.0,
            ..FlockParams::default()
        };

        match params.validate() {
            Err(ConfigError::InvalidParam { name, .. }) => assert_eq!(name, "cohesion_weight"),
            other => panic!("expected InvalidParam, got {:?}", other),
        }
    }

    #[test]
    fn nan_margin_is_rejected() {
        let params = FlockParams {
            boundary_margin: f32::NAN,
            ..FlockParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn zero_margin_is_rejected() {
        let params = FlockParams {
            boundary_margin: 0.0,
            ..FlockParams::default()
        };

        match params.validate() {
            Err(ConfigError::InvalidParam { name, .. }) => assert_eq!(name, "boundary_margin"),
            other => panic!("expected InvalidParam, got {:?}", other),
        }
    }

    #[test]
    fn margin_slider_never_reaches_zero() {
        assert!(*FlockParams::get_margin_range().start() > 0.0);
    }

    #[test]
    fn repulsion_outweighs_cohesion_by_default() {
        let params = FlockParams::default();
        assert!(params.separation_weight > params.cohesion_weight);
    }
}
