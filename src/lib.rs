/*
 * Shoal - Fish Flocking Engine
 *
 * This file defines the module structure of the flocking library.
 * The engine core is `engine` + `steering` + `spatial_grid`. Seeding and
 * smoothing are caller-side helpers, and the last four modules make up the
 * nannou aquarium viewer that drives the engine once per frame.
 */

// Re-export key components for easier access
pub use config::{FlockConfig, SceneConfig};
pub use engine::FlockEngine;
pub use entity::{Entity, EntityKind};
pub use error::ConfigError;
pub use params::FlockParams;
pub use smoothing::{SmoothedPose, SmoothingCache};

// Define modules
pub mod config;
pub mod engine;
pub mod entity;
pub mod error;
pub mod params;
pub mod seed;
pub mod smoothing;
pub mod spatial_grid;
pub mod steering;

// Aquarium viewer
pub mod app;
pub mod debug;
pub mod renderer;
pub mod ui;

// Constants
pub const FISH_SIZE: f32 = 6.0;
