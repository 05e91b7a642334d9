/*
 * Application Module
 *
 * This module drives the flock from a nannou window, the way any external
 * renderer would: build the engine, seed it once, then call `step` once per
 * frame and read the entities back. The smoothed poses used for drawing live
 * in a SmoothingCache owned here, not on the entities.
 */

use nannou::prelude::*;
use nannou_egui::Egui;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::OnceLock;
use std::time::Instant;
use tracing::{info, warn};

use crate::config::SceneConfig;
use crate::debug::DebugInfo;
use crate::engine::FlockEngine;
use crate::error::ConfigError;
use crate::renderer;
use crate::seed;
use crate::smoothing::SmoothingCache;
use crate::ui::{self, ViewerControls};

// Scene handed over from `run`; nannou's model callback takes no arguments
static SCENE: OnceLock<SceneConfig> = OnceLock::new();

pub struct Model {
    pub engine: FlockEngine,
    pub scene: SceneConfig,
    pub controls: ViewerControls,
    pub smoothing: SmoothingCache,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    rng: StdRng,
}

// Open the viewer window and block until it closes
pub fn run(scene: SceneConfig) {
    if SCENE.set(scene).is_err() {
        warn!("viewer scene already set, keeping the first one");
    }
    nannou::app(model).update(update).run();
}

// Build an engine from the scene and fill it with `num_fish` random fish
pub fn build_flock(scene: &SceneConfig, num_fish: usize, rng: &mut StdRng) -> Result<FlockEngine, ConfigError> {
    let mut engine = FlockEngine::with_params(scene.flock, scene.params.clone())?;
    engine.set_max_speed(scene.max_speed);
    seed::seed_flock(&mut engine, num_fish, rng);
    Ok(engine)
}

// Centre of the tank, used as the drawing origin
pub fn tank_centre(engine: &FlockEngine) -> Point3 {
    engine.extents() * 0.5
}

fn model(app: &App) -> Model {
    let scene = SCENE.get().cloned().unwrap_or_default();

    let window_id = app
        .new_window()
        .title("Shoal Aquarium")
        .size(1280, 800)
        .view(renderer::view)
        .raw_event(raw_window_event)
        .build()
        .expect("failed to open viewer window");

    let window = app.window(window_id).expect("viewer window closed during setup");
    let egui = Egui::from_window(&window);

    let mut rng = match scene.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let engine = build_flock(&scene, scene.num_fish, &mut rng)
        .expect("scene config is validated before the viewer starts");

    info!(fish = engine.len(), boundary = ?engine.boundary(), "aquarium ready");

    Model {
        controls: ViewerControls::from_scene(&scene),
        engine,
        scene,
        smoothing: SmoothingCache::default(),
        egui,
        debug_info: DebugInfo::default(),
        rng,
    }
}

fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    let actions = ui::update_ui(&mut model.egui, &mut model.controls, &model.debug_info);

    if actions.reset_flock {
        reset_flock(model);
    }

    // Live controls apply on this frame's step
    model.engine.set_max_speed(model.controls.max_speed);
    if let Err(e) = model.engine.set_params(model.controls.params.clone()) {
        warn!(error = %e, "rejected flock params from UI");
        model.controls.params = model.engine.params().clone();
    }

    if !model.controls.paused {
        let start = Instant::now();
        model.engine.step();
        model.debug_info.step_time = start.elapsed();
    }

    let origin = tank_centre(&model.engine);
    model.smoothing.update(model.engine.entities(), origin);
    model.debug_info.fish = model.engine.len();
}

// The engine has no removal, so a reset builds a fresh one
fn reset_flock(model: &mut Model) {
    let mut scene = model.scene.clone();
    scene.params = model.controls.params.clone();
    scene.max_speed = model.controls.max_speed;

    match build_flock(&scene, model.controls.num_fish, &mut model.rng) {
        Ok(engine) => {
            info!(fish = engine.len(), "flock reset");
            model.engine = engine;
            model.smoothing.clear();
        }
        Err(e) => warn!(error = %e, "flock reset failed, keeping current flock"),
    }
}

fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_flock_seeds_requested_count() {
        let scene = SceneConfig {
            max_speed: 0.4,
            ..SceneConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        let engine = build_flock(&scene, 25, &mut rng).unwrap();

        assert_eq!(engine.len(), 25);
        assert_eq!(engine.max_speed(), 0.4);
        assert_eq!(tank_centre(&engine), pt3(1000.0, 300.0, 1000.0));
    }

    #[test]
    fn build_flock_rejects_invalid_scene() {
        let mut scene = SceneConfig::default();
        scene.flock.perception_radius = 0.0;
        let mut rng = StdRng::seed_from_u64(3);

        assert!(build_flock(&scene, 5, &mut rng).is_err());
    }
}
