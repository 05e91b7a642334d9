/*
 * UI Module
 *
 * This module contains the viewer controls and the egui panel that edits
 * them. The panel changes values only; the app module pushes them into the
 * engine once per frame (max speed and flocking tunables apply on the next
 * step, the fish count on the next reset).
 */

use nannou_egui::{egui, Egui};

use crate::config::SceneConfig;
use crate::debug::DebugInfo;
use crate::params::FlockParams;

// Values the user can change while the viewer runs
#[derive(Clone, Debug)]
pub struct ViewerControls {
    pub max_speed: f32,
    pub num_fish: usize,
    pub params: FlockParams,
    pub paused: bool,
    pub show_debug: bool,
}

impl ViewerControls {
    pub fn from_scene(scene: &SceneConfig) -> Self {
        Self {
            max_speed: scene.max_speed,
            num_fish: scene.num_fish,
            params: scene.params.clone(),
            paused: false,
            show_debug: false,
        }
    }
}

// One-shot requests raised by the panel this frame
#[derive(Clone, Copy, Debug, Default)]
pub struct UiActions {
    pub reset_flock: bool,
}

pub fn update_ui(egui: &mut Egui, controls: &mut ViewerControls, debug_info: &DebugInfo) -> UiActions {
    let mut actions = UiActions::default();

    let ctx = egui.begin_frame();

    egui::Window::new("Aquarium Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Fish", |ui| {
                ui.add(egui::Slider::new(&mut controls.num_fish, FlockParams::get_num_fish_range()).text("Number of Fish"));

                if ui.button("Reset Flock").clicked() {
                    actions.reset_flock = true;
                }

                ui.add(egui::Slider::new(&mut controls.max_speed, FlockParams::get_max_speed_range()).text("Max Speed"));
            });

            ui.collapsing("Flocking Behavior", |ui| {
                let params = &mut controls.params;
                ui.add(egui::Slider::new(&mut params.separation_weight, FlockParams::get_weight_range()).text("Separation Weight"));
                ui.add(egui::Slider::new(&mut params.alignment_weight, FlockParams::get_weight_range()).text("Alignment Weight"));
                ui.add(egui::Slider::new(&mut params.cohesion_weight, FlockParams::get_weight_range()).text("Cohesion Weight"));
                ui.add(egui::Slider::new(&mut params.max_force, FlockParams::get_weight_range()).text("Max Force"));
                ui.add(egui::Slider::new(&mut params.separation_distance, FlockParams::get_separation_distance_range()).text("Separation Distance"));
                ui.add(egui::Slider::new(&mut params.boundary_margin, FlockParams::get_margin_range()).text("Boundary Margin"));
                ui.add(egui::Slider::new(&mut params.boundary_weight, FlockParams::get_weight_range()).text("Boundary Weight"));
            });

            ui.collapsing("Performance Tuning", |ui| {
                ui.checkbox(&mut controls.params.parallel, "Enable Parallel Steering");
                ui.checkbox(&mut controls.params.spatial_grid, "Enable Spatial Grid");

                ui.separator();

                for line in debug_info.lines(controls.max_speed) {
                    ui.label(line);
                }
            });

            ui.checkbox(&mut controls.show_debug, "Show Debug Info");
            ui.checkbox(&mut controls.paused, "Pause Simulation");
        });

    actions
}

// Draw debug information in the top-left corner of the window
pub fn draw_debug_info(draw: &nannou::Draw, debug_info: &DebugInfo, window_rect: nannou::geom::Rect, max_speed: f32) {
    let margin = 20.0;
    let line_height = 20.0;
    let panel_width = 200.0;
    let lines = debug_info.lines(max_speed);
    let panel_height = line_height * lines.len() as f32 + margin;

    draw.rect()
        .x_y(window_rect.left() + panel_width / 2.0, window_rect.top() - panel_height / 2.0)
        .w_h(panel_width, panel_height)
        .color(nannou::color::rgba(0.0, 0.0, 0.0, 0.7));

    let text_x = window_rect.left() + margin;
    let text_y = window_rect.top() - margin;

    for (i, text) in lines.iter().enumerate() {
        let y = text_y - (i as f32 * line_height);

        // nannou centers text, so offset by roughly half a line width
        draw.text(text)
            .x_y(text_x + 70.0, y)
            .color(nannou::color::WHITE)
            .font_size(14);
    }
}
