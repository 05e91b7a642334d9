/*
 * Renderer Module
 *
 * Draws the aquarium from above: the tank outline scaled to fit the window
 * and one triangle per fish, placed and rotated from its smoothed pose.
 * Fish nearer the surface are drawn larger and lighter. Fish climbing or
 * diving are foreshortened, and fish at rest are drawn stubby.
 */

use nannou::prelude::*;
use tracing::warn;

use crate::app::Model;
use crate::smoothing::SmoothedPose;
use crate::ui;
use crate::FISH_SIZE;

// Fraction of the window the tank occupies
const TANK_FILL: f32 = 0.9;

// Shortest drawn body, as a fraction of full length
const MIN_BODY_LENGTH: f32 = 0.3;

// Pixels per world unit so the tank's x/z footprint fits the window
pub fn tank_scale(boundary: (f32, f32, f32), window_rect: Rect) -> f32 {
    let (width, _, depth) = boundary;
    (window_rect.w() / width).min(window_rect.h() / depth) * TANK_FILL
}

// Top-down screen position; world +z points down the screen
pub fn to_screen(pose: &SmoothedPose, scale: f32) -> Point2 {
    pt2(pose.position.x * scale, -pose.position.z * scale)
}

// 0 at the bottom of the tank, 1 at the surface
fn depth_factor(pose: &SmoothedPose, height: f32) -> f32 {
    (pose.position.y / height + 0.5).clamp(0.0, 1.0)
}

// Seen from above, a fish's length shrinks with its pitch. A fish with no
// heading has no pitch either, so it gets the shortest body.
fn body_length(pose: &SmoothedPose) -> f32 {
    if pose.heading() == Vec3::ZERO {
        return MIN_BODY_LENGTH;
    }
    pose.pitch().cos().max(MIN_BODY_LENGTH)
}

// Triangle pointing along +x before rotation
fn fish_points(pose: &SmoothedPose, size: f32) -> [Point2; 3] {
    let length = size * body_length(pose);
    [
        pt2(length, 0.0),
        pt2(-length, size / 2.0),
        pt2(-length, -size / 2.0),
    ]
}

pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(rgb(0.0, 0.2, 0.6));

    let window_rect = app.window_rect();
    let boundary = model.engine.boundary();
    let (width, height, depth) = boundary;
    let scale = tank_scale(boundary, window_rect);

    draw.rect()
        .x_y(0.0, 0.0)
        .w_h(width * scale, depth * scale)
        .no_fill()
        .stroke_weight(1.0)
        .stroke(rgba(0.6, 0.8, 1.0, 0.6));

    for pose in model.smoothing.poses() {
        let t = depth_factor(pose, height);
        let size = FISH_SIZE * (0.6 + 0.4 * t);

        draw.polygon()
            .color(rgb(0.9, 0.45 + 0.35 * t, 0.1 + 0.2 * t))
            .points(fish_points(pose, size))
            .xy(to_screen(pose, scale))
            .rotate(-pose.yaw());
    }

    if model.controls.show_debug {
        ui::draw_debug_info(&draw, &model.debug_info, window_rect, model.engine.max_speed());
    }

    if let Err(e) = draw.to_frame(app, &frame) {
        warn!(error = ?e, "failed to draw frame");
    }
    if let Err(e) = model.egui.draw_to_frame(&frame) {
        warn!(error = ?e, "failed to draw controls");
    }
}
