/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that contains performance metrics
 * shown by the viewer:
 * - FPS (frames per second)
 * - Frame time
 * - Time spent in the last engine step
 * - Number of fish in the flock
 */

use std::time::Duration;

#[derive(Clone, Debug, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub step_time: Duration,
    pub fish: usize,
}

impl DebugInfo {
    pub fn lines(&self, max_speed: f32) -> Vec<String> {
        vec![
            format!("FPS: {:.1}", self.fps),
            format!("Frame time: {:.2} ms", self.frame_time.as_secs_f64() * 1000.0),
            format!("Step time: {:.3} ms", self.step_time.as_secs_f64() * 1000.0),
            format!("Fish: {}", self.fish),
            format!("Max speed: {:.2}", max_speed),
        ]
    }
}
