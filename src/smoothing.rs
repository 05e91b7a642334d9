/*
 * Smoothing Module
 *
 * Renderer-owned side table of smoothed fish poses. The engine knows nothing
 * about it: poses are keyed by the entity's index in `FlockEngine::entities()`,
 * which stays stable across steps. Each frame the cache eases towards the
 * latest simulated state so heading changes do not snap visually.
 */

use nannou::prelude::*;

use crate::entity::Entity;

// Weight of the newest sample in the exponential blend
pub const DEFAULT_SMOOTHING: f32 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmoothedPose {
    pub position: Point3,
    pub velocity: Vec3,
}

impl SmoothedPose {
    fn blend(&mut self, position: Point3, velocity: Vec3, factor: f32) {
        self.position = self.position.lerp(position, factor);
        self.velocity = self.velocity.lerp(velocity, factor);
    }

    // Unit facing direction, or zero for a fish at rest
    pub fn heading(&self) -> Vec3 {
        self.velocity.normalize_or_zero()
    }

    // Angle in the horizontal x/z plane, measured from +x towards +z
    pub fn yaw(&self) -> f32 {
        self.velocity.z.atan2(self.velocity.x)
    }

    pub fn pitch(&self) -> f32 {
        let horizontal = vec2(self.velocity.x, self.velocity.z).length();
        self.velocity.y.atan2(horizontal)
    }
}

pub struct SmoothingCache {
    factor: f32,
    poses: Vec<SmoothedPose>,
}

impl Default for SmoothingCache {
    fn default() -> Self {
        Self::new(DEFAULT_SMOOTHING)
    }
}

impl SmoothingCache {
    pub fn new(factor: f32) -> Self {
        Self {
            factor: factor.clamp(0.0, 1.0),
            poses: Vec::new(),
        }
    }

    // Blend in the current entity states; positions are taken relative to `origin`
    pub fn update(&mut self, entities: &[Entity], origin: Point3) {
        self.poses.truncate(entities.len());

        for (i, entity) in entities.iter().enumerate() {
            let position = entity.position - origin;
            match self.poses.get_mut(i) {
                Some(pose) => pose.blend(position, entity.velocity, self.factor),
                None => self.poses.push(SmoothedPose {
                    position,
                    velocity: entity.velocity,
                }),
            }
        }
    }

    pub fn pose(&self, index: usize) -> Option<&SmoothedPose> {
        self.poses.get(index)
    }

    pub fn poses(&self) -> &[SmoothedPose] {
        &self.poses
    }

    pub fn clear(&mut self) {
        self.poses.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn first_sample_is_taken_verbatim() {
        let mut cache = SmoothingCache::default();
        let fish = Entity::flock(pt3(1010.0, 310.0, 990.0), vec3(1.0, 0.0, 0.0));

        cache.update(&[fish], pt3(1000.0, 300.0, 1000.0));

        let pose = cache.pose(0).unwrap();
        assert_eq!(pose.position, pt3(10.0, 10.0, -10.0));
        assert_eq!(pose.velocity, vec3(1.0, 0.0, 0.0));
    }

    #[test]
    fn later_samples_blend_ten_percent() {
        let mut cache = SmoothingCache::default();
        let mut fish = Entity::flock(Point3::ZERO, vec3(1.0, 0.0, 0.0));
        cache.update(&[fish], Point3::ZERO);

        fish.position = pt3(10.0, 0.0, 0.0);
        fish.velocity = vec3(0.0, 0.0, 1.0);
        cache.update(&[fish], Point3::ZERO);

        let pose = cache.pose(0).unwrap();
        assert!((pose.position - pt3(1.0, 0.0, 0.0)).length() < 1e-6);
        assert!((pose.velocity - vec3(0.9, 0.0, 0.1)).length() < 1e-6);
    }

    #[test]
    fn cache_follows_flock_size() {
        let mut cache = SmoothingCache::default();
        let fish = Entity::flock(Point3::ZERO, Vec3::ZERO);

        cache.update(&[fish, fish, fish], Point3::ZERO);
        assert_eq!(cache.poses().len(), 3);

        cache.update(&[fish], Point3::ZERO);
        assert_eq!(cache.poses().len(), 1);
        assert!(cache.pose(1).is_none());
    }

    #[test]
    fn resting_fish_has_zero_heading() {
        let pose = SmoothedPose {
            position: Point3::ZERO,
            velocity: Vec3::ZERO,
        };
        assert_eq!(pose.heading(), Vec3::ZERO);
        assert_eq!(pose.yaw(), 0.0);
    }

    #[test]
    fn yaw_and_pitch_follow_velocity() {
        let pose = SmoothedPose {
            position: Point3::ZERO,
            velocity: vec3(0.0, 1.0, 1.0),
        };
        assert!((pose.yaw() - PI / 2.0).abs() < 1e-6);
        assert!((pose.pitch() - PI / 4.0).abs() < 1e-6);
    }
}
