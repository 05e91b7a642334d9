/*
 * Steering Module
 *
 * This module holds the per-entity flocking rules. Every function here is
 * pure: it reads the frozen snapshot of one tick and returns an acceleration,
 * so the engine can evaluate all entities in any order (or in parallel)
 * without one entity ever seeing a neighbor's half-updated state.
 *
 * The three classic rules:
 * 1. Separation: steer away from neighbors that are too close
 * 2. Alignment: steer towards the average heading of neighbors
 * 3. Cohesion: steer towards the average position of neighbors
 *
 * Each rule is normalized and then weighted, and their sum is capped at
 * `max_force`. Boundary avoidance is added on top of the capped sum so the
 * flock can never out-push the walls. Its strength grows with the square of
 * the speed cap, so a fish at full speed can always brake within the margin.
 */

use nannou::prelude::*;

use crate::entity::Entity;
use crate::params::FlockParams;

/// Frozen position and velocity of one entity for the duration of a tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Kinematics {
    pub position: Point3,
    pub velocity: Vec3,
}

impl From<&Entity> for Kinematics {
    fn from(entity: &Entity) -> Self {
        Self {
            position: entity.position,
            velocity: entity.velocity,
        }
    }
}

// Running sums over one entity's neighbor set, gathered in a single pass
#[derive(Clone, Copy, Debug, Default)]
pub struct NeighborSums {
    pub count: usize,
    heading_sum: Vec3,
    position_sum: Vec3,
    separation_sum: Vec3,
}

impl NeighborSums {
    // Fold one neighbor at `distance` into the sums
    pub fn add(&mut self, me: &Kinematics, other: &Kinematics, distance: f32, separation_distance: f32) {
        self.count += 1;
        self.heading_sum += other.velocity.normalize_or_zero();
        self.position_sum += other.position;

        // Coincident entities have no defined "away" direction
        if distance < separation_distance && distance > f32::EPSILON {
            let away = (me.position - other.position) / distance;
            self.separation_sum += away / distance;
        }
    }

    pub fn separation(&self) -> Vec3 {
        self.separation_sum.normalize_or_zero()
    }

    pub fn alignment(&self, me: &Kinematics) -> Vec3 {
        if self.count == 0 {
            return Vec3::ZERO;
        }

        let average_heading = self.heading_sum / self.count as f32;
        (average_heading - me.velocity.normalize_or_zero()).normalize_or_zero()
    }

    pub fn cohesion(&self, me: &Kinematics) -> Vec3 {
        if self.count == 0 {
            return Vec3::ZERO;
        }

        let centroid = self.position_sum / self.count as f32;
        (centroid - me.position).normalize_or_zero()
    }
}

// Weighted sum of the three flocking rules, capped at max_force
pub fn flocking_acceleration(me: &Kinematics, sums: &NeighborSums, params: &FlockParams) -> Vec3 {
    if sums.count == 0 {
        return Vec3::ZERO;
    }

    let combined = sums.separation() * params.separation_weight
        + sums.alignment(me) * params.alignment_weight
        + sums.cohesion(me) * params.cohesion_weight;

    combined.clamp_length_max(params.max_force)
}

// Push along one axis: zero in the interior, rising linearly from 0 at the
// margin to 1 at the face and continuing to grow beyond it
#[inline]
fn axis_push(value: f32, extent: f32, margin: f32) -> f32 {
    let near_low = (margin - value).max(0.0);
    let near_high = (value - (extent - margin)).max(0.0);
    (near_low - near_high) / margin
}

// Push strength at the face. Braking from max_speed over half the margin
// needs max_speed^2 / margin, and boundary_weight stays on top to beat the
// capped flocking sum.
pub fn boundary_strength(params: &FlockParams, max_speed: f32) -> f32 {
    params.boundary_weight + max_speed * max_speed / params.boundary_margin
}

// Soft containment: steer back towards the interior near any face.
// Expects a validated margin (> 0).
pub fn boundary_avoidance(position: Point3, extents: Vec3, params: &FlockParams, max_speed: f32) -> Vec3 {
    let margin = params.boundary_margin;

    vec3(
        axis_push(position.x, extents.x, margin),
        axis_push(position.y, extents.y, margin),
        axis_push(position.z, extents.z, margin),
    ) * boundary_strength(params, max_speed)
}

// Scale the velocity down to the speed cap, keeping its direction
#[inline]
pub fn limit_speed(velocity: Vec3, max_speed: f32) -> Vec3 {
    velocity.clamp_length_max(max_speed)
}
