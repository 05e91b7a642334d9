/*
 * Flock Engine Module
 *
 * This module owns the flock: an insertion-ordered list of entities inside a
 * fixed bounding volume, plus the global speed cap and flocking tunables.
 *
 * A step is double-buffered:
 * 1. Freeze every entity's position/velocity into the snapshot buffer
 * 2. Compute each entity's steering into the steering buffer, reading only
 *    the snapshot (this pass may run in parallel with rayon)
 * 3. Commit: integrate velocity, clamp to the speed cap, integrate position
 *
 * Entities are never reallocated or reordered by a step, so callers may key
 * their own per-entity state by index into `entities()`.
 */

use nannou::prelude::*;
use rayon::prelude::*;
use tracing::{debug, trace, warn};

use crate::config::FlockConfig;
use crate::entity::Entity;
use crate::error::ConfigError;
use crate::params::FlockParams;
use crate::spatial_grid::SpatialGrid;
use crate::steering::{self, Kinematics, NeighborSums};

// Speed cap until the caller sets one
pub const DEFAULT_MAX_SPEED: f32 = 1.0;

pub struct FlockEngine {
    config: FlockConfig,
    params: FlockParams,
    max_speed: f32,
    entities: Vec<Entity>,
    // Frozen state read by every entity during a step
    snapshot: Vec<Kinematics>,
    // Per-entity steering written during a step
    steering: Vec<Vec3>,
    grid: SpatialGrid,
}

// Read-only view of one tick, shared across the steering pass
struct StepContext<'a> {
    snapshot: &'a [Kinematics],
    grid: Option<&'a SpatialGrid>,
    params: &'a FlockParams,
    extents: Vec3,
    radius_sq: f32,
    max_speed: f32,
}

impl StepContext<'_> {
    fn steering_for(&self, i: usize) -> Vec3 {
        let me = &self.snapshot[i];
        let mut sums = NeighborSums::default();

        let mut visit = |j: usize| {
            if j == i {
                return;
            }
            let other = &self.snapshot[j];
            let distance_squared = me.position.distance_squared(other.position);
            if distance_squared <= self.radius_sq {
                sums.add(me, other, distance_squared.sqrt(), self.params.separation_distance);
            }
        };

        match self.grid {
            Some(grid) => grid.for_each_nearby(me.position, &mut visit),
            None => (0..self.snapshot.len()).for_each(&mut visit),
        }

        steering::flocking_acceleration(me, &sums, self.params)
            + steering::boundary_avoidance(me.position, self.extents, self.params, self.max_speed)
    }
}

impl FlockEngine {
    pub fn new(config: FlockConfig) -> Result<Self, ConfigError> {
        Self::with_params(config, FlockParams::default())
    }

    pub fn with_params(config: FlockConfig, params: FlockParams) -> Result<Self, ConfigError> {
        config.validate()?;
        params.validate()?;

        let extents = vec3(config.width, config.height, config.depth);
        let grid = SpatialGrid::new(config.perception_radius, extents);

        debug!(
            width = config.width,
            height = config.height,
            depth = config.depth,
            perception_radius = config.perception_radius,
            grid_cell_size = grid.cell_size,
            "flock engine created"
        );

        Ok(Self {
            config,
            params,
            max_speed: DEFAULT_MAX_SPEED,
            entities: Vec::new(),
            snapshot: Vec::new(),
            steering: Vec::new(),
            grid,
        })
    }

    // Append an entity and return its index in `entities()`
    pub fn add_entity(&mut self, entity: Entity) -> usize {
        self.entities.push(entity);
        self.entities.len() - 1
    }

    pub fn boundary(&self) -> (f32, f32, f32) {
        (self.config.width, self.config.height, self.config.depth)
    }

    pub fn extents(&self) -> Vec3 {
        vec3(self.config.width, self.config.height, self.config.depth)
    }

    pub fn perception_radius(&self) -> f32 {
        self.config.perception_radius
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    // Takes effect on the next step; non-positive or non-finite caps are ignored
    pub fn set_max_speed(&mut self, max_speed: f32) {
        if !max_speed.is_finite() || max_speed <= 0.0 {
            warn!(max_speed, "ignoring invalid max speed");
            return;
        }
        self.max_speed = max_speed;
    }

    pub fn params(&self) -> &FlockParams {
        &self.params
    }

    pub fn set_params(&mut self, params: FlockParams) -> Result<(), ConfigError> {
        params.validate()?;
        if params != self.params {
            debug!(?params, "flock params updated");
            self.params = params;
        }
        Ok(())
    }

    // Advance every entity by one tick
    pub fn step(&mut self) {
        if self.entities.is_empty() {
            return;
        }

        trace!(entities = self.entities.len(), max_speed = self.max_speed, "flock step");

        self.snapshot.clear();
        self.snapshot.extend(self.entities.iter().map(Kinematics::from));

        if self.params.spatial_grid {
            self.grid.rebuild(self.snapshot.iter().map(|k| k.position));
        }

        self.steering.resize(self.entities.len(), Vec3::ZERO);

        let radius = self.config.perception_radius;
        let context = StepContext {
            snapshot: &self.snapshot,
            grid: self.params.spatial_grid.then_some(&self.grid),
            params: &self.params,
            extents: vec3(self.config.width, self.config.height, self.config.depth),
            radius_sq: radius * radius,
            max_speed: self.max_speed,
        };

        if self.params.parallel {
            self.steering
                .par_iter_mut()
                .enumerate()
                .for_each(|(i, accel)| *accel = context.steering_for(i));
        } else {
            for (i, accel) in self.steering.iter_mut().enumerate() {
                *accel = context.steering_for(i);
            }
        }

        // Commit only after every steering vector for the tick is known
        let max_speed = self.max_speed;
        for ((entity, frozen), accel) in self
            .entities
            .iter_mut()
            .zip(&self.snapshot)
            .zip(&self.steering)
        {
            let velocity = steering::limit_speed(frozen.velocity + *accel, max_speed);
            entity.velocity = velocity;
            entity.position = frozen.position + velocity;
        }
    }
}
