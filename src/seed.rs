/*
 * Seeding Module
 *
 * Fills an engine with randomly placed fish. Positions are whole-unit
 * coordinates inside the boundary and every velocity component is drawn
 * from [-2, 2), which matches how the aquarium scene starts.
 */

use nannou::prelude::*;
use rand::Rng;

use crate::engine::FlockEngine;
use crate::entity::Entity;

// Largest absolute starting velocity component
pub const MAX_SEED_VELOCITY: f32 = 2.0;

pub fn random_entity<R: Rng + ?Sized>(rng: &mut R, extents: Vec3) -> Entity {
    let position = pt3(
        (rng.gen::<f32>() * extents.x).floor(),
        (rng.gen::<f32>() * extents.y).floor(),
        (rng.gen::<f32>() * extents.z).floor(),
    );
    let velocity = vec3(
        rng.gen_range(-MAX_SEED_VELOCITY..MAX_SEED_VELOCITY),
        rng.gen_range(-MAX_SEED_VELOCITY..MAX_SEED_VELOCITY),
        rng.gen_range(-MAX_SEED_VELOCITY..MAX_SEED_VELOCITY),
    );

    Entity::flock(position, velocity)
}

// Add `count` random fish to the engine
pub fn seed_flock<R: Rng + ?Sized>(engine: &mut FlockEngine, count: usize, rng: &mut R) {
    let extents = engine.extents();
    for _ in 0..count {
        engine.add_entity(random_entity(rng, extents));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FlockConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn seeded_fish_start_inside_boundary() {
        let mut engine = FlockEngine::new(FlockConfig::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        seed_flock(&mut engine, 500, &mut rng);

        let extents = engine.extents();
        assert_eq!(engine.len(), 500);
        for entity in engine.entities() {
            assert!(entity.position.cmpge(Vec3::ZERO).all());
            assert!(entity.position.cmple(extents).all());
            assert_eq!(entity.position, entity.position.floor());
            assert!(entity.velocity.abs().cmple(Vec3::splat(MAX_SEED_VELOCITY)).all());
        }
    }

    #[test]
    fn same_seed_gives_same_flock() {
        let config = FlockConfig::default();
        let mut a = FlockEngine::new(config).unwrap();
        let mut b = FlockEngine::new(config).unwrap();

        seed_flock(&mut a, 20, &mut StdRng::seed_from_u64(1));
        seed_flock(&mut b, 20, &mut StdRng::seed_from_u64(1));

        assert_eq!(a.entities(), b.entities());
    }
}
