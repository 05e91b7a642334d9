// Long-running aquarium scenarios exercising the public API end to end.

use nannou::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use shoal::seed::seed_flock;
use shoal::{FlockConfig, FlockEngine, SmoothingCache};

fn aquarium(seed: u64, fish: usize) -> FlockEngine {
    let mut engine = FlockEngine::new(FlockConfig::new(2000.0, 600.0, 2000.0, 10.0)).unwrap();
    seed_flock(&mut engine, fish, &mut StdRng::seed_from_u64(seed));
    engine
}

fn assert_contained(engine: &FlockEngine, tick: usize) {
    let margin = Vec3::splat(engine.params().boundary_margin);
    let low = -margin;
    let high = engine.extents() + margin;

    for (i, entity) in engine.entities().iter().enumerate() {
        assert!(
            entity.position.cmpge(low).all() && entity.position.cmple(high).all(),
            "fish {} escaped at tick {}: {:?}",
            i,
            tick,
            entity.position
        );
        assert!(
            entity.speed() <= engine.max_speed() + 1e-5,
            "fish {} too fast at tick {}: {}",
            i,
            tick,
            entity.speed()
        );
    }
}

#[test]
fn flock_stays_in_tank_for_a_thousand_ticks() {
    let mut engine = aquarium(2024, 150);

    for tick in 0..1000 {
        engine.step();
        assert_contained(&engine, tick);
    }

    assert_eq!(engine.len(), 150);
}

#[test]
fn live_speed_changes_are_honoured() {
    let mut engine = aquarium(17, 150);
    engine.set_max_speed(2.0);

    for tick in 0..1000 {
        if tick == 500 {
            engine.set_max_speed(0.3);
        }
        engine.step();
        assert_contained(&engine, tick);
    }

    assert!(engine.entities().iter().all(|e| e.speed() <= 0.3 + 1e-5));
}

#[test]
fn smoothing_side_table_tracks_flock_without_touching_it() {
    let mut engine = aquarium(5, 60);
    let mut smoothing = SmoothingCache::default();
    let origin = engine.extents() * 0.5;

    for _ in 0..100 {
        let before = engine.entities().to_vec();
        smoothing.update(engine.entities(), origin);
        assert_eq!(engine.entities(), &before[..]);
        engine.step();
    }

    assert_eq!(smoothing.poses().len(), engine.len());
    for (pose, entity) in smoothing.poses().iter().zip(engine.entities()) {
        // Smoothed poses lag the flock but stay in the same neighbourhood
        assert!(pose.position.distance(entity.position - origin) < 100.0);
    }
}
