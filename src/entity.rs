/*
 * Entity Module
 *
 * This module defines the kinematic record of a single flock member.
 * An entity is plain data: the engine owns `kind`, `position` and `velocity`
 * and never stores anything else on it. Renderer-side state lives in a
 * separate table keyed by entity index (see the smoothing module).
 */

use nannou::prelude::*;

// Category of an entity. Only flock members exist today, but more kinds
// (obstacles, predators) can be added without breaking callers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum EntityKind {
    #[default]
    Flock,
}

/// Kinematic state of one flock member.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Entity {
    pub kind: EntityKind,
    pub position: Point3,
    pub velocity: Vec3,
}

impl Entity {
    pub fn new(kind: EntityKind, position: Point3, velocity: Vec3) -> Self {
        Self {
            kind,
            position,
            velocity,
        }
    }

    // Shorthand for the only kind the engine simulates today
    pub fn flock(position: Point3, velocity: Vec3) -> Self {
        Self::new(EntityKind::Flock, position, velocity)
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flock_constructor_uses_flock_kind() {
        let e = Entity::flock(pt3(1.0, 2.0, 3.0), vec3(3.0, 4.0, 0.0));
        assert_eq!(e.kind, EntityKind::Flock);
        assert_eq!(e.position, pt3(1.0, 2.0, 3.0));
        assert!((e.speed() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn default_kind_is_flock() {
        assert_eq!(EntityKind::default(), EntityKind::Flock);
    }
}
