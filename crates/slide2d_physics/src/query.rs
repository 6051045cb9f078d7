//! Shape query seam between the slide resolver and a geometry backend
//!
//! The resolver only needs one capability: sweep a shape along a direction
//! for some distance and report every contact found on the way. Anything
//! that can answer that (the brute-force [`PhysicsWorld`](crate::PhysicsWorld),
//! a grid, a BVH, or a scripted closure in tests) implements [`ShapeQuery`].

use crate::collision::SweepContact;
use crate::shapes::Collider;
use slide2d_math::Vec2;

/// Sweep query provider
pub trait ShapeQuery {
    /// Sweep `shape` along `direction` for up to `max_distance` length units
    ///
    /// `direction` need not be unit length; implementations normalize it and
    /// return no contacts for a zero direction or a non-positive distance.
    /// Contacts are returned in provider-defined order.
    fn sweep(&self, shape: &Collider, direction: Vec2, max_distance: f32) -> Vec<SweepContact>;
}

impl<F> ShapeQuery for F
where
    F: Fn(&Collider, Vec2, f32) -> Vec<SweepContact>,
{
    fn sweep(&self, shape: &Collider, direction: Vec2, max_distance: f32) -> Vec<SweepContact> {
        self(shape, direction, max_distance)
    }
}

/// Provider for empty space: every sweep is unobstructed
#[derive(Clone, Copy, Debug, Default)]
pub struct NoObstacles;

impl ShapeQuery for NoObstacles {
    fn sweep(&self, _shape: &Collider, _direction: Vec2, _max_distance: f32) -> Vec<SweepContact> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_obstacles_is_empty() {
        let shape = Collider::circle(Vec2::ZERO, 0.5);
        assert!(NoObstacles.sweep(&shape, Vec2::X, 10.0).is_empty());
    }

    #[test]
    fn test_closure_provider() {
        let provider = |_: &Collider, direction: Vec2, max_distance: f32| {
            vec![SweepContact::new(direction * max_distance, -direction, max_distance)]
        };
        let shape = Collider::circle(Vec2::ZERO, 0.5);
        let contacts = provider.sweep(&shape, Vec2::Y, 2.0);

        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].contact_point, Vec2::new(0.0, 2.0));
        assert_eq!(contacts[0].normal, -Vec2::Y);
    }

    #[test]
    fn test_provider_as_trait_object() {
        let providers: Vec<Box<dyn ShapeQuery>> = vec![
            Box::new(NoObstacles),
            Box::new(|_: &Collider, _: Vec2, _: f32| vec![SweepContact::new(Vec2::ZERO, Vec2::Y, 0.0)]),
        ];
        let shape = Collider::circle(Vec2::ZERO, 1.0);
        let counts: Vec<usize> = providers.iter().map(|q| q.sweep(&shape, Vec2::X, 1.0).len()).collect();
        assert_eq!(counts, vec![0, 1]);
    }
}
