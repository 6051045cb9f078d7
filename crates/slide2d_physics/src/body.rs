//! Static obstacles and kinematic bodies

use crate::collision::CollisionFilter;
use crate::shapes::Collider;
use crate::slide::{SlideResolver, SlideResult};
use crate::world::PhysicsWorld;
use slide2d_math::Vec2;
use slotmap::new_key_type;

new_key_type! {
    /// Key to a static collider in the physics world
    ///
    /// Generational: once a collider is removed, keys to it stay dead even
    /// if the slot is reused.
    pub struct ColliderKey;
}

/// An immovable obstacle (wall, floor, post)
#[derive(Clone, Debug, PartialEq)]
pub struct StaticCollider {
    /// World-space shape
    pub collider: Collider,
    /// Which sweeps can see this obstacle
    pub filter: CollisionFilter,
}

impl StaticCollider {
    /// Create a static collider on the static-world layer
    pub fn new(collider: Collider) -> Self {
        Self {
            collider,
            filter: CollisionFilter::static_world(),
        }
    }

    /// Axis-aligned wall or block from its center and half-extents
    pub fn block(center: Vec2, half_extents: Vec2) -> Self {
        Self::new(Collider::aabb(center, half_extents))
    }

    /// Round post
    pub fn post(center: Vec2, radius: f32) -> Self {
        Self::new(Collider::circle(center, radius))
    }

    /// Infinite boundary through `point` with free space on the `normal` side
    pub fn boundary(point: Vec2, normal: Vec2) -> Self {
        Self::new(Collider::plane(point, normal))
    }

    /// Set the collision filter
    pub fn with_filter(mut self, filter: CollisionFilter) -> Self {
        self.filter = filter;
        self
    }
}

/// A body moved by the slide resolver rather than by forces
///
/// Owns the state the resolver threads between steps: each [`step`](Self::step)
/// feeds the current position and velocity in and stores the result.
#[derive(Clone, Debug)]
pub struct KinematicBody {
    /// Current position (center of the shape)
    pub position: Vec2,
    /// Current velocity
    pub velocity: Vec2,
    /// Collision shape; its own placement is ignored, it is centered on `position`
    pub shape: Collider,
    /// Which obstacles the body slides against
    pub filter: CollisionFilter,
}

impl KinematicBody {
    /// Create a resting circular body
    pub fn new_circle(position: Vec2, radius: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            shape: Collider::circle(position, radius),
            filter: CollisionFilter::player(),
        }
    }

    /// Create a resting box-shaped body
    pub fn new_aabb(position: Vec2, half_extents: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            shape: Collider::aabb(position, half_extents),
            filter: CollisionFilter::player(),
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_filter(mut self, filter: CollisionFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Teleport the body without sweeping
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// World-space collider at the current position
    pub fn collider(&self) -> Collider {
        self.shape.with_center(self.position)
    }

    /// Set the velocity from a desired direction and speed
    ///
    /// A zero direction stops the body.
    pub fn apply_movement(&mut self, direction: Vec2, speed: f32) {
        self.velocity = direction.normalized() * speed;
    }

    /// Advance one step through `world`
    ///
    /// Resolves contacts, then moves the body the reported remaining distance
    /// along its new velocity.
    pub fn step(
        &mut self,
        delta_time: f32,
        intended_direction: Vec2,
        world: &PhysicsWorld,
        resolver: &SlideResolver,
    ) -> SlideResult {
        let query = world.query(self.filter);
        let result = resolver.resolve(
            delta_time,
            self.velocity,
            self.position,
            intended_direction,
            &self.shape,
            &query,
        );

        self.velocity = result.velocity;
        self.position = result.position + result.velocity.normalized() * result.distance_remaining;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::CollisionLayer;
    use crate::slide::StopReason;

    const EPSILON: f32 = 0.0001;

    #[test]
    fn test_static_collider_defaults_to_static_layer() {
        let wall = StaticCollider::block(Vec2::ZERO, Vec2::new(1.0, 1.0));
        assert_eq!(wall.filter, CollisionFilter::static_world());

        let custom = StaticCollider::post(Vec2::ZERO, 1.0)
            .with_filter(CollisionFilter::new(CollisionLayer::PLATFORM, CollisionLayer::ALL));
        assert_eq!(custom.filter.layer, CollisionLayer::PLATFORM);
    }

    #[test]
    fn test_collider_follows_position() {
        let mut body = KinematicBody::new_circle(Vec2::ZERO, 0.5);
        body.set_position(Vec2::new(2.0, 3.0));
        assert_eq!(body.collider().center(), Vec2::new(2.0, 3.0));
    }

    #[test]
    fn test_apply_movement() {
        let mut body = KinematicBody::new_circle(Vec2::ZERO, 0.5);
        body.apply_movement(Vec2::new(0.0, 10.0), 3.0);
        assert_eq!(body.velocity, Vec2::new(0.0, 3.0));

        body.apply_movement(Vec2::ZERO, 3.0);
        assert_eq!(body.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_step_in_open_space_moves_full_distance() {
        let world = PhysicsWorld::new();
        let mut body = KinematicBody::new_circle(Vec2::ZERO, 0.5).with_velocity(Vec2::new(2.0, 0.0));

        let result = body.step(0.5, Vec2::X, &world, &SlideResolver::default());

        assert_eq!(result.stop_reason, StopReason::Unobstructed);
        assert!(body.position.approx_eq(Vec2::new(1.0, 0.0), EPSILON));
        assert_eq!(body.velocity, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_step_stops_at_wall() {
        let mut world = PhysicsWorld::new();
        // Wall face at x = 1.0
        world.add_collider(StaticCollider::block(Vec2::new(2.0, 0.0), Vec2::new(1.0, 5.0)));

        let mut body = KinematicBody::new_circle(Vec2::ZERO, 0.5).with_velocity(Vec2::new(4.0, 0.0));
        body.step(1.0, Vec2::X, &world, &SlideResolver::default());

        // Head-on: flush against the wall with no velocity left
        assert!(body.position.approx_eq(Vec2::new(0.5, 0.0), EPSILON));
        assert_eq!(body.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_step_slides_along_wall() {
        let mut world = PhysicsWorld::new();
        world.add_collider(StaticCollider::block(Vec2::new(2.0, 0.0), Vec2::new(1.0, 5.0)));

        let mut body = KinematicBody::new_circle(Vec2::ZERO, 0.5).with_velocity(Vec2::new(1.0, 1.0));
        let intent = Vec2::new(1.0, 1.0);
        body.step(1.0, intent, &world, &SlideResolver::default());

        // Reached the wall, lost the x component, kept moving up
        assert!((body.position.x - 0.5).abs() < EPSILON);
        assert!(body.position.y > 0.5);
        assert!(body.velocity.x.abs() < EPSILON);
        assert!(body.velocity.y > 0.0);
    }

    #[test]
    fn test_box_body_crosses_seam_between_floor_tiles() {
        let mut world = PhysicsWorld::new();
        // Two tiles with flush tops at y = 0, meeting at x = 2
        world.add_collider(StaticCollider::block(Vec2::new(0.0, -0.5), Vec2::new(2.0, 0.5)));
        world.add_collider(StaticCollider::block(Vec2::new(4.0, -0.5), Vec2::new(2.0, 0.5)));

        let mut body = KinematicBody::new_aabb(Vec2::new(0.0, 0.5), Vec2::new(0.5, 0.5));
        let resolver = SlideResolver::default();
        for _ in 0..10 {
            body.apply_movement(Vec2::X, 3.0);
            let result = body.step(0.25, Vec2::X, &world, &resolver);
            assert_eq!(result.slide_count, 0);
        }

        assert!(body.position.approx_eq(Vec2::new(7.5, 0.5), EPSILON));
        assert_eq!(body.velocity, Vec2::new(3.0, 0.0));
    }

    #[test]
    fn test_step_ignores_filtered_obstacles() {
        let mut world = PhysicsWorld::new();
        world.add_collider(
            StaticCollider::block(Vec2::new(2.0, 0.0), Vec2::new(1.0, 5.0))
                .with_filter(CollisionFilter::trigger(CollisionLayer::PLAYER)),
        );

        let mut body = KinematicBody::new_circle(Vec2::ZERO, 0.5).with_velocity(Vec2::new(4.0, 0.0));
        body.step(1.0, Vec2::X, &world, &SlideResolver::default());

        assert!(body.position.approx_eq(Vec2::new(4.0, 0.0), EPSILON));
    }
}
