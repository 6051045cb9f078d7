//! Collision shapes for 2D physics
//!
//! These are lightweight primitives used by the sweep tests and the
//! brute-force query world.

use slide2d_math::Vec2;

/// A 2D circle defined by center and radius
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle2D {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle2D {
    /// Create a new circle at the given center with the given radius
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// A 2D axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AABB2D {
    /// Minimum corner
    pub min: Vec2,
    /// Maximum corner
    pub max: Vec2,
}

impl AABB2D {
    /// Create a new AABB from min and max corners
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Create an AABB centered at a position with given half-extents
    pub fn from_center_half_extents(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Create a unit square centered at the origin
    pub fn unit() -> Self {
        Self::from_center_half_extents(Vec2::ZERO, Vec2::new(0.5, 0.5))
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Get the half-extents (half the size in each dimension)
    pub fn half_extents(&self) -> Vec2 {
        (self.max - self.min) * 0.5
    }

    /// Check if a point is inside or on the AABB
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    /// Get the closest point inside or on the AABB to a given point
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        point.clamp_components(self.min, self.max)
    }

    /// Grow the box by `amount` on every side
    pub fn expanded(&self, amount: Vec2) -> Self {
        Self {
            min: self.min - amount,
            max: self.max + amount,
        }
    }

    /// Translate the AABB by a delta
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }
}

/// A 2D infinite line acting as the boundary of a solid half-plane
///
/// The line equation is: normal · point = distance.
/// Points with normal · point > distance are in front of the line (free space);
/// everything behind it is solid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane2D {
    /// Unit normal vector pointing into free space
    pub normal: Vec2,
    /// Signed distance from origin along the normal
    pub distance: f32,
}

impl Plane2D {
    /// Create a new plane from a normal and distance
    ///
    /// The normal will be normalized automatically.
    pub fn new(normal: Vec2, distance: f32) -> Self {
        Self {
            normal: normal.normalized(),
            distance,
        }
    }

    /// Create a plane from a point on the line and a normal
    pub fn from_point_normal(point: Vec2, normal: Vec2) -> Self {
        let n = normal.normalized();
        Self {
            normal: n,
            distance: n.dot(point),
        }
    }

    /// Create a horizontal floor line at the given Y height
    pub fn floor(y: f32) -> Self {
        Self::from_point_normal(Vec2::new(0.0, y), Vec2::Y)
    }

    /// Calculate the signed distance from a point to the line
    ///
    /// Positive = in front (on normal side), negative = behind
    pub fn signed_distance(&self, point: Vec2) -> f32 {
        self.normal.dot(point) - self.distance
    }
}

/// Collider enum for storing different collision shape types
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Collider {
    Circle(Circle2D),
    AABB(AABB2D),
    Plane(Plane2D),
}

impl Collider {
    /// Create a circle collider
    pub fn circle(center: Vec2, radius: f32) -> Self {
        Collider::Circle(Circle2D::new(center, radius))
    }

    /// Create a box collider from center and half-extents
    pub fn aabb(center: Vec2, half_extents: Vec2) -> Self {
        Collider::AABB(AABB2D::from_center_half_extents(center, half_extents))
    }

    /// Create a plane collider from a point on the line and its normal
    pub fn plane(point: Vec2, normal: Vec2) -> Self {
        Collider::Plane(Plane2D::from_point_normal(point, normal))
    }

    /// Get the center of the collider
    ///
    /// For planes, returns the point on the line closest to the origin.
    pub fn center(&self) -> Vec2 {
        match self {
            Collider::Circle(c) => c.center,
            Collider::AABB(b) => b.center(),
            Collider::Plane(p) => p.normal * p.distance,
        }
    }

    /// Translate the collider by a delta
    ///
    /// For planes, this adjusts the distance from origin.
    pub fn translated(&self, delta: Vec2) -> Self {
        match self {
            Collider::Circle(c) => Collider::Circle(Circle2D::new(c.center + delta, c.radius)),
            Collider::AABB(b) => Collider::AABB(b.translated(delta)),
            Collider::Plane(p) => {
                // Moving a line by delta changes its distance by normal · delta
                Collider::Plane(Plane2D::new(p.normal, p.distance + p.normal.dot(delta)))
            }
        }
    }

    /// Move the collider so its center sits at `center`
    pub fn with_center(&self, center: Vec2) -> Self {
        self.translated(center - self.center())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_from_center_half_extents() {
        let aabb = AABB2D::from_center_half_extents(Vec2::new(1.0, 2.0), Vec2::new(0.5, 1.0));
        assert_eq!(aabb.min, Vec2::new(0.5, 1.0));
        assert_eq!(aabb.max, Vec2::new(1.5, 3.0));
        assert_eq!(aabb.center(), Vec2::new(1.0, 2.0));
        assert_eq!(aabb.half_extents(), Vec2::new(0.5, 1.0));
    }

    #[test]
    fn test_aabb_contains_and_closest_point() {
        let aabb = AABB2D::new(Vec2::ZERO, Vec2::new(1.0, 1.0));
        assert!(aabb.contains(Vec2::new(0.5, 0.5)));
        assert!(aabb.contains(Vec2::ZERO)); // corner
        assert!(!aabb.contains(Vec2::new(-0.1, 0.5)));
        assert_eq!(aabb.closest_point(Vec2::new(2.0, 0.5)), Vec2::new(1.0, 0.5));
    }

    #[test]
    fn test_aabb_expanded() {
        let grown = AABB2D::unit().expanded(Vec2::new(0.5, 1.0));
        assert_eq!(grown.min, Vec2::new(-1.0, -1.5));
        assert_eq!(grown.max, Vec2::new(1.0, 1.5));
    }

    #[test]
    fn test_plane_signed_distance() {
        let floor = Plane2D::floor(0.0);
        assert!(floor.signed_distance(Vec2::ZERO).abs() < 0.0001);
        assert!((floor.signed_distance(Vec2::new(3.0, 1.0)) - 1.0).abs() < 0.0001);
        assert!((floor.signed_distance(Vec2::new(0.0, -1.0)) + 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_collider_with_center() {
        let circle = Collider::circle(Vec2::new(1.0, 1.0), 0.5);
        assert_eq!(circle.with_center(Vec2::new(4.0, -2.0)).center(), Vec2::new(4.0, -2.0));

        let aabb = Collider::aabb(Vec2::ZERO, Vec2::new(1.0, 2.0));
        match aabb.with_center(Vec2::new(3.0, 3.0)) {
            Collider::AABB(b) => {
                assert_eq!(b.min, Vec2::new(2.0, 1.0));
                assert_eq!(b.max, Vec2::new(4.0, 5.0));
            }
            other => panic!("Expected AABB, got {:?}", other),
        }
    }

    #[test]
    fn test_plane_translated() {
        let floor = Collider::Plane(Plane2D::floor(0.0));
        match floor.translated(Vec2::new(5.0, 2.0)) {
            Collider::Plane(p) => assert!((p.distance - 2.0).abs() < 0.0001),
            other => panic!("Expected plane, got {:?}", other),
        }
    }
}
