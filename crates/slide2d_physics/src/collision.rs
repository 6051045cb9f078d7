//! Sweep tests for 2D shapes
//!
//! Each test moves one shape along a unit direction for at most
//! `max_distance` and reports where it first touches a stationary obstacle.
//! Also provides collision filtering via layer masks.

use bitflags::bitflags;

use crate::shapes::{Circle2D, Collider, Plane2D, AABB2D};
use slide2d_math::Vec2;

/// Gap below which two shapes count as already touching
pub const CONTACT_SLOP: f32 = 1e-4;

bitflags! {
    /// Collision layers used by query providers to decide what a sweep can hit
    ///
    /// Each layer is a bit in a 32-bit mask. Colliders can belong to several layers.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct CollisionLayer: u32 {
        /// Default layer for most objects
        const DEFAULT = 1 << 0;
        /// Player-controlled bodies
        const PLAYER = 1 << 1;
        /// NPC bodies
        const ENEMY = 1 << 2;
        /// Static world geometry (floors, walls)
        const STATIC = 1 << 3;
        /// Trigger zones (reported by overlap logic, never block a sweep)
        const TRIGGER = 1 << 4;
        /// One-way or otherwise optional geometry
        const PLATFORM = 1 << 5;
        /// All layers
        const ALL = 0xFFFFFFFF;
    }
}

/// Layer/mask pair deciding whether a sweep and a collider interact
///
/// A sweep with filter A hits a collider with filter B only when
/// `A.layer & B.mask != 0` and `B.layer & A.mask != 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollisionFilter {
    /// Which layer(s) this object belongs to
    pub layer: CollisionLayer,
    /// Which layer(s) this object can collide with
    pub mask: CollisionLayer,
}

impl Default for CollisionFilter {
    fn default() -> Self {
        Self {
            layer: CollisionLayer::DEFAULT,
            mask: CollisionLayer::ALL,
        }
    }
}

impl CollisionFilter {
    pub fn new(layer: CollisionLayer, mask: CollisionLayer) -> Self {
        Self { layer, mask }
    }

    /// Check if both filters agree on a collision
    pub fn collides_with(&self, other: &Self) -> bool {
        self.layer.intersects(other.mask) && other.layer.intersects(self.mask)
    }

    /// Player bodies slide against everything except other players and triggers
    pub fn player() -> Self {
        Self {
            layer: CollisionLayer::PLAYER,
            mask: CollisionLayer::ALL & !CollisionLayer::PLAYER & !CollisionLayer::TRIGGER,
        }
    }

    /// Enemies ignore each other
    pub fn enemy() -> Self {
        Self {
            layer: CollisionLayer::ENEMY,
            mask: CollisionLayer::ALL & !CollisionLayer::ENEMY,
        }
    }

    /// Static geometry is hit by everything
    pub fn static_world() -> Self {
        Self {
            layer: CollisionLayer::STATIC,
            mask: CollisionLayer::ALL,
        }
    }

    /// Trigger zones only list what they detect; players never include them in their mask
    pub fn trigger(detects: CollisionLayer) -> Self {
        Self {
            layer: CollisionLayer::TRIGGER,
            mask: detects,
        }
    }

    /// Same layer, with `layers` removed from the mask
    pub fn excluding(mut self, layers: CollisionLayer) -> Self {
        self.mask &= !layers;
        self
    }
}

/// One obstruction found along a sweep
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepContact {
    /// Center of the moving shape at the moment it touches the obstacle
    pub contact_point: Vec2,
    /// Unit surface normal of the obstacle, pointing toward the moving shape
    pub normal: Vec2,
    /// Distance travelled along the sweep before contact
    pub travel_distance: f32,
}

impl SweepContact {
    pub fn new(contact_point: Vec2, normal: Vec2, travel_distance: f32) -> Self {
        Self {
            contact_point,
            normal,
            travel_distance,
        }
    }

    /// True if the shapes were already touching when the sweep started
    pub fn is_initial_overlap(&self) -> bool {
        self.travel_distance <= 0.0
    }
}

/// Sweep `moving` against `obstacle` along unit `direction`
///
/// Plane colliders cannot be swept, so a moving plane never reports contacts.
pub fn sweep_collider(
    moving: &Collider,
    obstacle: &Collider,
    direction: Vec2,
    max_distance: f32,
) -> Option<SweepContact> {
    match (moving, obstacle) {
        (Collider::Circle(c), Collider::Circle(o)) => sweep_circle_vs_circle(c, o, direction, max_distance),
        (Collider::Circle(c), Collider::AABB(o)) => sweep_circle_vs_aabb(c, o, direction, max_distance),
        (Collider::Circle(c), Collider::Plane(o)) => sweep_circle_vs_plane(c, o, direction, max_distance),
        (Collider::AABB(b), Collider::AABB(o)) => sweep_aabb_vs_aabb(b, o, direction, max_distance),
        (Collider::AABB(b), Collider::Circle(o)) => sweep_aabb_vs_circle(b, o, direction, max_distance),
        (Collider::AABB(b), Collider::Plane(o)) => sweep_aabb_vs_plane(b, o, direction, max_distance),
        (Collider::Plane(_), _) => None,
    }
}

/// Earliest hit of the ray `origin + direction * t` on a circle, for t >= 0
///
/// Returns `None` if the ray starts inside the circle or moves away from it.
fn ray_vs_circle(origin: Vec2, direction: Vec2, center: Vec2, radius: f32) -> Option<f32> {
    let m = origin - center;
    let b = m.dot(direction);
    let c = m.length_squared() - radius * radius;
    if c <= 0.0 || b >= 0.0 {
        return None;
    }
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    Some((-b - disc.sqrt()).max(0.0))
}

/// Sweep a circle against a static circle
pub fn sweep_circle_vs_circle(
    moving: &Circle2D,
    obstacle: &Circle2D,
    direction: Vec2,
    max_distance: f32,
) -> Option<SweepContact> {
    let combined = moving.radius + obstacle.radius;
    let offset = moving.center - obstacle.center;

    if offset.length() <= combined + CONTACT_SLOP {
        let normal = match offset.normalized() {
            n if n == Vec2::ZERO => -direction,
            n => n,
        };
        return Some(SweepContact::new(moving.center, normal, 0.0));
    }

    let t = ray_vs_circle(moving.center, direction, obstacle.center, combined)?;
    if t > max_distance {
        return None;
    }
    let point = moving.center + direction * t;
    Some(SweepContact::new(point, (point - obstacle.center).normalized(), t))
}

/// Escape normal for a point inside a box: the face with the shortest way out
fn shortest_escape_normal(aabb: &AABB2D, point: Vec2) -> Vec2 {
    let to_min = point - aabb.min;
    let to_max = aabb.max - point;

    let mut min_dist = to_min.x;
    let mut normal = -Vec2::X;
    if to_max.x < min_dist {
        min_dist = to_max.x;
        normal = Vec2::X;
    }
    if to_min.y < min_dist {
        min_dist = to_min.y;
        normal = -Vec2::Y;
    }
    if to_max.y < min_dist {
        normal = Vec2::Y;
    }
    normal
}

/// Sweep a circle against a static box
///
/// The box is inflated by the circle radius (a rounded rectangle) and the
/// circle center is traced against its four flat faces and four corner arcs.
pub fn sweep_circle_vs_aabb(
    moving: &Circle2D,
    obstacle: &AABB2D,
    direction: Vec2,
    max_distance: f32,
) -> Option<SweepContact> {
    let center = moving.center;
    let radius = moving.radius;

    let closest = obstacle.closest_point(center);
    let delta = center - closest;
    if delta.length() <= radius + CONTACT_SLOP {
        let normal = if obstacle.contains(center) {
            shortest_escape_normal(obstacle, center)
        } else {
            delta.normalized()
        };
        return Some(SweepContact::new(center, normal, 0.0));
    }

    let mut best: Option<(f32, Vec2)> = None;
    let mut consider = |t: f32, normal: Vec2| {
        if t <= max_distance && best.map_or(true, |(bt, _)| t < bt) {
            best = Some((t, normal));
        }
    };

    // Flat faces: (outward normal, face coordinate along that normal)
    let faces = [
        (Vec2::X, obstacle.max.x),
        (-Vec2::X, -obstacle.min.x),
        (Vec2::Y, obstacle.max.y),
        (-Vec2::Y, -obstacle.min.y),
    ];
    for (normal, face) in faces {
        let approach = direction.dot(normal);
        if approach >= 0.0 {
            continue;
        }
        let gap = center.dot(normal) - face - radius;
        if gap < 0.0 {
            continue;
        }
        let t = gap / -approach;
        let hit = center + direction * t;
        let within = if normal.x != 0.0 {
            hit.y >= obstacle.min.y && hit.y <= obstacle.max.y
        } else {
            hit.x >= obstacle.min.x && hit.x <= obstacle.max.x
        };
        if within {
            consider(t, normal);
        }
    }

    let corners = [
        obstacle.min,
        Vec2::new(obstacle.max.x, obstacle.min.y),
        obstacle.max,
        Vec2::new(obstacle.min.x, obstacle.max.y),
    ];
    for corner in corners {
        if let Some(t) = ray_vs_circle(center, direction, corner, radius) {
            let hit = center + direction * t;
            consider(t, (hit - corner).normalized());
        }
    }

    best.map(|(t, normal)| SweepContact::new(center + direction * t, normal, t))
}

/// Sweep a circle against a static half-plane
pub fn sweep_circle_vs_plane(
    moving: &Circle2D,
    obstacle: &Plane2D,
    direction: Vec2,
    max_distance: f32,
) -> Option<SweepContact> {
    sweep_extent_vs_plane(moving.center, moving.radius, obstacle, direction, max_distance)
}

/// Sweep a box against a static box
pub fn sweep_aabb_vs_aabb(
    moving: &AABB2D,
    obstacle: &AABB2D,
    direction: Vec2,
    max_distance: f32,
) -> Option<SweepContact> {
    let center = moving.center();
    let expanded = obstacle.expanded(moving.half_extents());
    let gap_x = (center.x - expanded.center().x).abs() - expanded.half_extents().x;
    let gap_y = (center.y - expanded.center().y).abs() - expanded.half_extents().y;

    if gap_x <= CONTACT_SLOP && gap_y <= CONTACT_SLOP {
        // Touching only at a corner: report the face the motion runs along,
        // so a box sliding over a seam between flush tiles isn't stopped
        let corner_only = gap_x >= -CONTACT_SLOP && gap_y >= -CONTACT_SLOP;
        let use_x = if corner_only {
            direction.x.abs() < direction.y.abs()
        } else {
            // Touching or overlapping: push out along the axis with the smallest overlap
            gap_x >= gap_y
        };
        let normal = if use_x {
            if center.x < obstacle.center().x { -Vec2::X } else { Vec2::X }
        } else if center.y < obstacle.center().y {
            -Vec2::Y
        } else {
            Vec2::Y
        };
        return Some(SweepContact::new(center, normal, 0.0));
    }

    // Slab test of the center ray against the inflated box
    let mut t_enter = 0.0_f32;
    let mut t_exit = f32::INFINITY;
    let mut normal = Vec2::ZERO;

    for axis in 0..2 {
        let (origin, dir, lo, hi, unit) = if axis == 0 {
            (center.x, direction.x, expanded.min.x, expanded.max.x, Vec2::X)
        } else {
            (center.y, direction.y, expanded.min.y, expanded.max.y, Vec2::Y)
        };

        if dir.abs() < f32::EPSILON {
            // On the slab boundary the boxes would only share an edge
            if origin <= lo + CONTACT_SLOP || origin >= hi - CONTACT_SLOP {
                return None;
            }
            continue;
        }

        let inv = 1.0 / dir;
        let mut t0 = (lo - origin) * inv;
        let mut t1 = (hi - origin) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        if t0 > t_enter {
            t_enter = t0;
            normal = if dir > 0.0 { -unit } else { unit };
        }
        t_exit = t_exit.min(t1);
        if t_enter > t_exit {
            return None;
        }
    }

    if normal == Vec2::ZERO || t_enter > max_distance {
        return None;
    }
    Some(SweepContact::new(center + direction * t_enter, normal, t_enter))
}

/// Sweep a box against a static circle
///
/// Solved as the circle sweeping backwards into the box; the normal is
/// flipped so it still points from the obstacle toward the mover.
pub fn sweep_aabb_vs_circle(
    moving: &AABB2D,
    obstacle: &Circle2D,
    direction: Vec2,
    max_distance: f32,
) -> Option<SweepContact> {
    let mirrored = sweep_circle_vs_aabb(obstacle, moving, -direction, max_distance)?;
    let t = mirrored.travel_distance;
    Some(SweepContact::new(moving.center() + direction * t, -mirrored.normal, t))
}

/// Sweep a box against a static half-plane
pub fn sweep_aabb_vs_plane(
    moving: &AABB2D,
    obstacle: &Plane2D,
    direction: Vec2,
    max_distance: f32,
) -> Option<SweepContact> {
    // Projected half-size of the box onto the line normal
    let reach = moving.half_extents().dot(obstacle.normal.abs());
    sweep_extent_vs_plane(moving.center(), reach, obstacle, direction, max_distance)
}

fn sweep_extent_vs_plane(
    center: Vec2,
    reach: f32,
    plane: &Plane2D,
    direction: Vec2,
    max_distance: f32,
) -> Option<SweepContact> {
    let gap = plane.signed_distance(center) - reach;
    if gap <= CONTACT_SLOP {
        return Some(SweepContact::new(center, plane.normal, 0.0));
    }

    let approach = direction.dot(plane.normal);
    if approach >= 0.0 {
        return None;
    }
    let t = gap / -approach;
    if t > max_distance {
        return None;
    }
    Some(SweepContact::new(center + direction * t, plane.normal, t))
}
