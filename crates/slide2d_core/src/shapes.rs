//! Serializable shape templates
//!
//! ShapeTemplate is the on-disk form of a [`Collider`]. Positions are stored
//! as plain `[x, y]` arrays so scene files stay readable.
//!
//! Obstacle shapes are placed in **world space**. A body's shape is
//! re-centered on the body's position, so its `center` is ignored.

use serde::{Deserialize, Serialize};
use slide2d_math::Vec2;
use slide2d_physics::Collider;

/// Serializable collider template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ShapeTemplate {
    /// A disc
    Circle {
        #[serde(default)]
        center: [f32; 2],
        radius: f32,
    },
    /// An axis-aligned box
    Box {
        #[serde(default)]
        center: [f32; 2],
        /// Half the width and half the height
        half_extents: [f32; 2],
    },
    /// An infinite boundary line with free space on the `normal` side
    Plane {
        point: [f32; 2],
        normal: [f32; 2],
    },
}

impl ShapeTemplate {
    pub fn circle(center: [f32; 2], radius: f32) -> Self {
        ShapeTemplate::Circle { center, radius }
    }

    pub fn rect(center: [f32; 2], half_extents: [f32; 2]) -> Self {
        ShapeTemplate::Box { center, half_extents }
    }

    pub fn plane(point: [f32; 2], normal: [f32; 2]) -> Self {
        ShapeTemplate::Plane { point, normal }
    }

    /// Build the collider this template describes
    pub fn create_collider(&self) -> Collider {
        match self {
            ShapeTemplate::Circle { center, radius } => Collider::circle(Vec2::from(*center), *radius),
            ShapeTemplate::Box { center, half_extents } => {
                Collider::aabb(Vec2::from(*center), Vec2::from(*half_extents))
            }
            ShapeTemplate::Plane { point, normal } => {
                Collider::plane(Vec2::from(*point), Vec2::from(*normal))
            }
        }
    }

    /// Why this template cannot produce a usable collider, if it can't
    pub fn defect(&self) -> Option<&'static str> {
        let finite = |v: &[f32; 2]| v.iter().all(|c| c.is_finite());
        match self {
            ShapeTemplate::Circle { center, radius } => {
                if !finite(center) || !radius.is_finite() {
                    Some("non-finite value")
                } else if *radius <= 0.0 {
                    Some("radius must be positive")
                } else {
                    None
                }
            }
            ShapeTemplate::Box { center, half_extents } => {
                if !finite(center) || !finite(half_extents) {
                    Some("non-finite value")
                } else if half_extents.iter().any(|h| *h <= 0.0) {
                    Some("half extents must be positive")
                } else {
                    None
                }
            }
            ShapeTemplate::Plane { point, normal } => {
                if !finite(point) || !finite(normal) {
                    Some("non-finite value")
                } else if Vec2::from(*normal).normalized() == Vec2::ZERO {
                    Some("normal must be non-zero")
                } else {
                    None
                }
            }
        }
    }
}
