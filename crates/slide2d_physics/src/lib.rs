//! 2D sweep-and-slide physics for slide2d
//!
//! This crate resolves how a moving 2D body slides along the obstacles it
//! runs into during one simulation step:
//! - Collision shapes (circles, AABBs, planes)
//! - Sweep tests between shapes, with layer/mask filtering
//! - The [`ShapeQuery`] seam between the resolver and a geometry backend
//! - A brute-force [`PhysicsWorld`] implementing that seam
//! - The sweep-and-slide resolver and a kinematic body driving it

pub mod body;
pub mod collision;
pub mod query;
pub mod shapes;
pub mod slide;
pub mod world;

// Re-export commonly used types
pub use body::{ColliderKey, KinematicBody, StaticCollider};
pub use collision::{sweep_collider, CollisionFilter, CollisionLayer, SweepContact};
pub use query::{NoObstacles, ShapeQuery};
pub use shapes::{Circle2D, Collider, Plane2D, AABB2D};
pub use slide::{resolve, MotionState, SlideConfig, SlideResolver, SlideResult, SlideStep, StopReason};
pub use world::{FilteredQuery, PhysicsWorld};
