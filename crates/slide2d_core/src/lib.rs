//! Scene layer for slide2d
//!
//! Scenes describe the static obstacles of a level and where the player
//! starts. They are stored as RON and turned into a [`PhysicsWorld`] plus a
//! [`KinematicBody`] ready for the slide resolver.
//!
//! - [`ShapeTemplate`] - Serializable collider description
//! - [`ObstacleTemplate`] - A named obstacle on a collision layer
//! - [`BodyTemplate`] - The player's collision shape
//! - [`Scene`] - Loadable/saveable scene
//! - [`SceneValidator`] - Static checks run before a scene is used

mod shapes;
mod scene;
mod scene_validator;

pub use shapes::ShapeTemplate;
pub use scene::{BodyTemplate, ObstacleLayer, ObstacleTemplate, Scene, SceneLoadError, SceneSaveError};
pub use scene_validator::{SceneValidator, ValidationError};

pub use slide2d_math::Vec2;
pub use slide2d_physics::{Collider, KinematicBody, PhysicsWorld, StaticCollider};
