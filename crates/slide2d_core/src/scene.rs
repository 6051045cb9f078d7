//! Scene serialization
//!
//! Provides Scene struct for loading/saving scenes from RON files.
//! Scenes contain obstacle templates, the player's shape, and a spawn point.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

use crate::shapes::ShapeTemplate;
use slide2d_math::Vec2;
use slide2d_physics::{CollisionFilter, CollisionLayer, KinematicBody, PhysicsWorld, StaticCollider};

/// Collision layer an obstacle lives on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleLayer {
    /// Walls and floors; blocks everything
    #[default]
    Static,
    /// One-way or droppable geometry; bodies may exclude it
    Platform,
    /// Only reports to players, never blocks them
    Trigger,
}

impl ObstacleLayer {
    pub fn filter(self) -> CollisionFilter {
        match self {
            ObstacleLayer::Static => CollisionFilter::static_world(),
            ObstacleLayer::Platform => CollisionFilter::new(CollisionLayer::PLATFORM, CollisionLayer::ALL),
            ObstacleLayer::Trigger => CollisionFilter::trigger(CollisionLayer::PLAYER),
        }
    }
}

/// A static obstacle in a scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleTemplate {
    #[serde(default)]
    pub name: Option<String>,
    pub shape: ShapeTemplate,
    #[serde(default)]
    pub layer: ObstacleLayer,
}

impl ObstacleTemplate {
    pub fn new(shape: ShapeTemplate) -> Self {
        Self {
            name: None,
            shape,
            layer: ObstacleLayer::Static,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_layer(mut self, layer: ObstacleLayer) -> Self {
        self.layer = layer;
        self
    }

    pub fn to_static_collider(&self) -> StaticCollider {
        StaticCollider::new(self.shape.create_collider()).with_filter(self.layer.filter())
    }
}

/// The player's collision shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyTemplate {
    pub shape: ShapeTemplate,
}

impl BodyTemplate {
    /// Create a resting body at `position`
    pub fn spawn(&self, position: Vec2) -> KinematicBody {
        KinematicBody {
            position,
            velocity: Vec2::ZERO,
            shape: self.shape.create_collider().with_center(position),
            filter: CollisionFilter::player(),
        }
    }
}

/// A serializable scene
///
/// Scenes are loaded from RON files and contain everything needed to set up
/// a slide simulation: the static obstacles and the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Scene name (for display/debugging)
    pub name: String,
    /// Static obstacles
    #[serde(default)]
    pub obstacles: Vec<ObstacleTemplate>,
    /// Player spawn position [x, y]
    #[serde(default)]
    pub player_spawn: Option<[f32; 2]>,
    /// Player shape; callers fall back to their own default when absent
    #[serde(default)]
    pub player: Option<BodyTemplate>,
}

impl Scene {
    /// Create a new empty scene
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            obstacles: Vec::new(),
            player_spawn: None,
            player: None,
        }
    }

    /// Load a scene from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SceneLoadError> {
        let contents = fs::read_to_string(path)?;
        let scene = ron::from_str(&contents)?;
        Ok(scene)
    }

    /// Save a scene to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SceneSaveError> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(true)
            .enumerate_arrays(false);
        let contents = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, contents)?;
        Ok(())
    }

    pub fn add_obstacle(&mut self, obstacle: ObstacleTemplate) {
        self.obstacles.push(obstacle);
    }

    /// Set the player spawn position
    pub fn with_player_spawn(mut self, x: f32, y: f32) -> Self {
        self.player_spawn = Some([x, y]);
        self
    }

    pub fn with_player(mut self, shape: ShapeTemplate) -> Self {
        self.player = Some(BodyTemplate { shape });
        self
    }

    /// Spawn position, or the origin when the scene doesn't name one
    pub fn spawn_position(&self) -> Vec2 {
        self.player_spawn.map(Vec2::from).unwrap_or(Vec2::ZERO)
    }

    /// Build a physics world holding every obstacle
    pub fn build_world(&self) -> PhysicsWorld {
        let mut world = PhysicsWorld::new();
        for obstacle in &self.obstacles {
            world.add_collider(obstacle.to_static_collider());
        }
        log::debug!(
            "Built world for scene '{}' with {} obstacles",
            self.name,
            world.collider_count()
        );
        world
    }

    /// Spawn the player described by this scene
    ///
    /// Uses `fallback` for the shape when the scene has no player template.
    pub fn spawn_player(&self, fallback: &BodyTemplate) -> KinematicBody {
        self.player.as_ref().unwrap_or(fallback).spawn(self.spawn_position())
    }
}

/// Error loading a scene
#[derive(Debug)]
pub enum SceneLoadError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax)
    Parse(ron::error::SpannedError),
}

impl From<io::Error> for SceneLoadError {
    fn from(e: io::Error) -> Self {
        SceneLoadError::Io(e)
    }
}

impl From<ron::error::SpannedError> for SceneLoadError {
    fn from(e: ron::error::SpannedError) -> Self {
        SceneLoadError::Parse(e)
    }
}

impl std::fmt::Display for SceneLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneLoadError::Io(e) => write!(f, "IO error: {}", e),
            SceneLoadError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for SceneLoadError {}

/// Error saving a scene
#[derive(Debug)]
pub enum SceneSaveError {
    /// IO error (permission denied, disk full, etc.)
    Io(io::Error),
    /// Serialization error
    Serialize(ron::Error),
}

impl From<io::Error> for SceneSaveError {
    fn from(e: io::Error) -> Self {
        SceneSaveError::Io(e)
    }
}

impl From<ron::Error> for SceneSaveError {
    fn from(e: ron::Error) -> Self {
        SceneSaveError::Serialize(e)
    }
}

impl std::fmt::Display for SceneSaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneSaveError::Io(e) => write!(f, "IO error: {}", e),
            SceneSaveError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for SceneSaveError {}
