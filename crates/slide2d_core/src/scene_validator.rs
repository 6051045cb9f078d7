//! Scene validation
//!
//! Validates scenes for common errors before a world is built from them. The
//! [`SceneValidator`] checks for empty scenes, duplicate obstacle names,
//! degenerate shapes, and extreme spawn positions.

use std::collections::HashSet;

use crate::scene::Scene;

/// Spawn coordinates beyond this magnitude are almost certainly typos
const MAX_SPAWN_COORDINATE: f32 = 10000.0;

/// Validation error found in a scene
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Scene has no obstacles
    EmptyScene,
    /// Duplicate obstacle name found
    DuplicateName(String),
    /// Obstacle shape can't produce a collider; holds the obstacle's label and the reason
    InvalidShape(String, &'static str),
    /// Player shape can't produce a collider
    InvalidPlayerShape(&'static str),
    /// Player spawn is at extreme or non-finite coordinates
    ExtremeSpawnPosition([f32; 2]),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyScene => write!(f, "Scene has no obstacles"),
            ValidationError::DuplicateName(name) => {
                write!(f, "Duplicate obstacle name: '{}'", name)
            }
            ValidationError::InvalidShape(label, reason) => {
                write!(f, "Obstacle '{}' has an invalid shape: {}", label, reason)
            }
            ValidationError::InvalidPlayerShape(reason) => {
                write!(f, "Player has an invalid shape: {}", reason)
            }
            ValidationError::ExtremeSpawnPosition(pos) => {
                write!(f, "Extreme spawn position: [{}, {}]", pos[0], pos[1])
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Scene validator that checks for common errors
///
/// # Example
/// ```ignore
/// let errors = SceneValidator::validate(&scene);
/// for error in &errors {
///     log::warn!("Validation error: {}", error);
/// }
/// ```
pub struct SceneValidator;

impl SceneValidator {
    /// Validate a scene, returning all errors found
    ///
    /// Returns an empty vector if no validation errors are detected.
    pub fn validate(scene: &Scene) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if scene.obstacles.is_empty() {
            errors.push(ValidationError::EmptyScene);
        }

        let mut seen_names = HashSet::new();
        for (index, obstacle) in scene.obstacles.iter().enumerate() {
            if let Some(ref name) = obstacle.name {
                if !seen_names.insert(name.as_str()) {
                    errors.push(ValidationError::DuplicateName(name.clone()));
                }
            }

            if let Some(reason) = obstacle.shape.defect() {
                let label = obstacle.name.clone().unwrap_or_else(|| format!("#{}", index));
                errors.push(ValidationError::InvalidShape(label, reason));
            }
        }

        if let Some(reason) = scene.player.as_ref().and_then(|p| p.shape.defect()) {
            errors.push(ValidationError::InvalidPlayerShape(reason));
        }

        if let Some(spawn) = scene.player_spawn {
            let is_extreme = spawn.iter().any(|c| !c.is_finite() || c.abs() > MAX_SPAWN_COORDINATE);
            if is_extreme {
                errors.push(ValidationError::ExtremeSpawnPosition(spawn));
            }
        }

        errors
    }

    /// Validate and return Result (Ok if no errors, Err with all errors)
    pub fn validate_or_error(scene: &Scene) -> Result<(), Vec<ValidationError>> {
        let errors = Self::validate(scene);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
