//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`S2D_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use slide2d_core::{BodyTemplate, ShapeTemplate};
use slide2d_physics::SlideConfig;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Fixed-step loop configuration
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Slide resolver thresholds
    #[serde(default)]
    pub slide: SlideSettings,
    /// Player defaults used when the scene doesn't describe the player
    #[serde(default)]
    pub player: PlayerConfig,
    /// Scene selection
    #[serde(default)]
    pub scene: SceneConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`S2D_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // S2D_SLIDE__MAX_SLIDES=4 -> slide.max_slides = 4
        figment = figment.merge(Env::prefixed("S2D_").split("__"));

        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would leave the simulation unable to move
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slide.max_slides == 0 {
            return Err(ConfigError::invalid("slide.max_slides must be at least 1"));
        }
        if !(self.simulation.timestep.is_finite() && self.simulation.timestep > 0.0) {
            return Err(ConfigError::invalid("simulation.timestep must be positive"));
        }
        Ok(())
    }
}

/// Fixed-step loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seconds per tick
    pub timestep: f32,
    /// Number of ticks the headless runner executes
    pub ticks: u32,
    /// Player move speed (units per second)
    pub move_speed: f32,
    /// Direction the player is pushing [x, y]; need not be normalized
    pub intended_direction: [f32; 2],
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            timestep: 1.0 / 60.0,
            ticks: 600,
            move_speed: 3.0,
            intended_direction: [1.0, 0.0],
        }
    }
}

/// Slide resolver thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SlideSettings {
    /// Slides per step before the body is stopped outright
    pub max_slides: u32,
    /// Travel budget below which the step is over
    pub min_distance: f32,
    /// Speed below which the body is considered stalled
    pub min_speed: f32,
    /// Contacts with `dot(velocity, normal)` below this oppose the motion
    pub opposing_dot: f32,
    /// Final speeds below this snap to zero
    pub velocity_snap: f32,
    /// Velocities with `dot(intent, velocity)` below this are vetoed
    pub backward_dot: f32,
}

impl Default for SlideSettings {
    fn default() -> Self {
        let defaults = SlideConfig::default();
        Self {
            max_slides: defaults.max_slides,
            min_distance: defaults.min_distance,
            min_speed: defaults.min_speed,
            opposing_dot: defaults.opposing_dot,
            velocity_snap: defaults.velocity_snap,
            backward_dot: defaults.backward_dot,
        }
    }
}

impl SlideSettings {
    /// Convert to the resolver's config type
    pub fn to_slide_config(&self) -> SlideConfig {
        SlideConfig {
            max_slides: self.max_slides,
            min_distance: self.min_distance,
            min_speed: self.min_speed,
            opposing_dot: self.opposing_dot,
            velocity_snap: self.velocity_snap,
            backward_dot: self.backward_dot,
        }
    }
}

/// Player defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Collision radius used when the scene has no player shape
    pub radius: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self { radius: 0.5 }
    }
}

impl PlayerConfig {
    /// Body template for scenes that don't describe the player
    pub fn body_template(&self) -> BodyTemplate {
        BodyTemplate {
            shape: ShapeTemplate::circle([0.0, 0.0], self.radius),
        }
    }
}

/// Scene configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Path to the RON scene file
    pub path: String,
    /// Refuse to run scenes that fail validation
    pub strict: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            path: "scenes/corridor.ron".to_string(),
            strict: false,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Log every tick instead of only the summary
    pub log_ticks: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_ticks: false,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    fn invalid(message: &str) -> Self {
        ConfigError {
            message: message.to_string(),
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
