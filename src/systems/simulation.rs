//! Fixed-step simulation system
//!
//! Each tick turns the player's intent into a velocity, resolves it against
//! the scene's obstacles, and reports where the body ended up.

use slide2d_core::Scene;
use slide2d_math::Vec2;
use slide2d_physics::{KinematicBody, PhysicsWorld, SlideResolver, StopReason};

use crate::config::AppConfig;

/// What happened to the player during one tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickReport {
    /// Tick number, starting at 1
    pub tick: u64,
    pub position: Vec2,
    pub velocity: Vec2,
    pub slide_count: u32,
    pub stop_reason: StopReason,
}

/// Drives one kinematic body through a static world at a fixed timestep
pub struct SimulationSystem {
    world: PhysicsWorld,
    player: KinematicBody,
    resolver: SlideResolver,
    timestep: f32,
    move_speed: f32,
    intended_direction: Vec2,
    tick: u64,
}

impl SimulationSystem {
    /// Create a system with the player standing still
    pub fn new(world: PhysicsWorld, player: KinematicBody, resolver: SlideResolver, timestep: f32) -> Self {
        Self {
            world,
            player,
            resolver,
            timestep,
            move_speed: 0.0,
            intended_direction: Vec2::ZERO,
            tick: 0,
        }
    }

    /// Build the world and player from `scene`, tuned by `config`
    pub fn from_config(config: &AppConfig, scene: &Scene) -> Self {
        let world = scene.build_world();
        let player = scene.spawn_player(&config.player.body_template());
        let resolver = SlideResolver::new(config.slide.to_slide_config());

        Self::new(world, player, resolver, config.simulation.timestep).with_movement(
            Vec2::from(config.simulation.intended_direction),
            config.simulation.move_speed,
        )
    }

    /// Set the direction the player pushes and how fast
    pub fn with_movement(mut self, direction: Vec2, speed: f32) -> Self {
        self.set_movement(direction, speed);
        self
    }

    pub fn set_movement(&mut self, direction: Vec2, speed: f32) {
        self.intended_direction = direction;
        self.move_speed = speed;
    }

    pub fn player(&self) -> &KinematicBody {
        &self.player
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    /// Number of ticks run so far
    pub fn ticks(&self) -> u64 {
        self.tick
    }

    /// Run one tick
    pub fn update(&mut self) -> TickReport {
        self.tick += 1;
        self.player.apply_movement(self.intended_direction, self.move_speed);
        let result = self.player.step(self.timestep, self.intended_direction, &self.world, &self.resolver);

        TickReport {
            tick: self.tick,
            position: self.player.position,
            velocity: self.player.velocity,
            slide_count: result.slide_count,
            stop_reason: result.stop_reason,
        }
    }

    /// Run `ticks` ticks and collect their reports
    pub fn run(&mut self, ticks: u32) -> Vec<TickReport> {
        (0..ticks).map(|_| self.update()).collect()
    }
}
