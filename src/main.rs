//! slide2d - headless sweep-and-slide runner
//!
//! Loads a scene, spawns the player and walks it through the configured
//! number of fixed steps, logging how the slide resolver moved it.

use slide2d::config::AppConfig;
use slide2d::systems::SimulationSystem;
use slide2d_core::{Scene, SceneValidator};
use slide2d_physics::StopReason;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Config first so its log level can seed the logger; RUST_LOG still wins
    let config = AppConfig::load();
    let log_level = config
        .as_ref()
        .map(|c| c.debug.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = config.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    let scene = Scene::load(&config.scene.path)?;
    let problems = SceneValidator::validate(&scene);
    for problem in &problems {
        log::warn!("Scene '{}': {}", scene.name, problem);
    }
    if config.scene.strict && !problems.is_empty() {
        return Err(format!("scene '{}' failed validation", scene.name).into());
    }

    let mut simulation = SimulationSystem::from_config(&config, &scene);
    log::info!(
        "Loaded scene '{}' with {} obstacles, player at {:?}",
        scene.name,
        simulation.world().collider_count(),
        simulation.player().position
    );

    let mut blocked_ticks = 0;
    for _ in 0..config.simulation.ticks {
        let report = simulation.update();
        if report.slide_count > 0 || report.stop_reason == StopReason::BackwardIntent {
            blocked_ticks += 1;
        }
        if config.debug.log_ticks {
            log::info!(
                "tick {}: position {:?}, velocity {:?}, {} slides, {:?}",
                report.tick,
                report.position,
                report.velocity,
                report.slide_count,
                report.stop_reason
            );
        }
    }

    log::info!(
        "Ran {} ticks; player ended at {:?} after {} obstructed ticks",
        simulation.ticks(),
        simulation.player().position,
        blocked_ticks
    );
    Ok(())
}
