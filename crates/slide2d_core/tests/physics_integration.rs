//! Integration tests for the scene-to-physics pipeline
//!
//! These tests verify that scenes build worlds the slide resolver can move
//! bodies through:
//! 1. Obstacles land in the world on the right collision layers
//! 2. Spawned bodies, round and boxy, stop at walls and slide along floors
//! 3. Scenes survive a trip through a RON file on disk

use slide2d_core::{
    BodyTemplate, ObstacleLayer, ObstacleTemplate, Scene, SceneValidator, ShapeTemplate,
};
use slide2d_math::Vec2;
use slide2d_physics::{CollisionFilter, CollisionLayer, SlideResolver, StopReason};
use std::path::PathBuf;

const EPSILON: f32 = 0.0001;

/// Floor along y = 0 and a wall whose left face is at x = 2.5
fn hallway() -> Scene {
    let mut scene = Scene::new("Hallway")
        .with_player_spawn(0.0, 0.5)
        .with_player(ShapeTemplate::circle([0.0, 0.0], 0.5));
    scene.add_obstacle(
        ObstacleTemplate::new(ShapeTemplate::plane([0.0, 0.0], [0.0, 1.0])).with_name("floor"),
    );
    scene.add_obstacle(
        ObstacleTemplate::new(ShapeTemplate::rect([3.0, 2.0], [0.5, 2.0])).with_name("wall"),
    );
    scene
}

fn fallback_body() -> BodyTemplate {
    BodyTemplate { shape: ShapeTemplate::circle([0.0, 0.0], 0.25) }
}

// ==================== Scene to World ====================

#[test]
fn test_scene_builds_world_with_all_obstacles() {
    let scene = hallway();
    assert!(SceneValidator::validate_or_error(&scene).is_ok());

    let world = scene.build_world();
    assert_eq!(world.collider_count(), 2);
    assert!(world
        .colliders()
        .all(|(_, collider)| collider.filter == CollisionFilter::static_world()));
}

#[test]
fn test_spawned_player_rests_on_floor() {
    let scene = hallway();
    let body = scene.spawn_player(&fallback_body());

    assert_eq!(body.position, Vec2::new(0.0, 0.5));
    assert_eq!(body.collider().center(), Vec2::new(0.0, 0.5));
}

// ==================== Movement ====================

#[test]
fn test_walk_into_wall_stops_flush() {
    let scene = hallway();
    let world = scene.build_world();
    let mut body = scene.spawn_player(&fallback_body()).with_velocity(Vec2::new(4.0, 0.0));

    // The floor contact is parallel to the motion and is skipped for the wall
    let result = body.step(1.0, Vec2::X, &world, &SlideResolver::default());

    assert_eq!(result.slide_count, 1);
    assert_eq!(result.stop_reason, StopReason::BudgetExhausted);
    assert!(body.position.approx_eq(Vec2::new(2.0, 0.5), EPSILON));
    assert_eq!(body.velocity, Vec2::ZERO);
}

#[test]
fn test_diagonal_into_floor_slides_along_it() {
    let scene = hallway();
    let world = scene.build_world();
    let mut body = scene.spawn_player(&fallback_body()).with_velocity(Vec2::new(1.0, -1.0));

    let result = body.step(1.0, Vec2::new(1.0, -1.0), &world, &SlideResolver::default());

    // The downward component is removed and the step ends running along the floor
    assert_eq!(result.slide_count, 1);
    assert_eq!(result.stop_reason, StopReason::Grazing);
    assert!(body.velocity.approx_eq(Vec2::new(1.0, 0.0), EPSILON));
    assert!(body.position.approx_eq(Vec2::new(1.0, 0.5), EPSILON));
}

#[test]
fn test_momentum_against_intent_is_vetoed() {
    let scene = hallway();
    let world = scene.build_world();
    let mut body = scene.spawn_player(&fallback_body()).with_velocity(Vec2::new(1.0, 0.0));

    // Momentum carries the body right while the player is pushing left
    let result = body.step(1.0, -Vec2::X, &world, &SlideResolver::default());

    assert_eq!(result.stop_reason, StopReason::BackwardIntent);
    assert_eq!(body.velocity, Vec2::ZERO);
    assert_eq!(body.position, Vec2::new(0.0, 0.5));
}

// ==================== Box Bodies ====================

fn box_body() -> BodyTemplate {
    BodyTemplate { shape: ShapeTemplate::rect([0.0, 0.0], [0.5, 0.5]) }
}

#[test]
fn test_box_diagonal_into_floor_slides_along_it() {
    let scene = hallway();
    let world = scene.build_world();
    let mut body = box_body().spawn(scene.spawn_position()).with_velocity(Vec2::new(1.0, -1.0));

    let result = body.step(1.0, Vec2::new(1.0, -1.0), &world, &SlideResolver::default());

    assert_eq!(result.slide_count, 1);
    assert_eq!(result.stop_reason, StopReason::Grazing);
    assert!(body.velocity.approx_eq(Vec2::new(1.0, 0.0), EPSILON));
    assert!(body.position.approx_eq(Vec2::new(1.0, 0.5), EPSILON));
}

#[test]
fn test_box_walks_across_tile_seam() {
    let mut scene = Scene::new("Tiles")
        .with_player_spawn(0.0, 0.5)
        .with_player(ShapeTemplate::rect([0.0, 0.0], [0.5, 0.5]));
    scene.add_obstacle(ObstacleTemplate::new(ShapeTemplate::rect([0.0, -0.5], [2.0, 0.5])).with_name("tile_a"));
    scene.add_obstacle(ObstacleTemplate::new(ShapeTemplate::rect([4.0, -0.5], [2.0, 0.5])).with_name("tile_b"));
    let world = scene.build_world();
    let resolver = SlideResolver::default();

    let mut body = scene.spawn_player(&fallback_body());
    for _ in 0..10 {
        body.apply_movement(Vec2::X, 3.0);
        body.step(0.25, Vec2::X, &world, &resolver);
    }

    assert!(body.position.approx_eq(Vec2::new(7.5, 0.5), EPSILON));
}

#[test]
fn test_box_oblique_into_wall_slides_up_it() {
    let scene = hallway();
    let world = scene.build_world();
    let mut body = box_body().spawn(scene.spawn_position()).with_velocity(Vec2::new(3.0, 3.0));

    // Wall face at x = 2.5; the box's right side reaches it with its center at x = 2
    let result = body.step(1.0, Vec2::new(1.0, 1.0), &world, &SlideResolver::default());

    assert_eq!(result.slide_count, 1);
    assert_eq!(result.stop_reason, StopReason::Grazing);
    assert!(body.velocity.approx_eq(Vec2::new(0.0, 3.0), 0.001));
    assert!((body.position.x - 2.0).abs() < 0.001);
    assert!(body.position.y > 2.5 && body.position.y < 3.0);
}

#[test]
fn test_trigger_and_platform_layers() {
    let mut scene = Scene::new("Layers").with_player_spawn(0.0, 0.0);
    scene.add_obstacle(
        ObstacleTemplate::new(ShapeTemplate::rect([2.0, 0.0], [0.5, 1.0]))
            .with_name("checkpoint")
            .with_layer(ObstacleLayer::Trigger),
    );
    scene.add_obstacle(
        ObstacleTemplate::new(ShapeTemplate::rect([5.0, 0.0], [0.5, 1.0]))
            .with_name("ledge")
            .with_layer(ObstacleLayer::Platform),
    );
    let world = scene.build_world();
    let resolver = SlideResolver::default();

    // Triggers never block; the platform does
    let mut walker = scene.spawn_player(&fallback_body()).with_velocity(Vec2::new(6.0, 0.0));
    walker.step(1.0, Vec2::X, &world, &resolver);
    assert!(walker.position.approx_eq(Vec2::new(4.25, 0.0), EPSILON));

    // A body that drops through platforms walks straight through both
    let mut ghost = scene
        .spawn_player(&fallback_body())
        .with_velocity(Vec2::new(6.0, 0.0))
        .with_filter(CollisionFilter::player().excluding(CollisionLayer::PLATFORM));
    ghost.step(1.0, Vec2::X, &world, &resolver);
    assert!(ghost.position.approx_eq(Vec2::new(6.0, 0.0), EPSILON));
}

// ==================== Files ====================

#[test]
fn test_scene_file_round_trip() {
    let path = std::env::temp_dir().join(format!("slide2d_scene_{}.ron", std::process::id()));
    let scene = hallway();

    scene.save(&path).expect("Scene should save");
    let loaded = Scene::load(&path).expect("Scene should load");
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded, scene);
    assert_eq!(loaded.build_world().collider_count(), 2);
}

#[test]
fn test_bundled_scene_is_valid() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../scenes/corridor.ron");
    let scene = Scene::load(&path).expect("Bundled scene should load");

    assert!(SceneValidator::validate(&scene).is_empty());
    assert!(scene.player.is_some());
    assert!(scene.build_world().collider_count() > 0);
}
