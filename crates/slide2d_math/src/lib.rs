//! 2D Mathematics Library
//!
//! This crate provides the 2D vector type shared by the slide2d crates.
//!
//! ## Core Types
//!
//! - [`Vec2`] - 2D vector with x, y components

mod vec2;

pub use vec2::{Vec2, NORMALIZE_EPSILON};
