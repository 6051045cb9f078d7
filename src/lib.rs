//! slide2d - headless sweep-and-slide simulation
//!
//! The library half of the binary: configuration loading and the
//! fixed-step simulation system, exposed so integration tests can reach them.

pub mod config;
pub mod systems;
