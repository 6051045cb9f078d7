//! Application systems
//!
//! Systems extracted from main.rs so the loop can be driven from tests.

mod simulation;

pub use simulation::{SimulationSystem, TickReport};
