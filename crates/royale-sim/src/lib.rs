//! Simulation engine for ROYALE.
//!
//! Owns the hecs ECS world and the arena map, runs systems in a fixed order
//! on every variable-length step, and produces MatchSnapshots for the
//! presentation layer.

pub mod engine;
pub mod systems;
pub mod weapons;
pub mod world_setup;

pub use royale_core as core;
pub use engine::SimulationEngine;
