//! ROYALE headless driver.
//!
//! Wires the simulation crates into a fixed-step runner and a wall-clock
//! game loop thread, with scripted player input for unattended matches.

pub mod autopilot;
pub mod control;
pub mod game_loop;
pub mod headless;
pub mod logging;
pub mod state;

pub use royale_core as core;
