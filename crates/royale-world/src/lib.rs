//! World model for ROYALE.
//!
//! Static obstacle boxes plus the ground plane, collision queries used by
//! movement and projectiles, and procedural obstacle layout.

pub use royale_core as core;

pub mod generation;
pub mod map;
pub mod obstacle;

// Re-export key types for convenience.
pub use generation::{fallback_corner, generate};
pub use map::{BlockedAxes, CollisionResult, WorldMap};
pub use obstacle::Obstacle;
