//! ECS systems that operate on the simulation world each update.
//!
//! Systems are free functions that take `&mut World` (or `&World` for
//! read-only work). They do not own state; all state lives in components
//! or is passed in by the engine.

pub mod agent_ai;
pub mod attrition;
pub mod ballistics;
pub mod grenades;
pub mod hits;
pub mod movement;
pub mod player;
pub mod snapshot;
pub mod timers;
