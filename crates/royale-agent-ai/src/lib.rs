//! Agent AI for ROYALE.
//!
//! Implements the agent decision state machine, target perception,
//! and archetype-driven combat profiles.

pub mod fsm;
pub mod perception;
pub mod profiles;

pub use royale_core as core;

#[cfg(test)]
mod tests;
