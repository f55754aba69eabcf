//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Agent decision state. Death is tracked separately on `Health`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecisionState {
    #[default]
    Patrolling,
    Chasing,
    Attacking,
}

/// Agent tuning archetype.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentArchetype {
    /// Medium range all-rounder.
    #[default]
    Rifleman,
    /// Fast, short range, rapid fire.
    Scout,
    /// Slow, long range, accurate.
    Marksman,
}

/// Reference to a combatant, resolved through the engine's registry each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetRef {
    Player,
    Agent(u32),
}

/// Who fired a projectile. Only used to pick which side it can hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileOwner {
    Player,
    Agent(u32),
}

/// Player weapon kinds, in loadout slot order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    #[default]
    Rifle,
    Pistol,
    Shotgun,
}

/// Match lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// No match started yet.
    #[default]
    Idle,
    Active,
    Paused,
    Over,
}

/// How a finished match ended for the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    Victory,
    /// Eliminated; `placement` is the number of combatants alive at the time
    /// of death, counting the player.
    Defeat { placement: u32 },
}
