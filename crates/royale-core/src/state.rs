//! Match state snapshot: the complete visible state handed to presentation
//! after each update.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::MatchEvent;
use crate::types::SimTime;

/// Match counters. Mutated only by the match director.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStats {
    /// Combatants still alive, counting the player.
    pub players_alive: u32,
    /// Agents eliminated by the player.
    pub eliminations: u32,
    pub shots_fired: u32,
    pub shots_hit: u32,
}

/// Complete match state broadcast after each update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub time: SimTime,
    pub phase: MatchPhase,
    pub outcome: Option<MatchOutcome>,
    pub stats: MatchStats,
    pub player: PlayerView,
    pub agents: Vec<AgentView>,
    pub projectiles: Vec<ProjectileView>,
    pub grenades: Vec<GrenadeView>,
    pub events: Vec<MatchEvent>,
}

/// The human-controlled combatant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Vec3,
    pub velocity: Vec3,
    pub health: u32,
    pub max_health: u32,
    pub alive: bool,
    pub on_ground: bool,
    pub weapon: WeaponView,
    pub medkits: u32,
    pub grenades: u32,
}

/// Equipped weapon status for the HUD.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeaponView {
    pub kind: WeaponKind,
    pub slot: usize,
    pub magazine: u32,
    pub magazine_size: u32,
    pub reserve: u32,
    pub reloading: bool,
    /// Seconds until the reload completes (0 when not reloading).
    pub reload_remaining: f32,
}

/// An autonomous combatant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentView {
    pub id: u32,
    pub archetype: AgentArchetype,
    pub position: Vec3,
    pub yaw: f32,
    pub health: u32,
    pub alive: bool,
    pub state: DecisionState,
    pub target: Option<TargetRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: Vec3,
    pub direction: Vec3,
    pub owner: ProjectileOwner,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrenadeView {
    pub position: Vec3,
    pub fuse_remaining: f32,
}
