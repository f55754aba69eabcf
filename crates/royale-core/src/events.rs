//! Events emitted by the simulation for the kill feed and toasts.

use serde::{Deserialize, Serialize};

/// Discrete match event, drained into each snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MatchEvent {
    /// The player eliminated an agent.
    PlayerEliminatedAgent { agent_id: u32, headshot: bool },
    /// Background attrition removed an agent.
    AgentEliminatedAgent { attacker_id: u32, victim_id: u32 },
    /// The player took damage.
    PlayerDamaged {
        amount: u32,
        remaining: u32,
        source_agent: Option<u32>,
    },
    /// The player was eliminated.
    PlayerEliminated {
        by_agent: Option<u32>,
        placement: u32,
    },
    /// The player is the last combatant standing.
    PlayerWon { eliminations: u32 },
}
