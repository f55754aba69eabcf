//! Archetype-specific combat profiles.
//!
//! Consolidates per-archetype parameters for the agent FSM.

use royale_core::enums::AgentArchetype;

/// Combat and movement profile for an agent archetype.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentProfile {
    /// Full move speed (units/s). Patrol and repositioning use half.
    pub move_speed: f32,
    /// Range at which the player or another agent is noticed.
    pub detection_range: f32,
    /// Range under which the agent stops chasing and opens fire.
    pub attack_range: f32,
    /// Shots per second.
    pub fire_rate: f32,
    pub damage: u32,
    /// Maximum per-axis deviation added to the unit aim vector.
    pub spread: f32,
    pub projectile_speed: f32,
    pub projectile_range: f32,
}

impl AgentProfile {
    /// Seconds between shots.
    pub fn fire_interval(&self) -> f32 {
        1.0 / self.fire_rate
    }
}

/// Get the profile for a given archetype.
pub fn get_profile(archetype: AgentArchetype) -> AgentProfile {
    match archetype {
        AgentArchetype::Rifleman => AgentProfile {
            move_speed: 6.0,
            detection_range: 50.0,
            attack_range: 25.0,
            fire_rate: 1.0,
            damage: 10,
            spread: 0.05,
            projectile_speed: 40.0,
            projectile_range: 30.0,
        },
        AgentArchetype::Scout => AgentProfile {
            move_speed: 8.0,
            detection_range: 40.0,
            attack_range: 15.0,
            fire_rate: 1.5,
            damage: 6,
            spread: 0.08,
            projectile_speed: 40.0,
            projectile_range: 20.0,
        },
        AgentArchetype::Marksman => AgentProfile {
            move_speed: 5.0,
            detection_range: 70.0,
            attack_range: 45.0,
            fire_rate: 0.5,
            damage: 20,
            spread: 0.02,
            projectile_speed: 60.0,
            projectile_range: 55.0,
        },
    }
}

/// Archetype for the `index`-th spawned agent. Roughly 60% riflemen,
/// 25% scouts, 15% marksmen, interleaved so small populations still mix.
pub fn archetype_for_index(index: u32) -> AgentArchetype {
    match index % 20 {
        0 | 7 | 14 => AgentArchetype::Marksman,
        2 | 5 | 10 | 13 | 17 => AgentArchetype::Scout,
        _ => AgentArchetype::Rifleman,
    }
}
