//! Background attrition: off-screen fights between agents.
//!
//! Agent projectiles never hit other agents, so population shrinks through
//! this rule instead. Each frame, with probability `players_alive / 1000`,
//! one random alive agent eliminates another. The rule stops once fewer than
//! `ATTRITION_FLOOR` combatants remain.

use hecs::{Entity, World};
use rand::Rng;

use royale_core::components::Health;
use royale_core::constants::{ATTRITION_DIVISOR, ATTRITION_FLOOR};
use royale_core::events::MatchEvent;
use royale_core::state::MatchStats;

use crate::systems::hits::record_agent_elimination;

/// Whether attrition strikes this frame.
pub fn roll<R: Rng + ?Sized>(players_alive: u32, rng: &mut R) -> bool {
    if players_alive < ATTRITION_FLOOR {
        return false;
    }
    let p = (players_alive as f64 / ATTRITION_DIVISOR).min(1.0);
    rng.gen_bool(p)
}

/// Run one frame of attrition. Returns the eliminated agent id, if any.
pub fn run<R: Rng + ?Sized>(
    world: &mut World,
    registry: &[Entity],
    rng: &mut R,
    stats: &mut MatchStats,
    events: &mut Vec<MatchEvent>,
) -> Option<u32> {
    if !roll(stats.players_alive, rng) {
        return None;
    }

    let alive: Vec<(u32, Entity)> = registry
        .iter()
        .enumerate()
        .filter(|&(_, &e)| world.get::<&Health>(e).map(|h| h.alive).unwrap_or(false))
        .map(|(id, &e)| (id as u32, e))
        .collect();
    if alive.len() < 2 {
        return None;
    }

    let attacker = rng.gen_range(0..alive.len());
    let mut victim = rng.gen_range(0..alive.len() - 1);
    if victim >= attacker {
        victim += 1;
    }
    let (attacker_id, _) = alive[attacker];
    let (victim_id, victim_entity) = alive[victim];

    if let Ok(mut health) = world.get::<&mut Health>(victim_entity) {
        health.current = 0;
        health.alive = false;
    }
    record_agent_elimination(stats);
    log::debug!(
        "agent {} eliminated agent {} ({} left)",
        attacker_id,
        victim_id,
        stats.players_alive
    );
    events.push(MatchEvent::AgentEliminatedAgent {
        attacker_id,
        victim_id,
    });
    Some(victim_id)
}
