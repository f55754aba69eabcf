//! Snapshot system: queries the ECS world and builds a complete MatchSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::{Entity, World};

use royale_core::components::*;
use royale_core::enums::{MatchOutcome, MatchPhase};
use royale_core::events::MatchEvent;
use royale_core::state::*;
use royale_core::types::{Position, SimTime, Velocity};

use crate::weapons::Loadout;

/// Match-level values owned by the engine rather than the world.
pub struct MatchHeader {
    pub time: SimTime,
    pub phase: MatchPhase,
    pub outcome: Option<MatchOutcome>,
    pub stats: MatchStats,
}

/// Build a complete MatchSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    header: MatchHeader,
    player: Option<Entity>,
    registry: &[Entity],
    events: Vec<MatchEvent>,
) -> MatchSnapshot {
    MatchSnapshot {
        time: header.time,
        phase: header.phase,
        outcome: header.outcome,
        stats: header.stats,
        player: player
            .map(|e| build_player(world, e))
            .unwrap_or_default(),
        agents: build_agents(world, registry),
        projectiles: build_projectiles(world),
        grenades: build_grenades(world),
        events,
    }
}

/// Build the PlayerView. Missing components fall back to defaults.
pub fn build_player(world: &World, player: Entity) -> PlayerView {
    let Ok(mut query) = world.query_one::<(
        &Position,
        &Velocity,
        &Health,
        &GroundContact,
        &PlayerInventory,
        &Loadout,
    )>(player) else {
        return PlayerView::default();
    };
    query
        .get()
        .map(|(pos, vel, health, contact, inventory, loadout)| PlayerView {
            position: pos.0,
            velocity: vel.0,
            health: health.current,
            max_health: health.max,
            alive: health.alive,
            on_ground: contact.on_ground,
            weapon: loadout.view(),
            medkits: inventory.medkits,
            grenades: inventory.grenades,
        })
        .unwrap_or_default()
}

/// Build AgentView list in id order, dead agents included.
pub fn build_agents(world: &World, registry: &[Entity]) -> Vec<AgentView> {
    registry
        .iter()
        .filter_map(|&entity| {
            let mut query = world
                .query_one::<(&Position, &Health, &AgentBrain)>(entity)
                .ok()?;
            query.get().map(|(pos, health, brain)| AgentView {
                id: brain.id,
                archetype: brain.archetype,
                position: pos.0,
                yaw: brain.yaw,
                health: health.current,
                alive: health.alive,
                state: brain.state,
                target: brain.target,
            })
        })
        .collect()
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    world
        .query::<(&Position, &Projectile)>()
        .iter()
        .map(|(_, (pos, projectile))| ProjectileView {
            position: pos.0,
            direction: projectile.direction,
            owner: projectile.owner,
        })
        .collect()
}

fn build_grenades(world: &World) -> Vec<GrenadeView> {
    world
        .query::<(&Position, &Grenade)>()
        .iter()
        .map(|(_, (pos, grenade))| GrenadeView {
            position: pos.0,
            fuse_remaining: grenade.fuse_remaining.max(0.0),
        })
        .collect()
}
