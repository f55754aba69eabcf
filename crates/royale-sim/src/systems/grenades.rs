//! Grenade detonation: radial damage with linear falloff.
//!
//! Grenades are always thrown by the player, so blasts only damage agents.

use glam::Vec3;
use hecs::{Entity, World};

use royale_core::components::{Grenade, Health};
use royale_core::events::MatchEvent;
use royale_core::state::MatchStats;
use royale_core::types::Position;

use crate::systems::hits::{apply_damage, record_agent_elimination};

/// Damage at `distance` from a blast centre.
pub fn blast_damage(max_damage: u32, radius: f32, distance: f32) -> u32 {
    if radius <= 0.0 || distance >= radius {
        return 0;
    }
    let falloff = 1.0 - (distance / radius).max(0.0);
    (max_damage as f32 * falloff).round() as u32
}

/// Detonate every grenade whose fuse has run out.
pub fn run(
    world: &mut World,
    registry: &[Entity],
    stats: &mut MatchStats,
    events: &mut Vec<MatchEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();

    let blasts: Vec<(Entity, Vec3, u32, f32)> = world
        .query::<(&Position, &Grenade)>()
        .iter()
        .filter(|(_, (_, g))| g.fuse_remaining <= 0.0)
        .map(|(entity, (pos, g))| (entity, pos.0, g.max_damage, g.radius))
        .collect();

    for (grenade, centre, max_damage, radius) in blasts {
        despawn_buffer.push(grenade);

        for (id, &agent) in registry.iter().enumerate() {
            let Some(distance) = world
                .get::<&Position>(agent)
                .ok()
                .map(|pos| pos.0.distance(centre))
            else {
                continue;
            };
            let damage = blast_damage(max_damage, radius, distance);
            if damage == 0 {
                continue;
            }
            let killed = match world.get::<&mut Health>(agent) {
                Ok(mut health) => apply_damage(&mut health, damage),
                Err(_) => false,
            };
            if killed {
                stats.eliminations += 1;
                record_agent_elimination(stats);
                log::debug!("player eliminated agent {} with a grenade", id);
                events.push(MatchEvent::PlayerEliminatedAgent {
                    agent_id: id as u32,
                    headshot: false,
                });
            }
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
